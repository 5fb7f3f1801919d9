//! Declarative actor resources

use super::ActorError;
use ron::Value;
use serde::{Deserialize, Serialize};

/// Declarative description of an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDefinition {
    /// Actor type tag
    #[serde(rename = "type")]
    pub actor_type: String,
    /// Resource file the definition was loaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Components in creation order
    #[serde(default)]
    pub components: Vec<ComponentDefinition>,
}

/// One component entry of an [`ActorDefinition`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Registered component name
    pub name: String,
    /// Component specific data, `()` when omitted
    #[serde(default = "unit_value")]
    pub data: Value,
}

fn unit_value() -> Value {
    Value::Unit
}

impl ActorDefinition {
    /// Create an empty definition of the given type
    pub fn new(actor_type: impl Into<String>) -> Self {
        Self {
            actor_type: actor_type.into(),
            resource: None,
            components: Vec::new(),
        }
    }

    /// Builder pattern: append a component entry
    pub fn with_component(mut self, component: ComponentDefinition) -> Self {
        self.components.push(component);
        self
    }

    /// Parse a definition from RON text; `resource` names the source in errors
    pub fn from_ron(text: &str, resource: &str) -> Result<Self, ActorError> {
        ron::from_str(text).map_err(|e| ActorError::Parse {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the definition as pretty RON
    pub fn to_ron(&self) -> Result<String, ActorError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ActorError::Serialize(e.to_string()))
    }
}

impl ComponentDefinition {
    /// Component entry without data
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Value::Unit,
        }
    }

    /// Component entry with data
    pub fn with_data(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Component entry with data given as RON text
    pub fn from_ron(name: impl Into<String>, data: &str) -> Result<Self, ActorError> {
        let name = name.into();
        let data = ron::from_str(data).map_err(|e| ActorError::Parse {
            resource: name.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { name, data })
    }
}
