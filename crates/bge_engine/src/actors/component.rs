//! Component trait and owner back-reference

use super::{ActorError, ActorId, ComponentId};
use ron::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;

/// Back-reference from a component to the actor that owns it
///
/// Set once when the component is attached and cleared when the actor is
/// destroyed. The reference is an [`ActorId`] rather than a pointer: the actor
/// owns its components, so the id stays valid for as long as the component is
/// attached and is resolved through the game logic when needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerRef {
    actor: Option<ActorId>,
}

impl OwnerRef {
    /// Owning actor, if attached
    pub fn get(&self) -> Option<ActorId> {
        self.actor
    }

    /// Attach to an actor. Re-attaching to the same actor is a no-op.
    pub fn attach(&mut self, owner: ActorId, component: &str) -> Result<(), ActorError> {
        if !owner.is_valid() {
            return Err(ActorError::InvalidActorId);
        }
        match self.actor {
            Some(current) if current != owner => Err(ActorError::AlreadyOwned {
                component: component.to_string(),
                owner: current,
            }),
            _ => {
                self.actor = Some(owner);
                Ok(())
            }
        }
    }

    /// Drop the back-reference
    pub fn clear(&mut self) {
        self.actor = None;
    }
}

/// Polymorphic capability unit attached to exactly one actor
///
/// Components are configured from declarative data (`init`), may react to the
/// whole actor being assembled (`post_init`), are stepped every frame
/// (`update`), and can serialize themselves back (`generate_data`).
pub trait ActorComponent: Any + Send + Sync {
    /// Type name the component is registered and looked up under
    fn name(&self) -> &'static str;

    /// Component id, derived from [`ActorComponent::name`]
    fn id(&self) -> ComponentId {
        ComponentId::from_name(self.name())
    }

    /// Configure the component from declarative data
    ///
    /// `Value::Unit` means "no data"; components fall back to defaults.
    fn init(&mut self, data: &Value) -> Result<(), ActorError>;

    /// Called once every component of the owning actor has been created
    fn post_init(&mut self) {}

    /// Advance the component by `delta_ms` milliseconds
    fn update(&mut self, _delta_ms: f32) {}

    /// Called after the component was re-initialized from override data
    fn on_changed(&mut self) {}

    /// Serialize the current state in the form `init` accepts
    fn generate_data(&self) -> Result<Value, ActorError>;

    /// Back-reference to the owning actor
    fn owner_ref(&self) -> &OwnerRef;

    /// Mutable back-reference to the owning actor
    fn owner_ref_mut(&mut self) -> &mut OwnerRef;

    /// Upcast for typed lookup
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed lookup
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owning actor, if attached
    fn owner(&self) -> Option<ActorId> {
        self.owner_ref().get()
    }

    /// Record the owning actor; fails if a different actor already owns it
    fn attach_owner(&mut self, owner: ActorId) -> Result<(), ActorError> {
        let name = self.name();
        self.owner_ref_mut().attach(owner, name)
    }

    /// Clear the owning actor
    fn detach_owner(&mut self) {
        self.owner_ref_mut().clear();
    }
}

/// Static identity of a concrete component type
pub trait ComponentType: ActorComponent + Sized {
    /// Type name, must equal what [`ActorComponent::name`] returns
    const NAME: &'static str;

    /// Component id for this type
    fn component_id() -> ComponentId {
        ComponentId::from_name(Self::NAME)
    }
}

/// Decode component data into its schema type, using defaults for `Value::Unit`
pub fn decode_data<T>(component: &str, data: &Value) -> Result<T, ActorError>
where
    T: DeserializeOwned + Default,
{
    if matches!(data, Value::Unit) {
        return Ok(T::default());
    }
    data.clone()
        .into_rust::<T>()
        .map_err(|e| ActorError::InvalidComponentData {
            component: component.to_string(),
            reason: e.to_string(),
        })
}

/// Encode a component's schema type as a RON value
pub fn encode_data<T: Serialize>(data: &T) -> Result<Value, ActorError> {
    let text = ron::to_string(data).map_err(|e| ActorError::Serialize(e.to_string()))?;
    ron::from_str(&text).map_err(|e| ActorError::Serialize(e.to_string()))
}

/// Merge `patch` into `base`
///
/// Maps are merged key by key recursively; any other patch value replaces the
/// base value outright.
pub fn merge_data(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Map(base_map), Value::Map(patch_map)) => {
            for (key, patch_value) in patch_map.iter() {
                match base_map.remove(key) {
                    Some(mut existing) => {
                        merge_data(&mut existing, patch_value);
                        base_map.insert(key.clone(), existing);
                    }
                    None => {
                        base_map.insert(key.clone(), patch_value.clone());
                    }
                }
            }
        }
        (_, Value::Unit) => {}
        (base, patch) => *base = patch.clone(),
    }
}
