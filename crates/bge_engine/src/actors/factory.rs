//! Actor factory
//!
//! Builds actors from [`ActorDefinition`]s. Component constructors are
//! registered by name; the name-derived [`ComponentId`] is the registry key.

use super::component::merge_data;
use super::components::{LifetimeComponent, TransformComponent};
use super::{
    Actor, ActorComponent, ActorDefinition, ActorError, ActorId, ComponentDefinition, ComponentId,
    ComponentType,
};
use crate::config::ActorConfig;
use crate::foundation::math::Mat4;
use ron::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Constructor for a registered component type
pub type ComponentCreator = Box<dyn Fn() -> Box<dyn ActorComponent> + Send + Sync>;

enum StagedOverride {
    Update { id: ComponentId, data: Value },
    Add(Box<dyn ActorComponent>),
}

impl StagedOverride {
    fn id(&self) -> ComponentId {
        match self {
            Self::Update { id, .. } => *id,
            Self::Add(component) => component.id(),
        }
    }
}

struct Registration {
    name: String,
    creator: ComponentCreator,
}

/// Creates actors and their components from declarative data
pub struct ActorFactory {
    last_actor_id: u32,
    creators: HashMap<ComponentId, Registration>,
    resource_root: PathBuf,
}

impl ActorFactory {
    /// Create a factory resolving resources against `resource_root`
    ///
    /// The built-in components are registered.
    pub fn new(resource_root: impl Into<PathBuf>) -> Self {
        let mut factory = Self {
            last_actor_id: ActorId::INVALID.value(),
            creators: HashMap::new(),
            resource_root: resource_root.into(),
        };
        factory.register_builtin_components();
        factory
    }

    /// Create a factory from the actor configuration section
    pub fn from_config(config: &ActorConfig) -> Self {
        Self::new(&config.resource_root)
    }

    fn register_builtin_components(&mut self) {
        for result in [
            self.register_component::<TransformComponent>(),
            self.register_component::<LifetimeComponent>(),
        ] {
            if let Err(e) = result {
                log::error!("Failed to register built-in component: {}", e);
            }
        }
    }

    /// Directory resource paths are resolved against
    pub fn resource_root(&self) -> &Path {
        &self.resource_root
    }

    /// Change the directory resource paths are resolved against
    pub fn set_resource_root(&mut self, resource_root: impl Into<PathBuf>) {
        self.resource_root = resource_root.into();
    }

    /// Register a component type under [`ComponentType::NAME`]
    pub fn register_component<T>(&mut self) -> Result<(), ActorError>
    where
        T: ComponentType + Default,
    {
        self.register_creator(T::NAME, || Box::new(T::default()))
    }

    /// Register a constructor under a component name
    ///
    /// Registering the same name again replaces its constructor. A different
    /// name that hashes to an already registered id is rejected.
    pub fn register_creator<F>(&mut self, name: &str, creator: F) -> Result<(), ActorError>
    where
        F: Fn() -> Box<dyn ActorComponent> + Send + Sync + 'static,
    {
        let id = ComponentId::from_name(name);
        if let Some(existing) = self.creators.get(&id) {
            if existing.name != name {
                return Err(ActorError::ComponentIdCollision {
                    name: name.to_string(),
                    existing: existing.name.clone(),
                    id,
                });
            }
            log::debug!("Replacing constructor for component '{}'", name);
        }

        self.creators.insert(
            id,
            Registration {
                name: name.to_string(),
                creator: Box::new(creator),
            },
        );
        log::trace!("Registered component '{}' ({})", name, id);
        Ok(())
    }

    /// Check if a constructor is registered for the name
    pub fn is_registered(&self, name: &str) -> bool {
        self.creators.contains_key(&ComponentId::from_name(name))
    }

    /// Construct a component and initialize it from its definition
    pub fn create_component(&self, definition: &ComponentDefinition) -> Result<Box<dyn ActorComponent>, ActorError> {
        let registration = self
            .creators
            .get(&ComponentId::from_name(&definition.name))
            .ok_or_else(|| ActorError::UnknownComponent(definition.name.clone()))?;

        let mut component = (registration.creator)();
        component.init(&definition.data)?;
        Ok(component)
    }

    /// Read an actor definition relative to the resource root
    pub fn load_definition(&self, resource: &str) -> Result<ActorDefinition, ActorError> {
        let path = self.resource_root.join(resource);
        let text = std::fs::read_to_string(&path).map_err(|source| ActorError::Io {
            path: path.clone(),
            source,
        })?;

        let mut definition = ActorDefinition::from_ron(&text, resource)?;
        if definition.resource.is_none() {
            definition.resource = Some(resource.to_string());
        }
        Ok(definition)
    }

    /// Create an actor from a resource file
    pub fn create_actor(
        &mut self,
        resource: &str,
        overrides: Option<&[ComponentDefinition]>,
        initial_transform: Option<&Mat4>,
        server_actor_id: Option<ActorId>,
    ) -> Result<Actor, ActorError> {
        let definition = self.load_definition(resource)?;
        self.create_actor_from_definition(&definition, overrides, initial_transform, server_actor_id)
    }

    /// Create an actor from an in-memory definition
    ///
    /// Any component that fails to be created aborts the whole actor.
    pub fn create_actor_from_definition(
        &mut self,
        definition: &ActorDefinition,
        overrides: Option<&[ComponentDefinition]>,
        initial_transform: Option<&Mat4>,
        server_actor_id: Option<ActorId>,
    ) -> Result<Actor, ActorError> {
        let id = match server_actor_id {
            Some(id) => self.accept_server_id(id)?,
            None => self.next_actor_id()?,
        };

        let mut actor = Actor::new(id);
        actor.init(definition);

        for component_definition in &definition.components {
            let component = self.create_component(component_definition).map_err(|e| {
                log::error!(
                    "Failed to create component '{}' for actor '{}': {}",
                    component_definition.name,
                    definition.actor_type,
                    e
                );
                e
            })?;
            actor.add_component(component)?;
        }

        if let Some(overrides) = overrides {
            self.apply_overrides(&mut actor, overrides, false)?;
        }

        if let Some(matrix) = initial_transform {
            match actor.component_mut::<TransformComponent>() {
                Some(transform) => transform.set_from_matrix(matrix),
                None => log::debug!(
                    "Actor {} ({}) has no {}; initial transform ignored",
                    id,
                    definition.actor_type,
                    TransformComponent::NAME
                ),
            }
        }

        actor.post_init();
        log::debug!(
            "Created actor {} ({}) with {} components",
            id,
            actor.actor_type(),
            actor.component_count()
        );
        Ok(actor)
    }

    /// Apply component overrides to a live actor
    ///
    /// Existing components get the override merged into their current data,
    /// are re-initialized and notified through `on_changed`. Components the
    /// actor does not have yet are created and added.
    ///
    /// Every override is decoded before the actor is touched, so a failing
    /// override leaves the actor unchanged.
    pub fn modify_actor(&self, actor: &mut Actor, overrides: &[ComponentDefinition]) -> Result<(), ActorError> {
        self.apply_overrides(actor, overrides, true)
    }

    fn apply_overrides(
        &self,
        actor: &mut Actor,
        overrides: &[ComponentDefinition],
        post_init_new: bool,
    ) -> Result<(), ActorError> {
        let staged = self.stage_overrides(actor, overrides)?;

        let mut added = Vec::new();
        for change in staged {
            match change {
                StagedOverride::Update { id, data } => {
                    if let Some(component) = actor.component_by_id_mut(id) {
                        component.init(&data)?;
                        component.on_changed();
                    }
                }
                StagedOverride::Add(component) => {
                    added.push(component.id());
                    actor.add_component(component)?;
                }
            }
        }

        if post_init_new {
            for id in added {
                if let Some(component) = actor.component_by_id_mut(id) {
                    component.post_init();
                }
            }
        }
        Ok(())
    }

    fn stage_overrides(
        &self,
        actor: &Actor,
        overrides: &[ComponentDefinition],
    ) -> Result<Vec<StagedOverride>, ActorError> {
        let mut staged: Vec<StagedOverride> = Vec::with_capacity(overrides.len());

        for definition in overrides {
            let id = ComponentId::from_name(&definition.name);

            // Repeated names fold into the change staged earlier
            if let Some(change) = staged.iter_mut().find(|change| change.id() == id) {
                match change {
                    StagedOverride::Update { data, .. } => {
                        merge_data(data, &definition.data);
                        self.validate_data(&definition.name, data)?;
                    }
                    StagedOverride::Add(component) => {
                        let mut data = component.generate_data()?;
                        merge_data(&mut data, &definition.data);
                        component.init(&data)?;
                    }
                }
                continue;
            }

            if let Some(component) = actor.component_by_id(id) {
                let mut data = component.generate_data()?;
                merge_data(&mut data, &definition.data);
                self.validate_data(&definition.name, &data)?;
                staged.push(StagedOverride::Update { id, data });
            } else {
                staged.push(StagedOverride::Add(self.create_component(definition)?));
            }
        }
        Ok(staged)
    }

    /// Initialize a scratch instance to check merged data before it reaches a live component
    fn validate_data(&self, name: &str, data: &Value) -> Result<(), ActorError> {
        if let Some(registration) = self.creators.get(&ComponentId::from_name(name)) {
            (registration.creator)().init(data)?;
        }
        Ok(())
    }

    /// Issue the next local actor id
    pub fn next_actor_id(&mut self) -> Result<ActorId, ActorError> {
        self.last_actor_id = self.last_actor_id.checked_add(1).ok_or(ActorError::IdsExhausted)?;
        Ok(ActorId::new(self.last_actor_id))
    }

    /// Last id issued or accepted
    pub fn last_actor_id(&self) -> ActorId {
        ActorId::new(self.last_actor_id)
    }

    /// Server ids must be above every id issued or accepted so far
    fn accept_server_id(&mut self, id: ActorId) -> Result<ActorId, ActorError> {
        if !id.is_valid() {
            return Err(ActorError::InvalidActorId);
        }
        if id.value() <= self.last_actor_id {
            return Err(ActorError::DuplicateActorId(id));
        }
        self.last_actor_id = id.value();
        Ok(id)
    }
}

impl Default for ActorFactory {
    fn default() -> Self {
        Self::from_config(&ActorConfig::default())
    }
}

impl std::fmt::Debug for ActorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.creators.values().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("ActorFactory")
            .field("last_actor_id", &self.last_actor_id)
            .field("components", &names)
            .field("resource_root", &self.resource_root)
            .finish()
    }
}
