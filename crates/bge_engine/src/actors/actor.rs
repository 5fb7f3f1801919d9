//! Actor implementation

use super::{
    ActorComponent, ActorDefinition, ActorError, ActorId, ActorType, ComponentDefinition, ComponentId,
    ComponentType,
};
use std::collections::BTreeMap;

/// Entity in the game world
///
/// An actor exclusively owns its components; dropping or destroying the actor
/// drops every component with it. Actors are created through the
/// [`ActorFactory`](super::ActorFactory).
pub struct Actor {
    id: ActorId,
    actor_type: ActorType,
    resource: Option<String>,
    components: BTreeMap<ComponentId, Box<dyn ActorComponent>>,
}

impl Actor {
    pub(crate) fn new(id: ActorId) -> Self {
        Self {
            id,
            actor_type: String::new(),
            resource: None,
            components: BTreeMap::new(),
        }
    }

    /// Take type and resource name from a definition
    pub fn init(&mut self, definition: &ActorDefinition) {
        self.actor_type.clone_from(&definition.actor_type);
        self.resource.clone_from(&definition.resource);
    }

    /// Notify every component that the actor is fully assembled
    pub fn post_init(&mut self) {
        for component in self.components.values_mut() {
            component.post_init();
        }
    }

    /// Advance every component
    pub fn update(&mut self, delta_ms: f32) {
        for component in self.components.values_mut() {
            component.update(delta_ms);
        }
    }

    /// Detach and drop every component
    pub fn destroy(&mut self) {
        for component in self.components.values_mut() {
            component.detach_owner();
        }
        self.components.clear();
        log::trace!("Destroyed actor {} ({})", self.id, self.actor_type);
    }

    /// Actor id
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Actor type tag
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    /// Resource the actor was created from
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Attach a component to this actor
    pub fn add_component(&mut self, mut component: Box<dyn ActorComponent>) -> Result<(), ActorError> {
        let id = component.id();
        if self.components.contains_key(&id) {
            return Err(ActorError::DuplicateComponent {
                actor: self.id,
                component: component.name().to_string(),
            });
        }
        component.attach_owner(self.id)?;
        self.components.insert(id, component);
        Ok(())
    }

    /// Typed component lookup
    pub fn component<T: ComponentType>(&self) -> Option<&T> {
        self.component_by_id(T::component_id())?.as_any().downcast_ref::<T>()
    }

    /// Typed mutable component lookup
    pub fn component_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        self.component_by_id_mut(T::component_id())?.as_any_mut().downcast_mut::<T>()
    }

    /// Typed lookup by registered name, `None` if the stored component is not a `T`
    pub fn component_by_name<T: ComponentType>(&self, name: &str) -> Option<&T> {
        self.component_by_id(ComponentId::from_name(name))?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Untyped component lookup
    pub fn component_by_id(&self, id: ComponentId) -> Option<&dyn ActorComponent> {
        self.components.get(&id).map(AsRef::as_ref)
    }

    /// Untyped mutable component lookup
    pub fn component_by_id_mut(&mut self, id: ComponentId) -> Option<&mut dyn ActorComponent> {
        match self.components.get_mut(&id) {
            Some(component) => Some(component.as_mut()),
            None => None,
        }
    }

    /// Iterate over components in id order
    pub fn components(&self) -> impl Iterator<Item = &dyn ActorComponent> {
        self.components.values().map(AsRef::as_ref)
    }

    /// Check if a component with the id is attached
    pub fn has_component(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Regenerate the declarative form of this actor
    pub fn to_definition(&self) -> Result<ActorDefinition, ActorError> {
        let components = self
            .components
            .values()
            .map(|component| -> Result<ComponentDefinition, ActorError> {
                Ok(ComponentDefinition::with_data(component.name(), component.generate_data()?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ActorDefinition {
            actor_type: self.actor_type.clone(),
            resource: self.resource.clone(),
            components,
        })
    }

    /// Serialize this actor as a RON actor resource
    pub fn to_ron(&self) -> Result<String, ActorError> {
        self.to_definition()?.to_ron()
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("actor_type", &self.actor_type)
            .field("resource", &self.resource)
            .field("components", &self.components.values().map(|c| c.name()).collect::<Vec<_>>())
            .finish()
    }
}
