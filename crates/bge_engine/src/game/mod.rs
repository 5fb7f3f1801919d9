//! Game logic
//!
//! Owns the [`ActorFactory`] and every live actor. Actor lifecycle changes are
//! announced through the [`EventSystem`].

use crate::actors::components::LifetimeComponent;
use crate::actors::{Actor, ActorDefinition, ActorError, ActorFactory, ActorId, ComponentDefinition};
use crate::config::ActorConfig;
use crate::events::{Event, EventArg, EventSystem, EventType};
use crate::foundation::math::Mat4;
use std::collections::BTreeMap;

/// Registry of live actors
#[derive(Debug)]
pub struct GameLogic {
    factory: ActorFactory,
    actors: BTreeMap<ActorId, Actor>,
    events: EventSystem,
    elapsed_ms: f64,
}

impl GameLogic {
    /// Create game logic around an existing factory
    pub fn new(factory: ActorFactory) -> Self {
        Self {
            factory,
            actors: BTreeMap::new(),
            events: EventSystem::new(),
            elapsed_ms: 0.0,
        }
    }

    /// Create game logic from the actor configuration section
    pub fn from_config(config: &ActorConfig) -> Self {
        Self::new(ActorFactory::from_config(config))
    }

    /// Create an actor from a resource file and add it to the game
    pub fn create_actor(
        &mut self,
        resource: &str,
        overrides: Option<&[ComponentDefinition]>,
        initial_transform: Option<&Mat4>,
        server_actor_id: Option<ActorId>,
    ) -> Result<ActorId, ActorError> {
        if let Some(id) = server_actor_id {
            self.ensure_free(id)?;
        }
        let actor = self
            .factory
            .create_actor(resource, overrides, initial_transform, server_actor_id)?;
        self.insert_actor(actor)
    }

    /// Create an actor from an in-memory definition and add it to the game
    pub fn create_actor_from_definition(
        &mut self,
        definition: &ActorDefinition,
        overrides: Option<&[ComponentDefinition]>,
        initial_transform: Option<&Mat4>,
        server_actor_id: Option<ActorId>,
    ) -> Result<ActorId, ActorError> {
        if let Some(id) = server_actor_id {
            self.ensure_free(id)?;
        }
        let actor = self.factory.create_actor_from_definition(
            definition,
            overrides,
            initial_transform,
            server_actor_id,
        )?;
        self.insert_actor(actor)
    }

    /// Apply component overrides to a live actor
    pub fn modify_actor(&mut self, id: ActorId, overrides: &[ComponentDefinition]) -> Result<(), ActorError> {
        let actor = self.actors.get_mut(&id).ok_or(ActorError::ActorNotFound(id))?;
        self.factory.modify_actor(actor, overrides)?;

        log::debug!("Modified actor {} ({} overrides)", id, overrides.len());
        self.events.send(
            Event::new(EventType::ActorModified, self.elapsed_ms)
                .with_arg("actor_id", EventArg::ActorId(id))
                .with_arg("actor_type", EventArg::ActorType(actor.actor_type().to_string())),
        );
        Ok(())
    }

    /// Destroy a live actor and every component it owns
    pub fn destroy_actor(&mut self, id: ActorId) -> Result<(), ActorError> {
        let mut actor = self.actors.remove(&id).ok_or(ActorError::ActorNotFound(id))?;
        let actor_type = actor.actor_type().to_string();
        actor.destroy();

        log::debug!("Destroyed actor {} ({})", id, actor_type);
        self.events.send(
            Event::new(EventType::ActorDestroyed, self.elapsed_ms)
                .with_arg("actor_id", EventArg::ActorId(id))
                .with_arg("actor_type", EventArg::ActorType(actor_type)),
        );
        Ok(())
    }

    /// Live actor by id
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Mutable live actor by id
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Ids of every live actor in ascending order
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actors.keys().copied()
    }

    /// Number of live actors
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Game time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance every actor, remove expired ones and deliver events
    pub fn update(&mut self, delta_ms: f32) {
        self.elapsed_ms += f64::from(delta_ms);
        self.events.update_time(self.elapsed_ms);

        for actor in self.actors.values_mut() {
            actor.update(delta_ms);
        }

        let expired: Vec<ActorId> = self
            .actors
            .values()
            .filter(|actor| {
                actor
                    .component::<LifetimeComponent>()
                    .is_some_and(LifetimeComponent::is_expired)
            })
            .map(Actor::id)
            .collect();

        for id in expired {
            log::trace!("Actor {} lifetime expired", id);
            if let Err(e) = self.destroy_actor(id) {
                log::warn!("Failed to destroy expired actor {}: {}", id, e);
            }
        }

        self.events.dispatch();
    }

    /// Destroy every live actor
    pub fn clear(&mut self) {
        let ids: Vec<ActorId> = self.actor_ids().collect();
        for id in ids {
            if let Err(e) = self.destroy_actor(id) {
                log::warn!("Failed to destroy actor {}: {}", id, e);
            }
        }
        self.events.dispatch();
    }

    /// Actor factory, e.g. for registering components
    pub fn factory(&self) -> &ActorFactory {
        &self.factory
    }

    /// Mutable actor factory
    pub fn factory_mut(&mut self) -> &mut ActorFactory {
        &mut self.factory
    }

    /// Event system
    pub fn events_mut(&mut self) -> &mut EventSystem {
        &mut self.events
    }

    fn ensure_free(&self, id: ActorId) -> Result<(), ActorError> {
        if self.actors.contains_key(&id) {
            return Err(ActorError::DuplicateActorId(id));
        }
        Ok(())
    }

    fn insert_actor(&mut self, actor: Actor) -> Result<ActorId, ActorError> {
        let id = actor.id();
        self.ensure_free(id)?;

        self.events.send(
            Event::new(EventType::ActorCreated, self.elapsed_ms)
                .with_arg("actor_id", EventArg::ActorId(id))
                .with_arg("actor_type", EventArg::ActorType(actor.actor_type().to_string())),
        );
        self.actors.insert(id, actor);
        Ok(id)
    }
}

impl Default for GameLogic {
    fn default() -> Self {
        Self::new(ActorFactory::default())
    }
}
