//! Actor/component entity model
//!
//! An [`Actor`] is an entity with a unique [`ActorId`] that exclusively owns a
//! set of [`ActorComponent`]s, at most one per [`ComponentId`]. Component ids
//! are derived from the component type name, so typed lookup works on both
//! sides of a declarative actor resource and in code.
//!
//! Actors are built by the [`ActorFactory`] from [`ActorDefinition`]s, usually
//! loaded from RON files:
//!
//! ```ron
//! (
//!     type: "Tank",
//!     components: [
//!         (name: "TransformComponent", data: (position: (0.0, 0.0, 5.0))),
//!         (name: "LifetimeComponent", data: (duration_ms: 3000.0)),
//!     ],
//! )
//! ```

pub mod actor;
pub mod component;
pub mod components;
pub mod definition;
pub mod factory;

#[cfg(test)]
mod tests;

pub use actor::Actor;
pub use component::{ActorComponent, ComponentType, OwnerRef};
pub use definition::{ActorDefinition, ComponentDefinition};
pub use factory::{ActorFactory, ComponentCreator};

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Actor identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(u32);

impl ActorId {
    /// Id that never names a live actor
    pub const INVALID: Self = Self(0);

    /// Create an id from its raw value
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check if this is not [`ActorId::INVALID`]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Component type identifier derived from the component name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Id that never names a component type
    pub const INVALID: Self = Self(0);

    /// Hash a component type name (32-bit FNV-1a)
    ///
    /// Names are case sensitive. A hash of zero is remapped to one so that
    /// [`ComponentId::INVALID`] is never produced.
    pub const fn from_name(name: &str) -> Self {
        const OFFSET_BASIS: u32 = 0x811c_9dc5;
        const PRIME: u32 = 0x0100_0193;

        let bytes = name.as_bytes();
        let mut hash = OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(PRIME);
            i += 1;
        }

        if hash == 0 { Self(1) } else { Self(hash) }
    }

    /// Get the raw id value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Actor type tag, e.g. `"Tank"`
pub type ActorType = String;

/// Actor system errors
#[derive(Error, Debug)]
pub enum ActorError {
    /// Actor resource could not be read
    #[error("Cannot read actor resource {path}: {source}")]
    Io {
        /// Resolved resource path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Actor resource is not valid RON
    #[error("Cannot parse actor resource {resource}: {message}")]
    Parse {
        /// Resource name
        resource: String,
        /// Parser message
        message: String,
    },

    /// Data could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// No constructor registered for the component name
    #[error("Unknown component type '{0}'")]
    UnknownComponent(String),

    /// Two different component names hash to the same id
    #[error("Component '{name}' collides with registered component '{existing}' (id {id})")]
    ComponentIdCollision {
        /// Name being registered
        name: String,
        /// Name already registered under the id
        existing: String,
        /// Shared id
        id: ComponentId,
    },

    /// Component data does not match the component's schema
    #[error("Invalid data for component '{component}': {reason}")]
    InvalidComponentData {
        /// Component name
        component: String,
        /// Decoder message
        reason: String,
    },

    /// Actor already holds a component with this id
    #[error("Actor {actor} already has component '{component}'")]
    DuplicateComponent {
        /// Owning actor
        actor: ActorId,
        /// Component name
        component: String,
    },

    /// Component is already attached to a different actor
    #[error("Component '{component}' is already owned by actor {owner}")]
    AlreadyOwned {
        /// Component name
        component: String,
        /// Current owner
        owner: ActorId,
    },

    /// [`ActorId::INVALID`] was supplied where a real id is needed
    #[error("Invalid actor id")]
    InvalidActorId,

    /// Every actor id has been issued
    #[error("Actor ids exhausted")]
    IdsExhausted,

    /// The id is live or was issued before
    #[error("Actor id {0} already in use")]
    DuplicateActorId(ActorId),

    /// No live actor has this id
    #[error("Actor {0} not found")]
    ActorNotFound(ActorId),
}
