//! Built-in actor components
//!
//! Registered with every [`ActorFactory`](crate::actors::ActorFactory) by default.

pub mod lifetime;
pub mod transform;

pub use lifetime::{LifetimeComponent, LifetimeData};
pub use transform::{TransformComponent, TransformData};
