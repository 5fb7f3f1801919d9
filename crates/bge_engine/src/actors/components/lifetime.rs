//! Lifetime Component
//!
//! Tracks how long an actor has been alive so the game logic can destroy it
//! once its duration has run out.

use crate::actors::component::{decode_data, encode_data};
use crate::actors::{ActorComponent, ActorError, ComponentType, OwnerRef};
use ron::Value;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Declarative form of a [`LifetimeComponent`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeData {
    /// Lifespan in milliseconds, 0 for infinite
    pub duration_ms: f32,
}

/// Lifetime component for actors that should be destroyed after a duration
#[derive(Debug, Clone, Default)]
pub struct LifetimeComponent {
    duration_ms: f32,
    elapsed_ms: f32,
    owner: OwnerRef,
}

impl LifetimeComponent {
    /// Create a lifetime of `duration_ms` milliseconds
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    /// Configured lifespan in milliseconds
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Time lived so far in milliseconds
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Check if the lifespan has run out
    pub fn is_expired(&self) -> bool {
        if self.duration_ms <= 0.0 {
            false // Infinite lifetime
        } else {
            self.elapsed_ms >= self.duration_ms
        }
    }

    /// Get remaining lifetime in milliseconds
    pub fn remaining_ms(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            f32::INFINITY
        } else {
            (self.duration_ms - self.elapsed_ms).max(0.0)
        }
    }

    /// Start counting from zero again
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

impl ActorComponent for LifetimeComponent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, data: &Value) -> Result<(), ActorError> {
        let data: LifetimeData = decode_data(Self::NAME, data)?;
        if !data.duration_ms.is_finite() || data.duration_ms < 0.0 {
            return Err(ActorError::InvalidComponentData {
                component: Self::NAME.to_string(),
                reason: format!("duration_ms must be a finite non-negative number, got {}", data.duration_ms),
            });
        }
        self.duration_ms = data.duration_ms;
        Ok(())
    }

    fn update(&mut self, delta_ms: f32) {
        self.elapsed_ms += delta_ms;
    }

    fn on_changed(&mut self) {
        self.restart();
    }

    fn generate_data(&self) -> Result<Value, ActorError> {
        encode_data(&LifetimeData {
            duration_ms: self.duration_ms,
        })
    }

    fn owner_ref(&self) -> &OwnerRef {
        &self.owner
    }

    fn owner_ref_mut(&mut self) -> &mut OwnerRef {
        &mut self.owner
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for LifetimeComponent {
    const NAME: &'static str = "LifetimeComponent";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_not_expired() {
        let mut lifetime = LifetimeComponent::new(5000.0);
        lifetime.update(2000.0);
        assert!(!lifetime.is_expired());
        assert_eq!(lifetime.remaining_ms(), 3000.0);
    }

    #[test]
    fn test_lifetime_expired() {
        let mut lifetime = LifetimeComponent::new(5000.0);
        lifetime.update(3000.0);
        lifetime.update(3000.0);
        assert!(lifetime.is_expired());
        assert_eq!(lifetime.remaining_ms(), 0.0);
    }

    #[test]
    fn test_infinite_lifetime() {
        let mut lifetime = LifetimeComponent::default();
        lifetime.update(1_000_000.0);
        assert!(!lifetime.is_expired());
        assert!(lifetime.remaining_ms().is_infinite());
    }

    #[test]
    fn test_on_changed_restarts() {
        let mut lifetime = LifetimeComponent::new(100.0);
        lifetime.update(80.0);

        let data: Value = ron::from_str("(duration_ms: 200.0)").unwrap();
        lifetime.init(&data).unwrap();
        lifetime.on_changed();

        assert_eq!(lifetime.duration_ms(), 200.0);
        assert_eq!(lifetime.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let data: Value = ron::from_str("(duration_ms: -1.0)").unwrap();
        let mut lifetime = LifetimeComponent::default();
        assert!(lifetime.init(&data).is_err());
    }
}
