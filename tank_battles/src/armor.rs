//! Armor component for tanks

use bge_engine::actors::component::{decode_data, encode_data};
use bge_engine::prelude::*;
use ron::Value;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Declarative form of an [`ArmorComponent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorData {
    /// Armor points a fresh tank starts with
    pub points: u32,
    /// Points regenerated per second
    pub regen_per_sec: f32,
}

impl Default for ArmorData {
    fn default() -> Self {
        Self {
            points: 100,
            regen_per_sec: 0.0,
        }
    }
}

/// Damage absorbing armor
#[derive(Debug, Default)]
pub struct ArmorComponent {
    max_points: u32,
    points: f32,
    regen_per_sec: f32,
    owner: OwnerRef,
}

impl ArmorComponent {
    /// Remaining armor points
    pub fn points(&self) -> f32 {
        self.points
    }

    /// Check if the armor has been shot through
    pub fn is_destroyed(&self) -> bool {
        self.points <= 0.0
    }

    /// Absorb a hit
    pub fn take_hit(&mut self, damage: f32) {
        self.points = (self.points - damage).max(0.0);
        if let Some(owner) = self.owner() {
            log::debug!("Tank {} hit for {:.1}, {:.1} armor left", owner, damage, self.points);
        }
    }
}

impl ActorComponent for ArmorComponent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[allow(clippy::cast_precision_loss)]
    fn init(&mut self, data: &Value) -> Result<(), ActorError> {
        let data: ArmorData = decode_data(Self::NAME, data)?;
        self.max_points = data.points;
        self.points = data.points as f32;
        self.regen_per_sec = data.regen_per_sec;
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn update(&mut self, delta_ms: f32) {
        if !self.is_destroyed() {
            let regen = self.regen_per_sec * Timer::millis_to_secs(delta_ms);
            self.points = (self.points + regen).min(self.max_points as f32);
        }
    }

    fn generate_data(&self) -> Result<Value, ActorError> {
        encode_data(&ArmorData {
            points: self.max_points,
            regen_per_sec: self.regen_per_sec,
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

impl ComponentType for ArmorComponent {
    const NAME: &'static str = "ArmorComponent";
}
