//! Factory and lifecycle scenarios for the actor model


use crate::actors::component::{decode_data, encode_data};
use crate::actors::{ActorComponent, ActorError, ComponentType, OwnerRef};
use ron::Value;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Hook counters shared between a test and the components it creates
#[derive(Debug, Default)]
pub(super) struct HookCounts {
    pub post_init: AtomicUsize,
    pub changed: AtomicUsize,
    pub updates: AtomicUsize,
}

impl HookCounts {
    pub fn post_init(&self) -> usize {
        self.post_init.load(Ordering::SeqCst)
    }

    pub fn changed(&self) -> usize {
        self.changed.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct ArmorData {
    pub points: u32,
    pub material: String,
}

/// Test component with observable hooks
#[derive(Debug, Default)]
pub(super) struct ArmorComponent {
    pub data: ArmorData,
    pub counts: Arc<HookCounts>,
    owner: OwnerRef,
}

impl ArmorComponent {
    pub fn with_counts(counts: Arc<HookCounts>) -> Self {
        Self {
            counts,
            ..Self::default()
        }
    }
}

impl ActorComponent for ArmorComponent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, data: &Value) -> Result<(), ActorError> {
        self.data = decode_data(Self::NAME, data)?;
        Ok(())
    }

    fn post_init(&mut self) {
        self.counts.post_init.fetch_add(1, Ordering::SeqCst);
    }

    fn update(&mut self, _delta_ms: f32) {
        self.counts.updates.fetch_add(1, Ordering::SeqCst);
    }

    fn on_changed(&mut self) {
        self.counts.changed.fetch_add(1, Ordering::SeqCst);
    }

    fn generate_data(&self) -> Result<Value, ActorError> {
        encode_data(&self.data)
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

/// Tank resource used across scenarios
pub(super) const TANK_RON: &str = r#"(
    type: "Tank",
    components: [
        (name: "TransformComponent", data: (position: (1.0, 0.0, 2.0))),
        (name: "ArmorComponent", data: (points: 100, material: "steel")),
    ],
)"#;
