//! Transform component
//!
//! Position, rotation and scale of an actor in world space. Declarative data
//! stores the rotation as Euler angles in degrees:
//!
//! ```ron
//! (name: "TransformComponent", data: (
//!     position: (0.0, 1.0, -4.0),
//!     rotation: (0.0, 90.0, 0.0),
//!     scale: (1.0, 1.0, 1.0),
//! ))
//! ```

use crate::actors::component::{decode_data, encode_data};
use crate::actors::{ActorComponent, ActorError, ComponentType, OwnerRef};
use crate::foundation::math::{utils, Mat4, Quat, Transform, Vec3};
use ron::Value;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Declarative form of a [`TransformComponent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformData {
    /// World position
    pub position: [f32; 3],
    /// Rotation in degrees about the X (pitch), Y (yaw) and Z (roll) axes
    pub rotation: [f32; 3],
    /// Scale factors
    pub scale: [f32; 3],
}

impl Default for TransformData {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// Spatial transform of an actor
#[derive(Debug, Clone, Default)]
pub struct TransformComponent {
    /// World space transform
    pub transform: Transform,
    owner: OwnerRef,
}

impl TransformComponent {
    /// Create a component from a math transform
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            owner: OwnerRef::default(),
        }
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Set world position
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// World rotation
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    /// Set world rotation
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    /// Convert to transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Overwrite position, rotation and scale from a transformation matrix
    pub fn set_from_matrix(&mut self, matrix: &Mat4) {
        self.transform = Transform::from_matrix(matrix);
    }

    fn to_data(&self) -> TransformData {
        let position = self.transform.position;
        let rotation = utils::quat_to_euler_degrees(&self.transform.rotation);
        let scale = self.transform.scale;
        TransformData {
            position: [position.x, position.y, position.z],
            rotation: [rotation.x, rotation.y, rotation.z],
            scale: [scale.x, scale.y, scale.z],
        }
    }
}

impl ActorComponent for TransformComponent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, data: &Value) -> Result<(), ActorError> {
        let data: TransformData = decode_data(Self::NAME, data)?;
        let [px, py, pz] = data.position;
        let [rx, ry, rz] = data.rotation;
        let [sx, sy, sz] = data.scale;

        self.transform = Transform {
            position: Vec3::new(px, py, pz),
            rotation: utils::quat_from_euler_degrees(Vec3::new(rx, ry, rz)),
            scale: Vec3::new(sx, sy, sz),
        };
        Ok(())
    }

    fn generate_data(&self) -> Result<Value, ActorError> {
        encode_data(&self.to_data())
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

impl ComponentType for TransformComponent {
    const NAME: &'static str = "TransformComponent";
}
