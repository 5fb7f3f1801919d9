//! Math utilities and types
//!
//! Provides fundamental math types for 3D game development.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Integer 2D vector type
pub type Vec2i = Vector2<i32>;

/// Integer 3D vector type
pub type Vec3i = Vector3<i32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,
    
    /// Rotation quaternion
    pub rotation: Quat,
    
    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }
    
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
    
    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
    
    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
    
    /// Create a transform from a transformation matrix
    ///
    /// Assumes the matrix holds no shear. A single zero scale axis is
    /// rebuilt from the other two; with more than one the rotation is identity.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);

        // Column lengths are the scale factors
        let columns = [
            Vec3::new(matrix.m11, matrix.m21, matrix.m31),
            Vec3::new(matrix.m12, matrix.m22, matrix.m32),
            Vec3::new(matrix.m13, matrix.m23, matrix.m33),
        ];
        let scale = Vec3::new(columns[0].magnitude(), columns[1].magnitude(), columns[2].magnitude());

        let rotation = match columns.map(|column| column.try_normalize(f32::EPSILON)) {
            [Some(x), Some(y), Some(z)] => Quat::from_matrix(&Mat3::from_columns(&[x, y, z])),
            [None, Some(y), Some(z)] => Quat::from_matrix(&Mat3::from_columns(&[y.cross(&z), y, z])),
            [Some(x), None, Some(z)] => Quat::from_matrix(&Mat3::from_columns(&[x, z.cross(&x), z])),
            [Some(x), Some(y), None] => Quat::from_matrix(&Mat3::from_columns(&[x, y, x.cross(&y)])),
            _ => Quat::identity(),
        };

        Self {
            position,
            rotation,
            scale,
        }
    }
    
    /// Combine this transform with a child transform
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
    
    /// Get the inverse transform
    pub fn inverse(&self) -> Self {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation * (-self.position.component_mul(&inv_scale));
        
        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;
    
    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
    
    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
    
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    
    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};
    
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
    
    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
    
    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }
    
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
    
    /// Build a rotation from Euler angles in degrees about the X, Y and Z axes
    pub fn quat_from_euler_degrees(angles: Vec3) -> Quat {
        Quat::from_euler_angles(
            deg_to_rad(angles.x),
            deg_to_rad(angles.y),
            deg_to_rad(angles.z),
        )
    }
    
    /// Decompose a rotation into Euler angles in degrees about the X, Y and Z axes
    pub fn quat_to_euler_degrees(rotation: &Quat) -> Vec3 {
        let (x, y, z) = rotation.euler_angles();
        Vec3::new(rad_to_deg(x), rad_to_deg(y), rad_to_deg(z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    
    #[test]
    fn test_matrix_roundtrip() {
        let original = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_axis_angle(&Unit::new_normalize(Vec3::new(1.0, 1.0, 1.0)), 0.5),
            scale: Vec3::new(2.0, 1.5, 0.8),
        };
        
        let reconstructed = Transform::from_matrix(&original.to_matrix());
        
        assert_relative_eq!(reconstructed.position, original.position, epsilon = 1e-5);
        assert_relative_eq!(reconstructed.scale, original.scale, epsilon = 1e-5);
        
        // Quaternions might flip sign but represent same rotation
        let dot = original.rotation.coords.dot(&reconstructed.rotation.coords);
        assert!(dot.abs() > 0.999, "Quaternion rotation mismatch: dot product = {}", dot);
    }
    
    #[test]
    fn test_zero_scale_axis_keeps_rotation() {
        let original = Transform {
            position: Vec3::new(0.0, 1.0, 0.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), 0.785),
            scale: Vec3::new(1.0, 0.0, 2.0),
        };

        let reconstructed = Transform::from_matrix(&original.to_matrix());

        assert!(reconstructed.rotation.coords.iter().all(|c| c.is_finite()));
        assert_relative_eq!(reconstructed.scale, original.scale, epsilon = 1e-5);
        let dot = original.rotation.coords.dot(&reconstructed.rotation.coords);
        assert!(dot.abs() > 0.999, "Quaternion rotation mismatch: dot product = {}", dot);

        let collapsed = Transform::from_matrix(&Mat4::zeros());
        assert_eq!(collapsed.rotation, Quat::identity());
        assert_eq!(collapsed.scale, Vec3::zeros());
    }

    #[test]
    fn test_combine_with_inverse_is_identity() {
        let transform = Transform {
            position: Vec3::new(2.0, 3.0, 1.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), 0.785),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        
        let identity = transform.combine(&transform.inverse());
        
        assert_relative_eq!(identity.position, Vec3::zeros(), epsilon = 1e-5);
        assert_relative_eq!(identity.scale, Vec3::new(1.0, 1.0, 1.0), epsilon = 1e-5);
    }
    
    #[test]
    fn test_child_transform_combination() {
        let parent = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), constants::HALF_PI),
            ..Default::default()
        };
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 1.0));
        
        let combined = parent.combine(&child);
        
        assert_relative_eq!(combined.position, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
    }
    
    #[test]
    fn test_euler_degrees_roundtrip() {
        let angles = Vec3::new(10.0, 45.0, -30.0);
        let rotation = utils::quat_from_euler_degrees(angles);
        
        assert_relative_eq!(utils::quat_to_euler_degrees(&rotation), angles, epsilon = 1e-3);
    }
    
    #[test]
    fn test_scalar_helpers() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(utils::rad_to_deg(constants::HALF_PI), 90.0, epsilon = 1e-4);
        assert_eq!(utils::clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(utils::clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(utils::lerp(0.0, 10.0, 0.25), 2.5);
    }
}
