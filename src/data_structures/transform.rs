//! Local transformation data for scene nodes.
//!
//! A [`Transform`] is the decomposed form (position, rotation, scale) that
//! scene code edits directly. The scene graph composes transforms into world
//! matrices and decomposes matrices back when a node changes parent.

use cgmath::{InnerSpace, Matrix3, Matrix4, One, Quaternion, Rad, Rotation3, SquareMatrix, Vector3};

/// Position, rotation (as quaternion) and scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::new()
        }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Sets the rotation from euler angles applied in Y, X, Z order.
    pub fn with_euler(mut self, x: Rad<f32>, y: Rad<f32>, z: Rad<f32>) -> Self {
        self.rotation = euler_yxz(x, y, z);
        self
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Splits an affine matrix without shear back into translation, rotation and scale.
    pub fn from_matrix(m: Matrix4<f32>) -> Self {
        let x = m.x.truncate();
        let y = m.y.truncate();
        let z = m.z.truncate();
        let mut scale = Vector3::new(x.magnitude(), y.magnitude(), z.magnitude());
        // A negative determinant means one axis is mirrored; fold it into x.
        if Matrix3::from_cols(x, y, z).determinant() < 0.0 {
            scale.x = -scale.x;
        }
        let rotation = if scale.x == 0.0 || scale.y == 0.0 || scale.z == 0.0 {
            Quaternion::one()
        } else {
            Quaternion::from(Matrix3::from_cols(x / scale.x, y / scale.y, z / scale.z)).normalize()
        };
        Self {
            position: m.w.truncate(),
            rotation,
            scale,
        }
    }
}

/// Rotation matching the usual engine convention of yaw (Y), then pitch (X), then roll (Z).
pub fn euler_yxz(x: Rad<f32>, y: Rad<f32>, z: Rad<f32>) -> Quaternion<f32> {
    Quaternion::from_angle_y(y) * Quaternion::from_angle_x(x) * Quaternion::from_angle_z(z)
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
