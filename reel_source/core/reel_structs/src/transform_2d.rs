use glam::{Mat3, Vec2};
use serde::{Deserialize, Serialize};

use crate::Vector2;

fn default_position() -> Vector2 {
    Vector2::ZERO
}
fn is_default_position(v: &Vector2) -> bool {
    *v == default_position()
}

fn default_rotation() -> f32 {
    0.0
}
fn is_default_rotation(v: &f32) -> bool {
    *v == default_rotation()
}

fn default_scale() -> Vector2 {
    Vector2::ONE
}
fn is_default_scale(v: &Vector2) -> bool {
    *v == default_scale()
}

/// Local position / rotation / scale of a 2D node.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub struct Transform2D {
    #[serde(
        default = "default_position",
        skip_serializing_if = "is_default_position"
    )]
    pub position: Vector2,

    #[serde(default = "default_scale", skip_serializing_if = "is_default_scale")]
    pub scale: Vector2,

    #[serde(
        default = "default_rotation",
        skip_serializing_if = "is_default_rotation"
    )]
    pub rotation: f32, // degrees
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        position: Vector2::ZERO,
        scale: Vector2::ONE,
        rotation: 0.0,
    };

    #[inline]
    pub const fn new(position: Vector2, rotation: f32, scale: Vector2) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        is_default_position(&self.position)
            && is_default_rotation(&self.rotation)
            && is_default_scale(&self.scale)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ============================================================================
// Matrix Operations
// ============================================================================

impl Transform2D {
    /// Local matrix: a point is scaled, then rotated, then translated.
    /// Composition order is fixed; swapping it changes results whenever
    /// rotation is combined with non-uniform scale.
    #[inline]
    pub fn to_mat3(&self) -> Mat3 {
        let t = Mat3::from_translation(self.position.into());
        let r = Mat3::from_angle(self.rotation.to_radians());
        let s = Mat3::from_scale(self.scale.into());
        t * r * s
    }

    /// Decompose an affine matrix back into position / rotation / scale.
    ///
    /// Scale is the length of each basis column and rotation is read from the
    /// x basis only, so a matrix carrying shear (rotation combined with
    /// non-uniform scale further up a hierarchy) decomposes approximately.
    #[inline]
    pub fn from_mat3(mat: Mat3) -> Self {
        let x_axis = Vec2::new(mat.x_axis.x, mat.x_axis.y);
        let y_axis = Vec2::new(mat.y_axis.x, mat.y_axis.y);

        let scale_x = x_axis.length();
        let scale_y = y_axis.length();

        // rotation is undefined for a collapsed basis
        let rotation = if scale_x > 0.0001 {
            x_axis.y.atan2(x_axis.x).to_degrees()
        } else {
            0.0
        };

        Self {
            position: Vector2::new(mat.z_axis.x, mat.z_axis.y),
            scale: Vector2::new(scale_x, scale_y),
            rotation,
        }
    }

    /// Global matrix of a child under `parent_global`: parent · local.
    #[inline]
    pub fn compose(parent_global: &Mat3, local: &Transform2D) -> Mat3 {
        *parent_global * local.to_mat3()
    }

    #[inline]
    pub fn transform_point(&self, point: Vector2) -> Vector2 {
        self.to_mat3().transform_point2(point.into()).into()
    }

    #[inline]
    pub fn lerp(&self, other: &Transform2D, t: f32) -> Transform2D {
        Transform2D {
            position: Vector2::lerp(self.position, other.position, t),
            scale: Vector2::lerp(self.scale, other.scale, t),
            rotation: self.rotation + (other.rotation - self.rotation) * t,
        }
    }
}
