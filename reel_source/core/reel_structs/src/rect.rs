use serde::{Deserialize, Serialize};

use crate::Vector2;

/// Axis-aligned rectangle in a node's local space.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub position: Vector2,
    pub size: Vector2,
}

impl Rect {
    pub const fn new(position: Vector2, size: Vector2) -> Self {
        Self { position, size }
    }

    /// Rectangle of `size` centered on the origin.
    pub fn centered(size: Vector2) -> Self {
        Self::new(size * -0.5, size)
    }

    pub fn center(&self) -> Vector2 {
        self.position + self.size * 0.5
    }
}
