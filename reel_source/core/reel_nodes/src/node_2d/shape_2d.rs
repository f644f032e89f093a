use std::ops::{Deref, DerefMut};

use reel_structs::{Color, Vector2};

use crate::node_2d::Node2D;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    /// Centered on the node origin.
    Rectangle { size: Vector2 },
    Circle { radius: f32 },
}

impl Deref for Shape2D {
    type Target = Node2D;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for Shape2D {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

/// Filled primitive shape.
#[derive(Clone, Debug)]
pub struct Shape2D {
    pub base: Node2D,
    pub shape: ShapeKind,
    pub color: Color,
}

impl Shape2D {
    pub fn rectangle(size: Vector2, color: Color) -> Self {
        Self {
            base: Node2D::new(),
            shape: ShapeKind::Rectangle { size },
            color,
        }
    }

    pub fn circle(radius: f32, color: Color) -> Self {
        Self {
            base: Node2D::new(),
            shape: ShapeKind::Circle { radius },
            color,
        }
    }
}

impl Default for Shape2D {
    fn default() -> Self {
        Self::rectangle(Vector2::ONE, Color::WHITE)
    }
}
