use std::ops::{Deref, DerefMut};

use reel_ids::TextureID;
use reel_structs::{Color, Rect, Vector2};

use crate::node_2d::Node2D;

impl Deref for Sprite2D {
    type Target = Node2D;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for Sprite2D {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

/// Textured quad. Pixels come from the external texture loader; the scene
/// graph only forwards the handle to the drawing surface.
#[derive(Clone, Debug)]
pub struct Sprite2D {
    pub base: Node2D,
    pub texture: TextureID,
    pub size: Vector2,
    pub modulate: Color,
    pub centered: bool,
}

impl Sprite2D {
    pub fn new(texture: TextureID, size: Vector2) -> Self {
        Self {
            base: Node2D::new(),
            texture,
            size,
            modulate: Color::WHITE,
            centered: true,
        }
    }

    /// Destination rectangle in local space.
    pub fn rect(&self) -> Rect {
        if self.centered {
            Rect::centered(self.size)
        } else {
            Rect::new(Vector2::ZERO, self.size)
        }
    }
}

impl Default for Sprite2D {
    fn default() -> Self {
        Self::new(TextureID::nil(), Vector2::ZERO)
    }
}
