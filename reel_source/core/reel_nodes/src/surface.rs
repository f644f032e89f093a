use std::ops::{Deref, DerefMut};

use glam::Mat3;
use reel_ids::TextureID;
use reel_structs::{Color, Rect, Vector2};

use crate::DrawError;

/// Drawing primitives supplied by the caller. The scene graph never looks at
/// pixels; it only sets transforms and forwards draw calls.
pub trait DrawSurface {
    /// Push the current transform state.
    fn save(&mut self);

    /// Pop the state pushed by the matching `save`.
    fn restore(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, matrix: &Mat3);

    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError>;

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color)
    -> Result<(), DrawError>;

    fn draw_texture(
        &mut self,
        texture: TextureID,
        rect: Rect,
        modulate: Color,
    ) -> Result<(), DrawError>;
}

/// Saves the surface on creation and restores it on drop, so the restore runs
/// on every exit path including `?` returns and unwinding.
pub struct SurfaceScope<'a> {
    surface: &'a mut dyn DrawSurface,
}

impl<'a> SurfaceScope<'a> {
    pub fn new(surface: &'a mut dyn DrawSurface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<'a> Deref for SurfaceScope<'a> {
    type Target = dyn DrawSurface + 'a;
    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for SurfaceScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for SurfaceScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
