use glam::Mat3;
use log::warn;
use reel_ids::TextureID;
use reel_nodes::{DrawError, DrawSurface};
use reel_structs::{Color, Rect, Vector2};

/// One recorded surface call. Primitives carry the transform that was
/// current when they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Save,
    Restore,
    SetTransform(Mat3),
    FillRect {
        rect: Rect,
        color: Color,
        transform: Mat3,
    },
    FillCircle {
        center: Vector2,
        radius: f32,
        color: Color,
        transform: Mat3,
    },
    DrawTexture {
        texture: TextureID,
        rect: Rect,
        modulate: Color,
        transform: Mat3,
    },
}

impl DrawCommand {
    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillRect { .. }
                | DrawCommand::FillCircle { .. }
                | DrawCommand::DrawTexture { .. }
        )
    }

    pub fn transform(&self) -> Option<&Mat3> {
        match self {
            DrawCommand::SetTransform(m)
            | DrawCommand::FillRect { transform: m, .. }
            | DrawCommand::FillCircle { transform: m, .. }
            | DrawCommand::DrawTexture { transform: m, .. } => Some(m),
            _ => None,
        }
    }
}

/// `DrawSurface` that keeps a log of everything drawn since the last clear.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    transform: Mat3,
    stack: Vec<Mat3>,
    unbalanced_restores: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            transform: Mat3::IDENTITY,
            stack: Vec::new(),
            unbalanced_restores: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn primitives(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| c.is_primitive())
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives().count()
    }

    /// Color of the most recent clear, if this frame has one.
    pub fn background(&self) -> Option<Color> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Clear(color) => Some(*color),
            _ => None,
        })
    }

    #[inline]
    pub fn current_transform(&self) -> Mat3 {
        self.transform
    }

    /// Saves not yet matched by a restore.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.transform);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(saved) => self.transform = saved,
            None => {
                warn!("RecordingSurface: restore without matching save");
                self.unbalanced_restores += 1;
            }
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn set_transform(&mut self, matrix: &Mat3) {
        self.transform = *matrix;
        self.commands.push(DrawCommand::SetTransform(*matrix));
    }

    /// Starts a new frame: earlier commands and saved state are discarded.
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.stack.clear();
        self.transform = Mat3::IDENTITY;
        self.unbalanced_restores = 0;
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            transform: self.transform,
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2,
        radius: f32,
        color: Color,
    ) -> Result<(), DrawError> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(DrawError::Surface(format!("invalid circle radius {radius}")));
        }
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            transform: self.transform,
        });
        Ok(())
    }

    fn draw_texture(
        &mut self,
        texture: TextureID,
        rect: Rect,
        modulate: Color,
    ) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::DrawTexture {
            texture,
            rect,
            modulate,
            transform: self.transform,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn save_restore_tracks_transform() {
        let mut surface = RecordingSurface::new();
        let moved = Mat3::from_translation(Vec2::new(10.0, 0.0));

        surface.save();
        surface.set_transform(&moved);
        surface
            .fill_rect(Rect::centered(Vector2::ONE), Color::WHITE)
            .unwrap();
        assert_eq!(surface.depth(), 1);
        surface.restore();

        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.current_transform(), Mat3::IDENTITY);
        let rect = surface.primitives().next().unwrap();
        assert_eq!(rect.transform(), Some(&moved));
    }

    #[test]
    fn clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface
            .fill_circle(Vector2::ZERO, 2.0, Color::BLACK)
            .unwrap();
        surface.clear(Color::rgb(1, 2, 3));

        assert_eq!(surface.commands(), [DrawCommand::Clear(Color::rgb(1, 2, 3))]);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.background(), Some(Color::rgb(1, 2, 3)));
        assert_eq!(surface.primitive_count(), 0);
    }

    #[test]
    fn unmatched_restore_is_counted() {
        let mut surface = RecordingSurface::new();
        surface.restore();
        assert_eq!(surface.unbalanced_restores(), 1);
        assert_eq!(surface.current_transform(), Mat3::IDENTITY);
    }

    #[test]
    fn bad_radius_is_a_surface_error() {
        let mut surface = RecordingSurface::new();
        let err = surface
            .fill_circle(Vector2::ZERO, f32::NAN, Color::WHITE)
            .unwrap_err();
        assert!(matches!(err, DrawError::Surface(_)));
        assert_eq!(surface.primitive_count(), 0);
    }

    #[test]
    fn take_commands_empties_the_log() {
        let mut surface = RecordingSurface::new();
        surface
            .draw_texture(TextureID::from_name("logo"), Rect::default(), Color::WHITE)
            .unwrap();
        let taken = surface.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(surface.commands().is_empty());
    }
}
