pub mod color;
pub mod rect;
pub mod transform_2d;
pub mod variant;
pub mod vector2;

pub use color::Color;
pub use rect::Rect;
pub use transform_2d::Transform2D;
pub use variant::{Variant, VariantKind};
pub use vector2::Vector2;
