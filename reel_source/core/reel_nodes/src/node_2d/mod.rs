pub mod node_2d;
pub mod shape_2d;
pub mod sprite_2d;

pub use node_2d::*;
pub use shape_2d::*;
pub use sprite_2d::*;
