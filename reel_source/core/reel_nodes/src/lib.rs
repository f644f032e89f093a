mod behavior;
mod error;
mod node_arena;
mod property;
mod scene_node;
mod scene_tree;
mod stage;
mod surface;

pub mod node_2d;

pub use behavior::NodeBehavior;
pub use error::{DrawError, PropertyError, SceneError};
pub use node_2d::{Node2D, Shape2D, ShapeKind, Sprite2D};
pub use node_arena::NodeArena;
pub use property::{NodeProperty, PropertyAccess};
pub use scene_node::{NodeLifecycle, SceneNode, SceneNodeData};
pub use scene_tree::{FrameStatus, SceneTree};
pub use stage::Stage;
pub use surface::{DrawSurface, SurfaceScope};

pub use reel_ids::{NodeID, TextureID, TreeID};
