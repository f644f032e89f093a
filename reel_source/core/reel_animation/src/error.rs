use reel_ids::NodeID;
use reel_nodes::{PropertyError, SceneError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error("node {0} is not a tween")]
    NotATween(NodeID),
}
