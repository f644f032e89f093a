use reel_ids::{NodeID, TreeID};
use reel_structs::VariantKind;
use thiserror::Error;

/// Structural errors. Returning one of these means the operation was
/// refused and the hierarchy is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeID),

    #[error("scene tree {0} does not exist")]
    TreeNotFound(TreeID),

    #[error("node {0} cannot be its own child")]
    SelfParenting(NodeID),

    #[error("adding {child} under {parent} would create a cycle")]
    Cycle { parent: NodeID, child: NodeID },

    #[error("node {node} is already claimed by scene tree {tree}")]
    AlreadyClaimed { node: NodeID, tree: TreeID },

    #[error("node {node} is the root of scene tree {tree} and cannot be parented")]
    TreeRoot { node: NodeID, tree: TreeID },

    #[error("node {0} has a parent and cannot become a tree root")]
    RootHasParent(NodeID),
}

/// Property binding and access errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("unknown property '{0}'")]
    Unknown(String),

    #[error("property not readable: '{0}'")]
    NotReadable(String),

    #[error("property not writable: '{0}'")]
    NotWritable(String),

    #[error("property '{property}' expects {expected}, got {found}")]
    TypeMismatch {
        property: String,
        expected: VariantKind,
        found: VariantKind,
    },

    #[error("target of property '{0}' no longer exists")]
    TargetDropped(String),

    #[error("node {0} does not exist")]
    NodeNotFound(NodeID),

    #[error("property '{property}' failed: {reason}")]
    Accessor { property: String, reason: String },
}

/// Errors raised while drawing a frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("node {node} failed to draw: {reason}")]
    Node { node: NodeID, reason: String },
}
