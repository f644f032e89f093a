use std::borrow::Cow;
use std::fmt;

use indexmap::IndexSet;
use reel_ids::{NodeID, TreeID};

use crate::behavior::NodeBehavior;
use crate::node_2d::{Node2D, Shape2D, Sprite2D};

/// Closed set of built-in node kinds.
#[derive(Clone, Debug)]
pub enum SceneNodeData {
    Node,
    Node2D(Node2D),
    Sprite2D(Sprite2D),
    Shape2D(Shape2D),
}

impl SceneNodeData {
    pub const fn type_name(&self) -> &'static str {
        match self {
            SceneNodeData::Node => "Node",
            SceneNodeData::Node2D(_) => "Node2D",
            SceneNodeData::Sprite2D(_) => "Sprite2D",
            SceneNodeData::Shape2D(_) => "Shape2D",
        }
    }

    /// The transform-capable part of this node, if any.
    #[inline]
    pub fn as_node2d(&self) -> Option<&Node2D> {
        match self {
            SceneNodeData::Node => None,
            SceneNodeData::Node2D(n) => Some(n),
            SceneNodeData::Sprite2D(s) => Some(&s.base),
            SceneNodeData::Shape2D(s) => Some(&s.base),
        }
    }

    #[inline]
    pub fn as_node2d_mut(&mut self) -> Option<&mut Node2D> {
        match self {
            SceneNodeData::Node => None,
            SceneNodeData::Node2D(n) => Some(n),
            SceneNodeData::Sprite2D(s) => Some(&mut s.base),
            SceneNodeData::Shape2D(s) => Some(&mut s.base),
        }
    }

    #[inline]
    pub fn is_2d(&self) -> bool {
        self.as_node2d().is_some()
    }
}

impl Default for SceneNodeData {
    fn default() -> Self {
        SceneNodeData::Node
    }
}

impl From<Node2D> for SceneNodeData {
    fn from(n: Node2D) -> Self {
        SceneNodeData::Node2D(n)
    }
}
impl From<Sprite2D> for SceneNodeData {
    fn from(s: Sprite2D) -> Self {
        SceneNodeData::Sprite2D(s)
    }
}
impl From<Shape2D> for SceneNodeData {
    fn from(s: Shape2D) -> Self {
        SceneNodeData::Shape2D(s)
    }
}

/// Where a node is in the tree-membership state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeLifecycle {
    #[default]
    Detached,
    Entering,
    Attached,
    Exiting,
}

/// A node stored in the arena. Hierarchy links and tree membership are
/// maintained by the `Stage`; only the name and kind data are freely mutable.
pub struct SceneNode {
    pub id: NodeID,
    pub name: Cow<'static, str>,
    pub data: SceneNodeData,

    pub(crate) parent: NodeID,
    pub(crate) children: Vec<NodeID>,
    pub(crate) groups: IndexSet<String>,
    pub(crate) tree: Option<TreeID>,
    pub(crate) lifecycle: NodeLifecycle,
    pub(crate) behavior: Option<Box<dyn NodeBehavior>>,
}

impl SceneNode {
    pub fn new(name: impl Into<Cow<'static, str>>, data: SceneNodeData) -> Self {
        Self {
            id: NodeID::nil(),
            name: name.into(),
            data,
            parent: NodeID::nil(),
            children: Vec::new(),
            groups: IndexSet::new(),
            tree: None,
            lifecycle: NodeLifecycle::Detached,
            behavior: None,
        }
    }

    pub fn with_behavior(mut self, behavior: Box<dyn NodeBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    #[inline]
    pub fn node_type(&self) -> &'static str {
        self.data.type_name()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeID> {
        if self.parent.is_nil() {
            None
        } else {
            Some(self.parent)
        }
    }

    #[inline]
    pub fn children(&self) -> &[NodeID] {
        &self.children
    }

    #[inline]
    pub fn tree(&self) -> Option<TreeID> {
        self.tree
    }

    #[inline]
    pub fn lifecycle(&self) -> NodeLifecycle {
        self.lifecycle
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }

    pub fn is_in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("data", &self.data)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("groups", &self.groups)
            .field("tree", &self.tree)
            .field("lifecycle", &self.lifecycle)
            .field("behavior", &self.behavior.is_some())
            .finish()
    }
}
