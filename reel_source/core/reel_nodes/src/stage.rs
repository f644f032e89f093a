use std::borrow::Cow;

use log::debug;
use reel_ids::{NodeID, TreeID};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{NodeArena, NodeBehavior, SceneError, SceneNode, SceneNodeData, SceneTree};

mod frame;
mod groups;
mod hierarchy;
mod lifecycle;
mod properties;
mod transforms;

/// Owner of every node and every scene tree.
///
/// Nodes are created detached. A node becomes part of a tree when a tree is
/// created with it as root, or when it is added under a node that already
/// belongs to a tree.
pub struct Stage {
    pub(crate) nodes: NodeArena,
    pub(crate) trees: FxHashMap<TreeID, SceneTree>,
    next_tree: u32,
    /// Nodes whose behavior is out running a hook, innermost last.
    running: SmallVec<[NodeID; 4]>,
    /// Lifecycle hooks that hit a node listed in `running`.
    deferred: Vec<(NodeID, LifecycleHook)>,
}

/// Enter, ready or exit transition to deliver to a behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LifecycleHook {
    Enter,
    Ready,
    Exit,
}

impl LifecycleHook {
    fn fire(self, behavior: &mut dyn NodeBehavior, stage: &mut Stage, id: NodeID) {
        match self {
            LifecycleHook::Enter => behavior.on_enter_tree(stage, id),
            LifecycleHook::Ready => behavior.on_ready(stage, id),
            LifecycleHook::Exit => behavior.on_exit_tree(stage, id),
        }
    }
}

impl Stage {
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            trees: FxHashMap::default(),
            next_tree: 1,
            running: SmallVec::new(),
            deferred: Vec::new(),
        }
    }

    pub fn create_node(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        data: impl Into<SceneNodeData>,
    ) -> NodeID {
        self.nodes.insert(SceneNode::new(name, data.into()))
    }

    pub fn create_node_with_behavior(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        data: impl Into<SceneNodeData>,
        behavior: Box<dyn NodeBehavior>,
    ) -> NodeID {
        self.nodes
            .insert(SceneNode::new(name, data.into()).with_behavior(behavior))
    }

    /// Replace the behavior of an existing node. Hooks already fired are not
    /// replayed for the new behavior.
    pub fn set_behavior(
        &mut self,
        id: NodeID,
        behavior: Box<dyn NodeBehavior>,
    ) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(SceneError::NodeNotFound(id))?;
        node.behavior = Some(behavior);
        Ok(())
    }

    #[inline]
    pub fn node(&self, id: NodeID) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    #[inline]
    pub fn contains(&self, id: NodeID) -> bool {
        self.nodes.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeID, &SceneNode)> {
        self.nodes.iter()
    }

    #[inline]
    pub fn tree(&self, tree: TreeID) -> Option<&SceneTree> {
        self.trees.get(&tree)
    }

    #[inline]
    pub fn tree_of(&self, id: NodeID) -> Option<TreeID> {
        self.nodes.get(id).and_then(SceneNode::tree)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Borrow a node's behavior as its concrete type.
    ///
    /// Returns `None` if the node is gone, has no behavior of type `T`, or
    /// the behavior is currently running one of its own hooks.
    pub fn with_behavior<T, V>(&self, id: NodeID, f: impl FnOnce(&T) -> V) -> Option<V>
    where
        T: NodeBehavior,
    {
        let behavior = self.nodes.get(id)?.behavior.as_ref()?;
        behavior.as_any().downcast_ref::<T>().map(f)
    }

    pub fn with_behavior_mut<T, V>(
        &mut self,
        id: NodeID,
        f: impl FnOnce(&mut T) -> V,
    ) -> Option<V>
    where
        T: NodeBehavior,
    {
        let behavior = self.nodes.get_mut(id)?.behavior.as_mut()?;
        behavior.as_any_mut().downcast_mut::<T>().map(f)
    }

    /// Run a hook with the behavior taken out of its node, then put it back
    /// if the node survived and was not given a new behavior meanwhile.
    ///
    /// Lifecycle transitions the hook causes on its own node are delivered
    /// once it returns, even if the node was destroyed in the meantime.
    pub(crate) fn run_hook(
        &mut self,
        id: NodeID,
        hook: impl FnOnce(&mut dyn NodeBehavior, &mut Stage),
    ) {
        let Some(mut behavior) = self.take_behavior(id) else {
            return;
        };
        self.running.push(id);
        hook(behavior.as_mut(), self);
        while let Some(pos) = self.deferred.iter().position(|(n, _)| *n == id) {
            let (_, pending) = self.deferred.remove(pos);
            pending.fire(behavior.as_mut(), self, id);
        }
        self.running.pop();
        self.restore_behavior(id, behavior);
    }

    pub(crate) fn run_lifecycle_hook(&mut self, id: NodeID, hook: LifecycleHook) {
        if self.running.contains(&id) {
            debug!("{id}: {hook:?} deferred until its running hook returns");
            self.deferred.push((id, hook));
            return;
        }
        self.run_hook(id, |b, stage| hook.fire(b, stage, id));
    }

    pub(crate) fn take_behavior(&mut self, id: NodeID) -> Option<Box<dyn NodeBehavior>> {
        self.nodes.get_mut(id)?.behavior.take()
    }

    pub(crate) fn restore_behavior(&mut self, id: NodeID, behavior: Box<dyn NodeBehavior>) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.behavior.is_none() {
                node.behavior = Some(behavior);
            }
        }
    }

    pub(crate) fn allocate_tree_id(&mut self) -> TreeID {
        let id = TreeID::new(self.next_tree);
        self.next_tree = self.next_tree.wrapping_add(1).max(1);
        id
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::rc::Rc;

    use reel_ids::NodeID;

    use crate::{NodeBehavior, SceneNodeData, Stage, behavior_any};

    pub type Log = Rc<RefCell<Vec<String>>>;

    /// Appends "<hook>:<label>" for every hook it receives.
    pub struct Recorder {
        pub label: &'static str,
        pub log: Log,
    }

    impl Recorder {
        pub fn boxed(label: &'static str, log: &Log) -> Box<dyn NodeBehavior> {
            Box::new(Recorder {
                label,
                log: Rc::clone(log),
            })
        }

        /// Plain node driven by a fresh recorder.
        pub fn attach(stage: &mut Stage, label: &'static str, log: &Log) -> NodeID {
            stage.create_node_with_behavior(label, SceneNodeData::Node, Self::boxed(label, log))
        }

        fn push(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{hook}:{}", self.label));
        }
    }

    impl NodeBehavior for Recorder {
        fn on_enter_tree(&mut self, _stage: &mut Stage, _id: NodeID) {
            self.push("enter");
        }
        fn on_ready(&mut self, _stage: &mut Stage, _id: NodeID) {
            self.push("ready");
        }
        fn on_process(&mut self, _stage: &mut Stage, _id: NodeID, _delta: f32) {
            self.push("process");
        }
        fn on_exit_tree(&mut self, _stage: &mut Stage, _id: NodeID) {
            self.push("exit");
        }
        behavior_any!();
    }

    pub fn new_log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    pub fn recorded(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    pub fn clear(log: &Log) {
        log.borrow_mut().clear();
    }
}
