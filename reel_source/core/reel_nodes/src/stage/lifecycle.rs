use log::{debug, warn};
use reel_ids::{NodeID, TreeID};
use smallvec::SmallVec;

use crate::stage::LifecycleHook;
use crate::{NodeLifecycle, SceneError, SceneTree, Stage};

type ChildSnapshot = SmallVec<[NodeID; 8]>;

impl Stage {
    /// Start a new scene tree rooted at `root` and fire enter/ready for the
    /// whole subtree.
    pub fn create_tree(&mut self, root: NodeID) -> Result<TreeID, SceneError> {
        let node = self.nodes.get(root).ok_or(SceneError::NodeNotFound(root))?;
        if let Some(tree) = node.tree {
            return Err(SceneError::AlreadyClaimed { node: root, tree });
        }
        if node.parent().is_some() {
            return Err(SceneError::RootHasParent(root));
        }

        let id = self.allocate_tree_id();
        self.trees.insert(id, SceneTree::new(id, root));
        debug!("tree {id} created with root {root}");
        self.propagate_enter(root, id);
        Ok(id)
    }

    /// End a tree: fire exit for its nodes and forget its state. Pending
    /// frees are dropped, the nodes stay alive and detached.
    pub fn release_tree(&mut self, tree: TreeID) -> Result<(), SceneError> {
        let state = self.trees.get(&tree).ok_or(SceneError::TreeNotFound(tree))?;
        if state.processing {
            warn!("release_tree({tree}) called during its own frame; ignored");
            return Ok(());
        }
        let root = state.root();
        if !state.root_freed && self.nodes.get(root).is_some_and(|n| n.tree == Some(tree)) {
            self.propagate_exit(root, tree);
        }
        self.trees.remove(&tree);
        debug!("tree {tree} released");
        Ok(())
    }

    /// Ask for `id` to be destroyed at the end of its tree's next logic pass.
    /// A node outside any tree has no frame to wait for and is freed now.
    pub fn queue_free(&mut self, id: NodeID) {
        let Some(node) = self.nodes.get(id) else {
            warn!("queue_free({id}): node does not exist");
            return;
        };
        let Some(tree) = node.tree else {
            self.free(id);
            return;
        };
        let Some(state) = self.trees.get_mut(&tree) else {
            warn!("queue_free({id}): tree {tree} is gone");
            return;
        };
        if !state.free_queue.insert(id) {
            warn!("queue_free({id}): already queued");
        }
    }

    pub fn is_queued_for_free(&self, id: NodeID) -> bool {
        self.tree_of(id)
            .and_then(|tree| self.trees.get(&tree))
            .is_some_and(|t| t.free_queue.contains(&id))
    }

    /// Detach and destroy `id` and its subtree right away. Freeing a tree
    /// root ends that tree (see `FrameStatus::RootFreed`).
    pub fn free(&mut self, id: NodeID) -> bool {
        let Some(node) = self.nodes.get(id) else {
            warn!("free({id}): node does not exist");
            return false;
        };
        let tree = node.tree;

        if let Some(parent) = node.parent() {
            self.remove_child(parent, id);
        } else if let Some(tree) = tree {
            self.free_root(tree, id);
        }
        self.destroy_subtree(id);
        true
    }

    /// Exit the whole tree and mark it as root-less. The caller destroys
    /// the nodes.
    pub(crate) fn free_root(&mut self, tree: TreeID, root: NodeID) {
        warn!("root {root} of tree {tree} freed; the tree is now empty");
        self.propagate_exit(root, tree);
        if let Some(state) = self.trees.get_mut(&tree) {
            state.root_freed = true;
            state.free_queue.clear();
        }
    }

    /// Remove `id` and all of its descendants from the arena. No hooks run.
    pub(crate) fn destroy_subtree(&mut self, id: NodeID) {
        if let Some(parent) = self.get_parent(id) {
            self.unlink(parent, id);
        }
        let mut stack: ChildSnapshot = SmallVec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children.iter().copied());
            }
        }
        debug!("destroyed subtree at {id}");
    }

    /// Enter `id`'s subtree into `tree`: enter hooks pre-order, then ready
    /// hooks post-order once the whole subtree is in.
    pub(crate) fn propagate_enter(&mut self, id: NodeID, tree: TreeID) {
        self.enter_recursive(id, tree);
        self.ready_recursive(id, tree);
    }

    fn enter_recursive(&mut self, id: NodeID, tree: TreeID) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.tree = Some(tree);
        node.lifecycle = NodeLifecycle::Entering;
        if let Some(state) = self.trees.get_mut(&tree) {
            for group in node.groups.iter() {
                state.index_group(group, id);
            }
        }
        debug!("{id} entering tree {tree}");

        self.run_lifecycle_hook(id, LifecycleHook::Enter);

        // children the hook attached itself were entered by `add_child`
        for child in self.child_snapshot(id) {
            if self.get_parent(child) == Some(id) && self.tree_of(child) != Some(tree) {
                self.enter_recursive(child, tree);
            }
        }
    }

    fn ready_recursive(&mut self, id: NodeID, tree: TreeID) {
        for child in self.child_snapshot(id) {
            if self.tree_of(child) == Some(tree) {
                self.ready_recursive(child, tree);
            }
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.tree != Some(tree) || node.lifecycle != NodeLifecycle::Entering {
            return;
        }
        node.lifecycle = NodeLifecycle::Attached;
        self.run_lifecycle_hook(id, LifecycleHook::Ready);
    }

    /// Exit `id`'s subtree from `tree`, children before parents. Each node's
    /// groups are unindexed and its tree reference cleared after its hook.
    pub(crate) fn propagate_exit(&mut self, id: NodeID, tree: TreeID) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.tree != Some(tree) {
            return;
        }
        node.lifecycle = NodeLifecycle::Exiting;

        for child in self.child_snapshot(id) {
            self.propagate_exit(child, tree);
        }

        self.run_lifecycle_hook(id, LifecycleHook::Exit);

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if let Some(state) = self.trees.get_mut(&tree) {
            for group in node.groups.iter() {
                state.unindex_group(group, id);
            }
        }
        node.tree = None;
        node.lifecycle = NodeLifecycle::Detached;
        debug!("{id} exited tree {tree}");
    }

    pub(crate) fn child_snapshot(&self, id: NodeID) -> ChildSnapshot {
        self.children(id).iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use reel_ids::NodeID;

    use crate::stage::test_support::*;
    use crate::{NodeBehavior, NodeLifecycle, SceneError, SceneNodeData, Stage, behavior_any};

    /// Creates and attaches a recorded child from its own enter hook.
    struct SpawnOnEnter {
        log: Log,
        spawned: Option<NodeID>,
    }

    impl NodeBehavior for SpawnOnEnter {
        fn on_enter_tree(&mut self, stage: &mut Stage, id: NodeID) {
            let child = stage.create_node_with_behavior(
                "c",
                SceneNodeData::Node,
                Recorder::boxed("c", &self.log),
            );
            stage.add_child(id, child).unwrap();
            self.spawned = Some(child);
        }
        behavior_any!();
    }

    fn build(stage: &mut Stage, log: &Log) -> [reel_ids::NodeID; 4] {
        // root -> (a -> a1), b
        let root = Recorder::attach(stage, "root", log);
        let a = Recorder::attach(stage, "a", log);
        let a1 = Recorder::attach(stage, "a1", log);
        let b = Recorder::attach(stage, "b", log);
        stage.add_child(root, a).unwrap();
        stage.add_child(a, a1).unwrap();
        stage.add_child(root, b).unwrap();
        [root, a, a1, b]
    }

    #[test]
    fn enter_is_pre_order_and_ready_is_post_order() {
        let log = new_log();
        let mut stage = Stage::new();
        let [root, a, a1, b] = build(&mut stage, &log);

        let tree = stage.create_tree(root).unwrap();
        assert_eq!(
            recorded(&log),
            [
                "enter:root",
                "enter:a",
                "enter:a1",
                "enter:b",
                "ready:a1",
                "ready:a",
                "ready:b",
                "ready:root",
            ]
        );
        for id in [root, a, a1, b] {
            assert_eq!(stage.tree_of(id), Some(tree));
            assert_eq!(stage.node(id).unwrap().lifecycle(), NodeLifecycle::Attached);
        }
    }

    #[test]
    fn exit_is_post_order_and_clears_tree() {
        let log = new_log();
        let mut stage = Stage::new();
        let [root, a, a1, _b] = build(&mut stage, &log);
        stage.create_tree(root).unwrap();
        clear(&log);

        stage.remove_child(root, a);
        assert_eq!(recorded(&log), ["exit:a1", "exit:a"]);
        assert_eq!(stage.tree_of(a), None);
        assert_eq!(stage.tree_of(a1), None);
        assert_eq!(stage.node(a1).unwrap().lifecycle(), NodeLifecycle::Detached);
    }

    #[test]
    fn attaching_detached_subtree_enters_it() {
        let log = new_log();
        let mut stage = Stage::new();
        let root = stage.create_node("root", SceneNodeData::Node);
        let tree = stage.create_tree(root).unwrap();

        let p = Recorder::attach(&mut stage, "p", &log);
        let c = Recorder::attach(&mut stage, "c", &log);
        stage.add_child(p, c).unwrap();
        assert!(recorded(&log).is_empty());

        stage.add_child(root, p).unwrap();
        assert_eq!(recorded(&log), ["enter:p", "enter:c", "ready:c", "ready:p"]);
        assert_eq!(stage.tree_of(c), Some(tree));
    }

    #[test]
    fn child_added_by_enter_hook_enters_once() {
        let log = new_log();
        let mut stage = Stage::new();
        let root = stage.create_node_with_behavior(
            "root",
            SceneNodeData::Node,
            Box::new(SpawnOnEnter {
                log: log.clone(),
                spawned: None,
            }),
        );

        let tree = stage.create_tree(root).unwrap();
        assert_eq!(recorded(&log), ["enter:c", "ready:c"]);

        let child = stage
            .with_behavior::<SpawnOnEnter, _>(root, |s| s.spawned)
            .flatten()
            .unwrap();
        assert_eq!(stage.children(root), &[child]);
        assert_eq!(stage.tree_of(child), Some(tree));
        assert_eq!(stage.node(child).unwrap().lifecycle(), NodeLifecycle::Attached);
        assert_eq!(stage.node(root).unwrap().lifecycle(), NodeLifecycle::Attached);
    }

    #[test]
    fn tree_creation_errors() {
        let mut stage = Stage::new();
        let root = stage.create_node("root", SceneNodeData::Node);
        let child = stage.create_node("child", SceneNodeData::Node);
        stage.add_child(root, child).unwrap();
        let tree = stage.create_tree(root).unwrap();

        assert_eq!(
            stage.create_tree(root),
            Err(SceneError::AlreadyClaimed { node: root, tree })
        );
        assert_eq!(
            stage.create_tree(child),
            Err(SceneError::AlreadyClaimed { node: child, tree })
        );

        let loose = stage.create_node("loose", SceneNodeData::Node);
        let loose_child = stage.create_node("loose_child", SceneNodeData::Node);
        stage.add_child(loose, loose_child).unwrap();
        assert_eq!(
            stage.create_tree(loose_child),
            Err(SceneError::RootHasParent(loose_child))
        );
    }

    #[test]
    fn release_tree_exits_and_allows_reuse() {
        let log = new_log();
        let mut stage = Stage::new();
        let [root, ..] = build(&mut stage, &log);
        let tree = stage.create_tree(root).unwrap();
        clear(&log);

        stage.release_tree(tree).unwrap();
        assert_eq!(recorded(&log), ["exit:a1", "exit:a", "exit:b", "exit:root"]);
        assert_eq!(stage.tree_of(root), None);
        assert_eq!(stage.release_tree(tree), Err(SceneError::TreeNotFound(tree)));

        clear(&log);
        stage.create_tree(root).unwrap();
        assert_eq!(recorded(&log).len(), 8);
    }

    #[test]
    fn free_destroys_subtree_immediately() {
        let log = new_log();
        let mut stage = Stage::new();
        let [root, a, a1, b] = build(&mut stage, &log);
        stage.create_tree(root).unwrap();
        clear(&log);

        assert!(stage.free(a));
        assert_eq!(recorded(&log), ["exit:a1", "exit:a"]);
        assert!(!stage.contains(a));
        assert!(!stage.contains(a1));
        assert_eq!(stage.children(root), &[b]);
        assert!(!stage.free(a));
    }

    #[test]
    fn queue_free_outside_a_tree_frees_now() {
        let mut stage = Stage::new();
        let a = stage.create_node("a", SceneNodeData::Node);
        let b = stage.create_node("b", SceneNodeData::Node);
        stage.add_child(a, b).unwrap();

        stage.queue_free(a);
        assert!(!stage.contains(a));
        assert!(!stage.contains(b));
        // second request is a logged no-op
        stage.queue_free(a);
    }
}
