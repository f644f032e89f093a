use log::debug;
use reel_ids::NodeID;
use smallvec::SmallVec;

use crate::{SceneError, Stage};

impl Stage {
    /// Append `child` to `parent`'s children.
    ///
    /// A child that already has a parent is moved. Moving within one tree
    /// fires no lifecycle hooks; moving a detached subtree under an attached
    /// parent fires enter/ready for the subtree; moving an attached subtree
    /// under a detached parent fires exit.
    pub fn add_child(&mut self, parent: NodeID, child: NodeID) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::SelfParenting(child));
        }
        let parent_node = self
            .nodes
            .get(parent)
            .ok_or(SceneError::NodeNotFound(parent))?;
        let parent_tree = parent_node.tree;
        let child_node = self
            .nodes
            .get(child)
            .ok_or(SceneError::NodeNotFound(child))?;
        let child_tree = child_node.tree;
        let old_parent = child_node.parent();

        if old_parent == Some(parent) {
            return Ok(());
        }
        if self.is_ancestor_of(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        if let Some(tree) = child_tree {
            if self.trees.get(&tree).is_some_and(|t| t.root() == child) {
                return Err(SceneError::TreeRoot { node: child, tree });
            }
            if parent_tree.is_some_and(|pt| pt != tree) {
                return Err(SceneError::AlreadyClaimed { node: child, tree });
            }
        }

        if let Some(old) = old_parent {
            self.unlink(old, child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = parent;
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        debug!("add_child: {child} under {parent}");

        match (child_tree, parent_tree) {
            (None, Some(tree)) => self.propagate_enter(child, tree),
            (Some(tree), None) => self.propagate_exit(child, tree),
            _ => {}
        }
        Ok(())
    }

    /// Detach `child` from `parent`. Returns `false` (and does nothing) if
    /// `child` is not currently a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeID, child: NodeID) -> bool {
        let Some(node) = self.nodes.get(child) else {
            return false;
        };
        if node.parent() != Some(parent) {
            return false;
        }
        let tree = node.tree;

        self.unlink(parent, child);
        debug!("remove_child: {child} from {parent}");
        if let Some(tree) = tree {
            self.propagate_exit(child, tree);
        }
        true
    }

    /// Remove every child of `parent` one at a time. Returns how many were
    /// removed.
    pub fn remove_all_children(&mut self, parent: NodeID) -> usize {
        let children: SmallVec<[NodeID; 8]> = self.children(parent).iter().copied().collect();
        children
            .into_iter()
            .filter(|&child| self.remove_child(parent, child))
            .count()
    }

    /// First child named `name`. With `recursive`, direct children are
    /// checked first, then each child's subtree depth-first in child order.
    pub fn get_child(&self, parent: NodeID, name: &str, recursive: bool) -> Option<NodeID> {
        let children = self.children(parent);
        if let Some(&found) = children
            .iter()
            .find(|&&c| self.nodes.get(c).is_some_and(|n| n.name == name))
        {
            return Some(found);
        }
        if !recursive {
            return None;
        }
        children
            .iter()
            .find_map(|&c| self.get_child(c, name, true))
    }

    #[inline]
    pub fn get_parent(&self, id: NodeID) -> Option<NodeID> {
        self.nodes.get(id)?.parent()
    }

    /// Children of `id` in insertion order; empty if the node is gone.
    #[inline]
    pub fn children(&self, id: NodeID) -> &[NodeID] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor_of(&self, ancestor: NodeID, id: NodeID) -> bool {
        let mut current = self.get_parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.get_parent(p);
        }
        false
    }

    /// Raw edge removal, no lifecycle.
    pub(crate) fn unlink(&mut self, parent: NodeID, child: NodeID) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            if node.parent == parent {
                node.parent = NodeID::nil();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::stage::test_support::*;
    use crate::{SceneError, SceneNodeData, Stage};

    #[test]
    fn add_child_links_both_ways_and_rejects_cycles() {
        let mut stage = Stage::new();
        let a = stage.create_node("a", SceneNodeData::Node);
        let b = stage.create_node("b", SceneNodeData::Node);

        stage.add_child(a, b).unwrap();
        assert_eq!(stage.get_parent(b), Some(a));
        assert!(stage.children(a).contains(&b));

        assert_eq!(
            stage.add_child(b, a),
            Err(SceneError::Cycle {
                parent: b,
                child: a
            })
        );
        assert_eq!(stage.get_parent(a), None);
    }

    #[test]
    fn deep_cycle_and_self_parenting_are_rejected() {
        let mut stage = Stage::new();
        let a = stage.create_node("a", SceneNodeData::Node);
        let b = stage.create_node("b", SceneNodeData::Node);
        let c = stage.create_node("c", SceneNodeData::Node);
        stage.add_child(a, b).unwrap();
        stage.add_child(b, c).unwrap();

        assert!(matches!(stage.add_child(c, a), Err(SceneError::Cycle { .. })));
        assert_eq!(stage.add_child(a, a), Err(SceneError::SelfParenting(a)));
        assert!(stage.is_ancestor_of(a, c));
        assert!(!stage.is_ancestor_of(c, a));
    }

    #[test]
    fn reparent_between_detached_parents() {
        let log = new_log();
        let mut stage = Stage::new();
        let p1 = stage.create_node("p1", SceneNodeData::Node);
        let p2 = stage.create_node("p2", SceneNodeData::Node);
        let c = Recorder::attach(&mut stage, "c", &log);

        stage.add_child(p1, c).unwrap();
        stage.add_child(p2, c).unwrap();

        assert!(!stage.children(p1).contains(&c));
        assert_eq!(stage.children(p2), &[c]);
        assert_eq!(stage.get_parent(c), Some(p2));
        assert!(recorded(&log).is_empty());
    }

    #[test]
    fn reparent_within_tree_fires_no_churn() {
        let log = new_log();
        let mut stage = Stage::new();
        let root = stage.create_node("root", SceneNodeData::Node);
        let p1 = stage.create_node("p1", SceneNodeData::Node);
        let p2 = stage.create_node("p2", SceneNodeData::Node);
        let c = Recorder::attach(&mut stage, "c", &log);
        stage.add_child(root, p1).unwrap();
        stage.add_child(root, p2).unwrap();
        stage.add_child(p1, c).unwrap();

        let tree = stage.create_tree(root).unwrap();
        assert_eq!(recorded(&log), ["enter:c", "ready:c"]);
        clear(&log);

        stage.add_child(p2, c).unwrap();
        assert!(recorded(&log).is_empty());
        assert_eq!(stage.tree_of(c), Some(tree));
        assert_eq!(stage.children(p2), &[c]);
    }

    #[test]
    fn re_adding_under_same_parent_is_a_no_op() {
        let mut stage = Stage::new();
        let a = stage.create_node("a", SceneNodeData::Node);
        let b = stage.create_node("b", SceneNodeData::Node);
        let c = stage.create_node("c", SceneNodeData::Node);
        stage.add_child(a, b).unwrap();
        stage.add_child(a, c).unwrap();
        stage.add_child(a, b).unwrap();
        assert_eq!(stage.children(a), &[b, c]);
    }

    #[test]
    fn remove_child_requires_actual_parent() {
        let mut stage = Stage::new();
        let a = stage.create_node("a", SceneNodeData::Node);
        let b = stage.create_node("b", SceneNodeData::Node);
        let c = stage.create_node("c", SceneNodeData::Node);
        stage.add_child(a, b).unwrap();

        assert!(!stage.remove_child(c, b));
        assert_eq!(stage.get_parent(b), Some(a));
        assert!(stage.remove_child(a, b));
        assert_eq!(stage.get_parent(b), None);
        assert!(stage.contains(b));
    }

    #[test]
    fn remove_all_children_fires_exit_for_each() {
        let log = new_log();
        let mut stage = Stage::new();
        let root = stage.create_node("root", SceneNodeData::Node);
        let a = Recorder::attach(&mut stage, "a", &log);
        let b = Recorder::attach(&mut stage, "b", &log);
        stage.add_child(root, a).unwrap();
        stage.add_child(root, b).unwrap();
        stage.create_tree(root).unwrap();
        clear(&log);

        assert_eq!(stage.remove_all_children(root), 2);
        assert_eq!(recorded(&log), ["exit:a", "exit:b"]);
        assert!(stage.children(root).is_empty());
        assert_eq!(stage.tree_of(a), None);
    }

    #[test]
    fn get_child_prefers_direct_children() {
        let mut stage = Stage::new();
        let root = stage.create_node("root", SceneNodeData::Node);
        let a = stage.create_node("a", SceneNodeData::Node);
        let deep = stage.create_node("target", SceneNodeData::Node);
        let direct = stage.create_node("target", SceneNodeData::Node);
        stage.add_child(root, a).unwrap();
        stage.add_child(a, deep).unwrap();
        stage.add_child(root, direct).unwrap();

        assert_eq!(stage.get_child(root, "target", false), Some(direct));
        assert_eq!(stage.get_child(root, "target", true), Some(direct));
        assert_eq!(stage.get_child(a, "target", false), Some(deep));
        assert_eq!(stage.get_child(root, "missing", true), None);

        let only_deep = stage.create_node("other", SceneNodeData::Node);
        stage.add_child(deep, only_deep).unwrap();
        assert_eq!(stage.get_child(root, "other", false), None);
        assert_eq!(stage.get_child(root, "other", true), Some(only_deep));
    }

    #[test]
    fn tree_root_cannot_be_parented() {
        let mut stage = Stage::new();
        let root = stage.create_node("root", SceneNodeData::Node);
        let other = stage.create_node("other", SceneNodeData::Node);
        let tree = stage.create_tree(root).unwrap();

        assert_eq!(
            stage.add_child(other, root),
            Err(SceneError::TreeRoot { node: root, tree })
        );
    }

    #[test]
    fn node_claimed_by_another_tree_is_rejected() {
        let mut stage = Stage::new();
        let r1 = stage.create_node("r1", SceneNodeData::Node);
        let r2 = stage.create_node("r2", SceneNodeData::Node);
        let c = stage.create_node("c", SceneNodeData::Node);
        stage.add_child(r1, c).unwrap();
        let t1 = stage.create_tree(r1).unwrap();
        stage.create_tree(r2).unwrap();

        assert_eq!(
            stage.add_child(r2, c),
            Err(SceneError::AlreadyClaimed { node: c, tree: t1 })
        );
        assert_eq!(stage.get_parent(c), Some(r1));
    }

    #[test]
    fn moving_attached_subtree_to_detached_parent_exits() {
        let log = new_log();
        let mut stage = Stage::new();
        let root = stage.create_node("root", SceneNodeData::Node);
        let loose = stage.create_node("loose", SceneNodeData::Node);
        let c = Recorder::attach(&mut stage, "c", &log);
        stage.add_child(root, c).unwrap();
        stage.create_tree(root).unwrap();
        clear(&log);

        stage.add_child(loose, c).unwrap();
        assert_eq!(recorded(&log), ["exit:c"]);
        assert_eq!(stage.tree_of(c), None);
        assert_eq!(stage.get_parent(c), Some(loose));
    }
}
