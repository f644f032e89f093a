use reel_ids::{NodeID, TreeID};

use crate::{SceneError, Stage};

impl Stage {
    /// Record `group` on the node, and in its tree's index if attached.
    pub fn add_to_group(&mut self, id: NodeID, group: &str) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        if !node.groups.insert(group.to_owned()) {
            return Ok(());
        }
        if let Some(state) = node.tree.and_then(|t| self.trees.get_mut(&t)) {
            state.index_group(group, id);
        }
        Ok(())
    }

    pub fn remove_from_group(&mut self, id: NodeID, group: &str) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        if !node.groups.shift_remove(group) {
            return Ok(());
        }
        if let Some(state) = node.tree.and_then(|t| self.trees.get_mut(&t)) {
            state.unindex_group(group, id);
        }
        Ok(())
    }

    pub fn is_in_group(&self, id: NodeID, group: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.is_in_group(group))
    }

    /// Snapshot of the attached members of `group`, in the order they joined.
    /// Later changes to the group do not affect the returned list.
    pub fn get_nodes_in_group(&self, tree: TreeID, group: &str) -> Result<Vec<NodeID>, SceneError> {
        let state = self.trees.get(&tree).ok_or(SceneError::TreeNotFound(tree))?;
        Ok(state
            .groups
            .get(group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default())
    }
}
