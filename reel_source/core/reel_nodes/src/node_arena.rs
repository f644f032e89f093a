use reel_ids::NodeID;

use crate::SceneNode;

/// Generational slot storage for every node of a `Stage`, attached or not.
pub struct NodeArena {
    nodes: Vec<Option<SceneNode>>,
    generations: Vec<u32>,
    free_indices: Vec<usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        // Reserve index 0 as invalid/nil sentinel so first real node ID is 1.
        Self {
            nodes: vec![None],
            generations: vec![0],
            free_indices: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        let mut generations = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(None);
        generations.push(0);
        Self {
            nodes,
            generations,
            free_indices: Vec::new(),
        }
    }

    /// Insert a node, returns NodeID with index and generation.
    /// The node's `id` field is overwritten with the issued ID.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeID {
        // Reuse a previously freed slot in O(1).
        if let Some(index) = self.free_indices.pop() {
            let id = NodeID::from_parts(index as u32, self.generations[index]);
            node.id = id;
            self.nodes[index] = Some(node);
            return id;
        }

        let index = self.nodes.len();
        let id = NodeID::from_parts(index as u32, 0);
        node.id = id;
        self.nodes.push(Some(node));
        self.generations.push(0);
        id
    }

    #[inline]
    fn slot(&self, id: NodeID) -> Option<usize> {
        let index = id.index() as usize;
        if id.is_nil()
            || index == 0
            || index >= self.nodes.len()
            || self.generations[index] != id.generation()
        {
            return None;
        }
        Some(index)
    }

    /// Get a node by ID, returns None if generation doesn't match
    #[inline]
    pub fn get(&self, id: NodeID) -> Option<&SceneNode> {
        self.nodes[self.slot(id)?].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        let index = self.slot(id)?;
        self.nodes[index].as_mut()
    }

    /// Remove a node, bumping the generation counter
    pub fn remove(&mut self, id: NodeID) -> Option<SceneNode> {
        let index = self.slot(id)?;
        let removed = self.nodes[index].take();
        if removed.is_some() {
            self.generations[index] = self.generations[index].wrapping_add(1);
            self.free_indices.push(index);
        }
        removed
    }

    #[inline]
    pub fn contains(&self, id: NodeID) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeID, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, node)| {
                node.as_ref()
                    .map(|n| (NodeID::from_parts(index as u32, self.generations[index]), n))
            })
    }

    /// Number of active nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.is_none())
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneNodeData;

    #[test]
    fn first_id_skips_nil_slot() {
        let mut arena = NodeArena::new();
        let id = arena.insert(SceneNode::new("a", SceneNodeData::Node));
        assert_eq!(id.index(), 1);
        assert_eq!(arena.get(id).map(|n| n.id), Some(id));
    }

    #[test]
    fn removed_slot_is_reused_with_new_generation() {
        let mut arena = NodeArena::new();
        let a = arena.insert(SceneNode::new("a", SceneNodeData::Node));
        assert!(arena.remove(a).is_some());
        assert!(arena.get(a).is_none());

        let b = arena.insert(SceneNode::new("b", SceneNodeData::Node));
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).map(|n| n.name.as_ref()), Some("b"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn nil_never_resolves() {
        let arena = NodeArena::new();
        assert!(arena.get(NodeID::nil()).is_none());
        assert!(arena.is_empty());
    }
}
