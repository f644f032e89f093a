use indexmap::IndexSet;
use reel_ids::{NodeID, TreeID};
use rustc_hash::FxHashMap;

/// Outcome of one logic pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Completed,
    /// The root was queued for free and has been destroyed. The tree stays
    /// registered but every later frame is a no-op.
    RootFreed,
    /// `process_frame` was called from inside a hook of the same tree.
    Reentrant,
}

/// Per-tree runtime state. Nodes themselves live in the `Stage` arena.
#[derive(Debug)]
pub struct SceneTree {
    id: TreeID,
    root: NodeID,
    pub(crate) groups: FxHashMap<String, IndexSet<NodeID>>,
    pub(crate) free_queue: IndexSet<NodeID>,
    pub(crate) processing: bool,
    pub(crate) root_freed: bool,
}

impl SceneTree {
    pub(crate) fn new(id: TreeID, root: NodeID) -> Self {
        Self {
            id,
            root,
            groups: FxHashMap::default(),
            free_queue: IndexSet::new(),
            processing: false,
            root_freed: false,
        }
    }

    #[inline]
    pub fn id(&self) -> TreeID {
        self.id
    }

    #[inline]
    pub fn root(&self) -> NodeID {
        self.root
    }

    #[inline]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    #[inline]
    pub fn is_root_freed(&self) -> bool {
        self.root_freed
    }

    pub fn pending_free(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.free_queue.iter().copied()
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub(crate) fn index_group(&mut self, group: &str, id: NodeID) {
        match self.groups.get_mut(group) {
            Some(members) => {
                members.insert(id);
            }
            None => {
                let mut members = IndexSet::new();
                members.insert(id);
                self.groups.insert(group.to_owned(), members);
            }
        }
    }

    pub(crate) fn unindex_group(&mut self, group: &str, id: NodeID) {
        if let Some(members) = self.groups.get_mut(group) {
            members.shift_remove(&id);
            if members.is_empty() {
                self.groups.remove(group);
            }
        }
    }
}
