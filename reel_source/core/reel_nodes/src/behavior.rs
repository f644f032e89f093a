use std::any::Any;

use reel_ids::NodeID;

use crate::{DrawError, DrawSurface, Stage};

/// Overridable lifecycle hooks of a node.
///
/// While a hook runs, the behavior is taken out of its node, so the hook is
/// free to edit the hierarchy through `stage` (including freeing its own
/// node). Enter, ready or exit caused on the node itself by one of its own
/// hooks is delivered right after that hook returns. Every hook defaults to
/// a no-op.
pub trait NodeBehavior: Any {
    /// Node became reachable from a tree root. Fired pre-order.
    fn on_enter_tree(&mut self, _stage: &mut Stage, _id: NodeID) {}

    /// Whole subtree has entered. Fired post-order (children first).
    fn on_ready(&mut self, _stage: &mut Stage, _id: NodeID) {}

    /// Per-frame logic, parent before children.
    fn on_process(&mut self, _stage: &mut Stage, _id: NodeID, _delta: f32) {}

    /// Draw self. For 2D nodes the surface already carries the node's
    /// global transform.
    fn on_draw(
        &mut self,
        _stage: &Stage,
        _id: NodeID,
        _surface: &mut dyn DrawSurface,
    ) -> Result<(), DrawError> {
        Ok(())
    }

    /// Node is leaving its tree. Fired post-order, before the tree
    /// back-reference is cleared.
    fn on_exit_tree(&mut self, _stage: &mut Stage, _id: NodeID) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Implements the `as_any`/`as_any_mut` pair inside an `impl NodeBehavior` block.
#[macro_export]
macro_rules! behavior_any {
    () => {
        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}
