use log::{debug, warn};
use reel_ids::{NodeID, TreeID};
use reel_structs::{Rect, Vector2};

use crate::{
    DrawError, DrawSurface, FrameStatus, SceneError, SceneNodeData, ShapeKind, Stage,
    SurfaceScope,
};

impl Stage {
    /// Logic pass: `on_process` pre-order over the tree, then one drain of
    /// the pending-free queue.
    pub fn process_frame(&mut self, tree: TreeID, delta: f32) -> Result<FrameStatus, SceneError> {
        let state = self
            .trees
            .get_mut(&tree)
            .ok_or(SceneError::TreeNotFound(tree))?;
        if state.root_freed {
            warn!("process_frame({tree}): root was freed, nothing to process");
            return Ok(FrameStatus::RootFreed);
        }
        if state.processing {
            warn!("process_frame({tree}) re-entered from a hook; ignored");
            return Ok(FrameStatus::Reentrant);
        }
        state.processing = true;
        let root = state.root();

        self.process_recursive(root, tree, delta);
        let status = self.flush_free_queue(tree);

        if let Some(state) = self.trees.get_mut(&tree) {
            state.processing = false;
        }
        Ok(status)
    }

    fn process_recursive(&mut self, id: NodeID, tree: TreeID, delta: f32) {
        self.run_hook(id, |b, stage| b.on_process(stage, id, delta));

        for child in self.child_snapshot(id) {
            if self.tree_of(child) == Some(tree) {
                self.process_recursive(child, tree, delta);
            }
        }
    }

    fn flush_free_queue(&mut self, tree: TreeID) -> FrameStatus {
        let Some(state) = self.trees.get_mut(&tree) else {
            return FrameStatus::Completed;
        };
        if state.root_freed {
            return FrameStatus::RootFreed;
        }
        let root = state.root();
        let queued = std::mem::take(&mut state.free_queue);

        for id in queued {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.tree != Some(tree) {
                debug!("skipping queued free of {id}: no longer in tree {tree}");
                continue;
            }
            if id == root {
                self.free_root(tree, id);
                self.destroy_subtree(id);
                return FrameStatus::RootFreed;
            }
            if let Some(parent) = node.parent() {
                self.remove_child(parent, id);
                self.destroy_subtree(id);
            }
        }
        FrameStatus::Completed
    }

    /// Draw pass: pre-order, each node before its children. A 2D node sets
    /// its global transform inside a save/restore scope that also covers its
    /// children; invisible 2D nodes skip their whole subtree.
    pub fn draw_frame(
        &mut self,
        tree: TreeID,
        surface: &mut dyn DrawSurface,
    ) -> Result<(), DrawError> {
        let state = self.trees.get(&tree).ok_or(SceneError::TreeNotFound(tree))?;
        if state.root_freed {
            return Ok(());
        }
        let root = state.root();
        self.draw_recursive(root, tree, surface)
    }

    fn draw_recursive(
        &mut self,
        id: NodeID,
        tree: TreeID,
        surface: &mut dyn DrawSurface,
    ) -> Result<(), DrawError> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(());
        };
        let visible = node.data.as_node2d().map(|n| n.visible);

        match visible {
            Some(false) => Ok(()),
            Some(true) => {
                let global = self.global_matrix(id);
                let mut scope = SurfaceScope::new(surface);
                scope.set_transform(&global);
                self.draw_self(id, &mut *scope)?;
                self.draw_children(id, tree, &mut *scope)
            }
            None => {
                self.draw_self(id, surface)?;
                self.draw_children(id, tree, surface)
            }
        }
    }

    fn draw_children(
        &mut self,
        id: NodeID,
        tree: TreeID,
        surface: &mut dyn DrawSurface,
    ) -> Result<(), DrawError> {
        for child in self.child_snapshot(id) {
            if self.tree_of(child) == Some(tree) {
                self.draw_recursive(child, tree, surface)?;
            }
        }
        Ok(())
    }

    fn draw_self(&mut self, id: NodeID, surface: &mut dyn DrawSurface) -> Result<(), DrawError> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(());
        };
        match &node.data {
            SceneNodeData::Sprite2D(sprite) if !sprite.texture.is_nil() => {
                surface.draw_texture(sprite.texture, sprite.rect(), sprite.modulate)?;
            }
            SceneNodeData::Shape2D(shape) => match shape.shape {
                ShapeKind::Rectangle { size } => {
                    surface.fill_rect(Rect::centered(size), shape.color)?;
                }
                ShapeKind::Circle { radius } => {
                    surface.fill_circle(Vector2::ZERO, radius, shape.color)?;
                }
            },
            _ => {}
        }

        let Some(mut behavior) = self.take_behavior(id) else {
            return Ok(());
        };
        let result = behavior.on_draw(self, id, surface);
        self.restore_behavior(id, behavior);
        result
    }
}
