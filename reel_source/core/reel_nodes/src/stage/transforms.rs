use glam::Mat3;
use reel_ids::NodeID;
use reel_structs::{Transform2D, Vector2};
use smallvec::SmallVec;

use crate::Stage;

impl Stage {
    /// Local transform of a 2D node.
    pub fn transform(&self, id: NodeID) -> Option<Transform2D> {
        Some(self.nodes.get(id)?.data.as_node2d()?.transform)
    }

    /// Mutate the local transform of a 2D node. Returns `None` for missing
    /// or non-2D nodes.
    pub fn with_transform_mut<V>(
        &mut self,
        id: NodeID,
        f: impl FnOnce(&mut Transform2D) -> V,
    ) -> Option<V> {
        let node = self.nodes.get_mut(id)?.data.as_node2d_mut()?;
        Some(f(&mut node.transform))
    }

    /// parentGlobal · local, walking up through 2D ancestors only. The
    /// first non-2D ancestor ends the chain. Identity for non-2D nodes.
    pub fn global_matrix(&self, id: NodeID) -> Mat3 {
        let mut chain: SmallVec<[Transform2D; 8]> = SmallVec::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.nodes.get(cid) else {
                break;
            };
            let Some(n2d) = node.data.as_node2d() else {
                break;
            };
            chain.push(n2d.transform);
            current = node.parent();
        }
        chain
            .iter()
            .rev()
            .fold(Mat3::IDENTITY, |parent, local| {
                Transform2D::compose(&parent, local)
            })
    }

    /// Decomposed global transform. Rotation and scale are approximate when
    /// rotation is combined with non-uniform scale in the ancestry.
    pub fn global_transform(&self, id: NodeID) -> Transform2D {
        Transform2D::from_mat3(self.global_matrix(id))
    }

    pub fn global_position(&self, id: NodeID) -> Vector2 {
        let m = self.global_matrix(id);
        Vector2::new(m.z_axis.x, m.z_axis.y)
    }

    pub fn global_rotation(&self, id: NodeID) -> f32 {
        self.global_transform(id).rotation
    }

    pub fn global_scale(&self, id: NodeID) -> Vector2 {
        self.global_transform(id).scale
    }
}
