use log::debug;
use reel_ids::NodeID;
use reel_nodes::{NodeProperty, PropertyError, SceneError, SceneNodeData, Stage};
use reel_structs::{Variant, VariantKind};

use crate::binding::PropertyBinding;
use crate::easing::Easing;
use crate::error::TweenError;
use crate::tween::{Tween, TweenState};

/// Tween management on top of a `Stage`.
pub trait TweenAPI {
    /// Create an idle tween node as the last child of `parent`.
    fn create_tween(&mut self, parent: NodeID) -> Result<NodeID, TweenError>;

    /// Borrow the `Tween` behavior of `tween` for configuration.
    fn with_tween<V>(
        &mut self,
        tween: NodeID,
        f: impl FnOnce(&mut Tween) -> V,
    ) -> Result<V, TweenError>;

    /// Bind `property` on `target` and add a unit for it. Fails before any
    /// frame runs if the property is unknown, read-only, write-only, or
    /// cannot hold `end`.
    #[allow(clippy::too_many_arguments)]
    fn tween_node_property(
        &mut self,
        tween: NodeID,
        target: NodeID,
        property: &str,
        end: impl Into<Variant>,
        duration: f32,
        delay: f32,
        easing: Easing,
    ) -> Result<(), TweenError>;

    fn start_tween(&mut self, tween: NodeID) -> Result<(), TweenError>;
    fn stop_tween(&mut self, tween: NodeID) -> Result<(), TweenError>;
    fn reset_tween(&mut self, tween: NodeID) -> Result<(), TweenError>;
    fn pause_tween(&mut self, tween: NodeID) -> Result<(), TweenError>;
    fn resume_tween(&mut self, tween: NodeID) -> Result<(), TweenError>;

    fn tween_state(&self, tween: NodeID) -> Option<TweenState>;
}

/// A node property takes an end value of its own kind; float properties
/// also take ints.
fn check_end_kind(property: NodeProperty, end: &Variant) -> Result<(), PropertyError> {
    let (expected, found) = (property.kind(), end.kind());
    if expected == found || (expected == VariantKind::Float && found == VariantKind::Int) {
        return Ok(());
    }
    Err(PropertyError::TypeMismatch {
        property: property.name().to_owned(),
        expected,
        found,
    })
}

impl TweenAPI for Stage {
    fn create_tween(&mut self, parent: NodeID) -> Result<NodeID, TweenError> {
        if !self.contains(parent) {
            return Err(SceneError::NodeNotFound(parent).into());
        }
        let id =
            self.create_node_with_behavior("Tween", SceneNodeData::Node, Box::new(Tween::new()));
        if let Err(e) = self.add_child(parent, id) {
            self.free(id);
            return Err(e.into());
        }
        debug!("tween {id} created under {parent}");
        Ok(id)
    }

    fn with_tween<V>(
        &mut self,
        tween: NodeID,
        f: impl FnOnce(&mut Tween) -> V,
    ) -> Result<V, TweenError> {
        if !self.contains(tween) {
            return Err(SceneError::NodeNotFound(tween).into());
        }
        self.with_behavior_mut::<Tween, V>(tween, f)
            .ok_or(TweenError::NotATween(tween))
    }

    fn tween_node_property(
        &mut self,
        tween: NodeID,
        target: NodeID,
        property: &str,
        end: impl Into<Variant>,
        duration: f32,
        delay: f32,
        easing: Easing,
    ) -> Result<(), TweenError> {
        let property = self.resolve_animatable(target, property)?;
        let end = end.into();
        check_end_kind(property, &end)?;
        let binding = PropertyBinding::Node {
            node: target,
            property,
        };
        self.with_tween(tween, |t| {
            t.tween_property_with(binding, end, duration, delay, easing);
        })
    }

    fn start_tween(&mut self, tween: NodeID) -> Result<(), TweenError> {
        if self.with_tween(tween, Tween::start)? {
            self.queue_free(tween);
        }
        Ok(())
    }

    fn stop_tween(&mut self, tween: NodeID) -> Result<(), TweenError> {
        self.with_tween(tween, Tween::stop)
    }

    fn reset_tween(&mut self, tween: NodeID) -> Result<(), TweenError> {
        self.with_tween(tween, Tween::reset)
    }

    fn pause_tween(&mut self, tween: NodeID) -> Result<(), TweenError> {
        self.with_tween(tween, Tween::pause)
    }

    fn resume_tween(&mut self, tween: NodeID) -> Result<(), TweenError> {
        self.with_tween(tween, Tween::resume)
    }

    fn tween_state(&self, tween: NodeID) -> Option<TweenState> {
        self.with_behavior::<Tween, _>(tween, Tween::state)
    }
}
