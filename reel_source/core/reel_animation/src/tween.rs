use std::fmt;

use log::{debug, warn};
use reel_ids::NodeID;
use reel_nodes::{NodeBehavior, Stage, behavior_any};
use reel_structs::Variant;

use crate::binding::PropertyBinding;
use crate::easing::{self, Easing};
use crate::tweener::PropertyTweener;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TweenState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// Node behavior that owns a set of property tweens and advances them
/// together. Configure while idle, then start through `TweenAPI`.
pub struct Tween {
    tweeners: Vec<PropertyTweener>,
    state: TweenState,
    auto_delete: bool,
    speed_scale: f32,
    on_finished: Option<Box<dyn FnMut()>>,
}

impl Tween {
    pub fn new() -> Self {
        Self {
            tweeners: Vec::new(),
            state: TweenState::Idle,
            auto_delete: true,
            speed_scale: 1.0,
            on_finished: None,
        }
    }

    /// Animate `binding` to `end` over `duration` seconds, linearly and
    /// without delay.
    pub fn tween_property(
        &mut self,
        binding: impl Into<PropertyBinding>,
        end: impl Into<Variant>,
        duration: f32,
    ) -> &mut Self {
        self.tween_property_with(binding, end, duration, 0.0, easing::linear)
    }

    pub fn tween_property_with(
        &mut self,
        binding: impl Into<PropertyBinding>,
        end: impl Into<Variant>,
        duration: f32,
        delay: f32,
        easing: Easing,
    ) -> &mut Self {
        let binding = binding.into();
        if self.state != TweenState::Idle {
            warn!(
                "tween_property('{}') ignored: tween is {:?}, not idle",
                binding.name(),
                self.state
            );
            return self;
        }
        self.tweeners.push(PropertyTweener::new(
            binding,
            end.into(),
            duration,
            delay,
            easing,
        ));
        self
    }

    /// Whether the owning node is freed once every unit finishes. Defaults
    /// to `true`.
    pub fn set_auto_delete(&mut self, auto_delete: bool) -> &mut Self {
        self.auto_delete = auto_delete;
        self
    }

    /// Multiplier applied to every frame delta.
    pub fn set_speed_scale(&mut self, scale: f32) -> &mut Self {
        if scale.is_finite() && scale >= 0.0 {
            self.speed_scale = scale;
        } else {
            warn!("set_speed_scale({scale}) ignored");
        }
        self
    }

    /// Called once when the tween transitions to `Finished`. Not called
    /// on `stop`.
    pub fn on_finished(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.on_finished = Some(Box::new(callback));
        self
    }

    #[inline]
    pub fn state(&self) -> TweenState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Finished
    }

    pub fn auto_delete(&self) -> bool {
        self.auto_delete
    }

    pub fn speed_scale(&self) -> f32 {
        self.speed_scale
    }

    pub fn unit_count(&self) -> usize {
        self.tweeners.len()
    }

    pub fn finished_count(&self) -> usize {
        self.tweeners.iter().filter(|t| t.is_finished()).count()
    }

    pub fn tweeners(&self) -> &[PropertyTweener] {
        &self.tweeners
    }

    /// Idle or Finished -> Running; a finished tween replays from the top.
    /// With no units the tween finishes on the spot. Returns whether the
    /// owning node should now be freed.
    pub(crate) fn start(&mut self) -> bool {
        match self.state {
            TweenState::Idle => {}
            TweenState::Finished => {
                for unit in &mut self.tweeners {
                    unit.reset();
                }
            }
            TweenState::Running | TweenState::Paused => {
                warn!("tween start ignored: tween is {:?}", self.state);
                return false;
            }
        }
        self.state = TweenState::Running;
        if self.tweeners.is_empty() {
            return self.complete();
        }
        false
    }

    /// Back to Idle without completion effects. Units keep their progress.
    pub fn stop(&mut self) {
        self.state = TweenState::Idle;
    }

    /// Rewind every unit to the start of its delay and return to Idle.
    pub fn reset(&mut self) {
        for unit in &mut self.tweeners {
            unit.reset();
        }
        self.state = TweenState::Idle;
    }

    pub fn pause(&mut self) {
        if self.state == TweenState::Running {
            self.state = TweenState::Paused;
        } else {
            warn!("tween pause ignored: tween is {:?}", self.state);
        }
    }

    pub fn resume(&mut self) {
        if self.state == TweenState::Paused {
            self.state = TweenState::Running;
        } else {
            warn!("tween resume ignored: tween is {:?}", self.state);
        }
    }

    fn complete(&mut self) -> bool {
        self.state = TweenState::Finished;
        if let Some(callback) = self.on_finished.as_mut() {
            callback();
        }
        self.auto_delete
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("state", &self.state)
            .field("units", &self.tweeners.len())
            .field("auto_delete", &self.auto_delete)
            .field("speed_scale", &self.speed_scale)
            .finish()
    }
}

impl NodeBehavior for Tween {
    fn on_process(&mut self, stage: &mut Stage, id: NodeID, delta: f32) {
        if self.state != TweenState::Running {
            return;
        }
        let delta = delta * self.speed_scale;

        let mut all_finished = true;
        for unit in &mut self.tweeners {
            if !unit.is_finished() {
                unit.update(stage, delta);
            }
            all_finished &= unit.is_finished();
        }

        if all_finished {
            debug!("tween {id} finished");
            if self.complete() {
                stage.queue_free(id);
            }
        }
    }

    behavior_any!();
}
