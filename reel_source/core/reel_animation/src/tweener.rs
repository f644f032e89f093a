use log::warn;
use reel_nodes::Stage;
use reel_structs::Variant;

use crate::binding::PropertyBinding;
use crate::easing::Easing;
use crate::interpolate::interpolate;

/// Durations below this are clamped up to it.
pub const MIN_DURATION: f32 = 0.0001;

/// One property animation: start/end values, duration, delay and easing.
///
/// `elapsed` starts at `-delay`, so crossing zero marks the end of the delay.
/// The start value is read from the target on that first active update, not
/// when the unit is built.
#[derive(Debug)]
pub struct PropertyTweener {
    binding: PropertyBinding,
    start: Option<Variant>,
    end: Variant,
    duration: f32,
    delay: f32,
    easing: Easing,
    elapsed: f32,
    failed: bool,
}

impl PropertyTweener {
    pub fn new(
        binding: PropertyBinding,
        end: Variant,
        duration: f32,
        delay: f32,
        easing: Easing,
    ) -> Self {
        let duration = if duration.is_finite() {
            duration.max(MIN_DURATION)
        } else {
            MIN_DURATION
        };
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        Self {
            binding,
            start: None,
            end,
            duration,
            delay,
            easing,
            elapsed: -delay,
            failed: false,
        }
    }

    /// Advance by `delta` and write the blended value. Returns whether the
    /// unit is finished afterwards.
    pub fn update(&mut self, stage: &mut Stage, delta: f32) -> bool {
        if self.is_finished() {
            return true;
        }
        self.elapsed += delta;
        if self.elapsed < 0.0 {
            return false;
        }

        if self.start.is_none() {
            match self.binding.read(stage) {
                Ok(value) => self.start = Some(value),
                Err(e) => {
                    self.fail(&e);
                    return true;
                }
            }
        }
        let Some(start) = &self.start else {
            return true;
        };

        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let value = if t >= 1.0 {
            self.end.clone()
        } else {
            interpolate(start, &self.end, (self.easing)(t))
        };

        if let Err(e) = self.binding.write(stage, value) {
            self.fail(&e);
            return true;
        }
        self.is_finished()
    }

    fn fail(&mut self, error: &dyn std::error::Error) {
        warn!(
            "tween of '{}' failed and was stopped: {error}",
            self.binding.name()
        );
        self.failed = true;
        self.elapsed = self.elapsed.max(self.duration);
    }

    /// Rewind to the start of the delay and forget the captured start value.
    pub fn reset(&mut self) {
        self.elapsed = -self.delay;
        self.start = None;
        self.failed = false;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.failed || self.elapsed >= self.duration
    }

    #[inline]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn start_value(&self) -> Option<&Variant> {
        self.start.as_ref()
    }

    pub fn end_value(&self) -> &Variant {
        &self.end
    }

    pub fn binding(&self) -> &PropertyBinding {
        &self.binding
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use reel_nodes::Stage;
    use reel_structs::Variant;

    use super::*;
    use crate::binding::test_support::Dot;
    use crate::easing;

    fn dot_tweener(dot: &Rc<RefCell<Dot>>, end: f32, duration: f32, delay: f32) -> PropertyTweener {
        PropertyTweener::new(
            PropertyBinding::shared(dot, "x").unwrap(),
            Variant::Float(end),
            duration,
            delay,
            easing::linear,
        )
    }

    #[test]
    fn start_value_is_captured_after_delay() {
        let mut stage = Stage::new();
        let dot = Rc::new(RefCell::new(Dot::default()));
        let mut unit = dot_tweener(&dot, 100.0, 1.0, 0.5);

        assert!(!unit.update(&mut stage, 0.25));
        assert!(unit.start_value().is_none());

        // changed during the delay; the tween starts from here
        dot.borrow_mut().x = 20.0;
        assert!(!unit.update(&mut stage, 0.75));
        assert_eq!(unit.start_value(), Some(&Variant::Float(20.0)));
        assert!((dot.borrow().x - 60.0).abs() < 1e-4);

        assert!(unit.update(&mut stage, 0.5));
        assert_eq!(dot.borrow().x, 100.0);
    }

    #[test]
    fn reset_rewinds_and_recaptures() {
        let mut stage = Stage::new();
        let dot = Rc::new(RefCell::new(Dot::default()));
        let mut unit = dot_tweener(&dot, 10.0, 1.0, 0.0);
        assert!(unit.update(&mut stage, 2.0));
        assert_eq!(dot.borrow().x, 10.0);

        unit.reset();
        assert!(!unit.is_finished());
        assert!(unit.start_value().is_none());
        unit.update(&mut stage, 0.5);
        assert_eq!(unit.start_value(), Some(&Variant::Float(10.0)));
    }

    #[test]
    fn duration_is_floor_clamped() {
        let dot = Rc::new(RefCell::new(Dot::default()));
        let unit = dot_tweener(&dot, 1.0, 0.0, -3.0);
        assert_eq!(unit.duration(), MIN_DURATION);
        assert_eq!(unit.delay(), 0.0);
    }

    #[test]
    fn failure_finishes_the_unit() {
        let mut stage = Stage::new();
        let dot = Rc::new(RefCell::new(Dot::default()));
        let mut unit = dot_tweener(&dot, 1.0, 1.0, 0.0);
        drop(dot);

        assert!(unit.update(&mut stage, 0.1));
        assert!(unit.has_failed());
        assert!(unit.is_finished());
    }
}
