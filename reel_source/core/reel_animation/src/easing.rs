//! Easing curves.
//!
//! Every curve maps normalized time `t` in `[0, 1]` to progress, with
//! `f(0) == 0` and `f(1) == 1`. Back and elastic curves overshoot in between.

use std::f32::consts::PI;

/// An easing curve. Pure, stateless, called once per tween unit per frame.
pub type Easing = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t
}

pub fn quad_in(t: f32) -> f32 {
    t * t
}

pub fn quad_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

pub fn cubic_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn quart_in(t: f32) -> f32 {
    t.powi(4)
}

pub fn quart_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

pub fn quart_in_out(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

pub fn sine_in(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

pub fn sine_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

pub fn sine_in_out(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

pub fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * t - 10.0)
    }
}

pub fn expo_out(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

pub fn expo_in_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;

pub fn back_in(t: f32) -> f32 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

pub fn back_out(t: f32) -> f32 {
    let u = t - 1.0;
    1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
}

pub fn back_in_out(t: f32) -> f32 {
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

pub fn elastic_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

pub fn elastic_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

pub fn elastic_in_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        (2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0 + 1.0
    }
}

pub fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

pub fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

pub fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
    }
}

const NAMED: &[(&str, Easing)] = &[
    ("linear", linear),
    ("quad_in", quad_in),
    ("quad_out", quad_out),
    ("quad_in_out", quad_in_out),
    ("cubic_in", cubic_in),
    ("cubic_out", cubic_out),
    ("cubic_in_out", cubic_in_out),
    ("quart_in", quart_in),
    ("quart_out", quart_out),
    ("quart_in_out", quart_in_out),
    ("sine_in", sine_in),
    ("sine_out", sine_out),
    ("sine_in_out", sine_in_out),
    ("expo_in", expo_in),
    ("expo_out", expo_out),
    ("expo_in_out", expo_in_out),
    ("back_in", back_in),
    ("back_out", back_out),
    ("back_in_out", back_in_out),
    ("elastic_in", elastic_in),
    ("elastic_out", elastic_out),
    ("elastic_in_out", elastic_in_out),
    ("bounce_in", bounce_in),
    ("bounce_out", bounce_out),
    ("bounce_in_out", bounce_in_out),
];

/// Look up a curve by its snake_case name, e.g. `"cubic_in_out"`.
pub fn by_name(name: &str) -> Option<Easing> {
    NAMED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, easing)| easing)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    NAMED.iter().map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_curve_hits_both_ends() {
        for (name, easing) in NAMED {
            assert!(easing(0.0).abs() < 1e-4, "{name}(0) = {}", easing(0.0));
            assert!((easing(1.0) - 1.0).abs() < 1e-4, "{name}(1) = {}", easing(1.0));
        }
    }

    #[test]
    fn in_out_curves_are_symmetric_at_half() {
        for name in ["quad_in_out", "cubic_in_out", "sine_in_out", "expo_in_out"] {
            let easing = by_name(name).unwrap();
            assert!((easing(0.5) - 0.5).abs() < 1e-4, "{name}");
        }
    }

    #[test]
    fn back_overshoots() {
        assert!(back_in(0.2) < 0.0);
        assert!(back_out(0.8) > 1.0);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("linear").map(|f| f(0.3)), Some(0.3));
        assert!(by_name("wobble").is_none());
        assert_eq!(names().count(), NAMED.len());
    }
}
