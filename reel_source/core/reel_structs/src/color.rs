use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Per-channel linear blend. `t` is not clamped so overshooting easings
    /// saturate at the channel bounds instead of wrapping.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        fn channel(from: u8, to: u8, t: f32) -> u8 {
            let v = from as f32 + (to as f32 - from as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        }
        Self {
            r: channel(a.r, b.r, t),
            g: channel(a.g, b.g, t),
            b: channel(a.b, b.b, t),
            a: channel(a.a, b.a, t),
        }
    }

    /// Normalized RGBA, for surfaces that work in float color.
    pub fn to_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err("Invalid hex color length, expected 6 or 8 hex digits".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_blends_each_channel() {
        let c = Color::lerp(Color::new(0, 100, 200, 255), Color::new(100, 0, 200, 55), 0.5);
        assert_eq!(c, Color::new(50, 50, 200, 155));
    }

    #[test]
    fn lerp_saturates_on_overshoot() {
        let c = Color::lerp(Color::BLACK, Color::WHITE, 1.2);
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex("#ff8000").unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(Color::from_hex("00000080").unwrap(), Color::new(0, 0, 0, 128));
        assert!(Color::from_hex("abc").is_err());
    }
}
