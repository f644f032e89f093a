use std::fmt;

use crate::{Color, Vector2};

/// Dynamically typed property value, used wherever a property is read or
/// written by name.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vector2(Vector2),
    Color(Color),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Float,
    Int,
    Bool,
    Vector2,
    Color,
    Text,
}

impl Variant {
    #[inline]
    pub const fn kind(&self) -> VariantKind {
        match self {
            Variant::Float(_) => VariantKind::Float,
            Variant::Int(_) => VariantKind::Int,
            Variant::Bool(_) => VariantKind::Bool,
            Variant::Vector2(_) => VariantKind::Vector2,
            Variant::Color(_) => VariantKind::Color,
            Variant::Text(_) => VariantKind::Text,
        }
    }

    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Variant::Float(v) => Some(v),
            Variant::Int(v) => Some(v as f32),
            _ => None,
        }
    }

    #[inline]
    pub fn as_vector2(&self) -> Option<Vector2> {
        match *self {
            Variant::Vector2(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Variant::Color(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Variant::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Variant::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantKind::Float => "float",
            VariantKind::Int => "int",
            VariantKind::Bool => "bool",
            VariantKind::Vector2 => "vector2",
            VariantKind::Color => "color",
            VariantKind::Text => "text",
        };
        f.write_str(name)
    }
}

impl From<f32> for Variant {
    fn from(v: f32) -> Self {
        Variant::Float(v)
    }
}
// Unsuffixed float literals default to f64.
impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Float(v as f32)
    }
}
impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Variant::Int(v)
    }
}
impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}
impl From<Vector2> for Variant {
    fn from(v: Vector2) -> Self {
        Variant::Vector2(v)
    }
}
impl From<Color> for Variant {
    fn from(c: Color) -> Self {
        Variant::Color(c)
    }
}
impl From<&str> for Variant {
    fn from(s: &str) -> Self {
        Variant::Text(s.to_string())
    }
}
impl From<String> for Variant {
    fn from(s: String) -> Self {
        Variant::Text(s)
    }
}
