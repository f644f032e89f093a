use reel_structs::{Color, Variant, Vector2};

/// Blend `from` toward `to` by eased `progress`.
///
/// Numbers, vectors and colors blend linearly (colors per channel, ints
/// rounded). Any other pairing, including mismatched kinds, holds `from`
/// until progress reaches 0.5 and then jumps to `to`.
pub fn interpolate(from: &Variant, to: &Variant, progress: f32) -> Variant {
    match (from, to) {
        (Variant::Int(a), Variant::Int(b)) => {
            let v = lerp(*a as f32, *b as f32, progress);
            Variant::Int(v.round() as i32)
        }
        (Variant::Float(_) | Variant::Int(_), Variant::Float(_) | Variant::Int(_)) => {
            match (from.as_f32(), to.as_f32()) {
                (Some(a), Some(b)) => Variant::Float(lerp(a, b, progress)),
                _ => snap(from, to, progress),
            }
        }
        (Variant::Vector2(a), Variant::Vector2(b)) => {
            Variant::Vector2(Vector2::lerp(*a, *b, progress))
        }
        (Variant::Color(a), Variant::Color(b)) => Variant::Color(Color::lerp(*a, *b, progress)),
        _ => snap(from, to, progress),
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn snap(from: &Variant, to: &Variant, progress: f32) -> Variant {
    if progress < 0.5 {
        from.clone()
    } else {
        to.clone()
    }
}
