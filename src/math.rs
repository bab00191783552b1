use fastrand::Rng;

/// A position on the drawing surface, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Uniform float in `[min, max)`.
pub fn random(rng: &mut Rng, min: f32, max: f32) -> f32 {
    scale_unit(rng.f32(), min, max)
}

/// Maps `unit` in `[0, 1)` onto `[min, max)`. Rounding can land exactly on
/// `max`; such results are pulled back to the largest float below it.
fn scale_unit(unit: f32, min: f32, max: f32) -> f32 {
    let v = unit * (max - min) + min;
    if max > min && v >= max {
        float_below(max).max(min)
    } else {
        v
    }
}

fn float_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
