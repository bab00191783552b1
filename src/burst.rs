use fastrand::Rng;

use crate::math::Point;
use crate::spark::Spark;

/// Sparks thrown out by every burst.
pub const BURST_SPARKS: usize = 40;

/// Appends a fresh cluster of sparks at `point`, tinted around `hue`.
pub fn spawn_burst(sparks: &mut Vec<Spark>, rng: &mut Rng, point: Point, hue: f32) {
    sparks.reserve(BURST_SPARKS);
    for _ in 0..BURST_SPARKS {
        sparks.push(Spark::new(rng, point, hue));
    }
}
