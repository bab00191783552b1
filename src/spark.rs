use std::f32::consts::TAU;

use fastrand::Rng;

use crate::color::Color;
use crate::math::{Point, random};
use crate::surface::Surface;
use crate::trail::Trail;

const TRAIL_LEN: usize = 5;
const FRICTION: f32 = 0.95;
const GRAVITY: f32 = 1.0;
/// How far a spark's hue may stray from the hue of the tick it was born in.
const HUE_SPREAD: f32 = 50.0;

/// Outcome of one spark update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Burning,
    Spent,
}

/// One ember thrown out by a burst.
#[derive(Debug, Clone)]
pub struct Spark {
    pub position: Point,
    pub trail: Trail,
    angle: f32,
    pub speed: f32,
    pub friction: f32,
    pub gravity: f32,
    pub hue: f32,
    pub brightness: f32,
    pub alpha: f32,
    decay: f32,
}

impl Spark {
    pub fn new(rng: &mut Rng, origin: Point, hue: f32) -> Self {
        Self {
            position: origin,
            trail: Trail::new(origin, TRAIL_LEN),
            angle: random(rng, 0.0, TAU),
            speed: random(rng, 1.0, 10.0),
            friction: FRICTION,
            gravity: GRAVITY,
            hue: random(rng, hue - HUE_SPREAD, hue + HUE_SPREAD),
            brightness: random(rng, 50.0, 80.0),
            alpha: 1.0,
            decay: random(rng, 0.015, 0.03),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Whether the spark has faded past its cutoff.
    ///
    /// The cutoff is the spark's own decay rate rather than zero, so sparks
    /// vanish one step before they would become fully transparent.
    pub fn is_spent(&self) -> bool {
        self.alpha <= self.decay
    }

    pub fn update(&mut self) -> Fade {
        self.trail.record(self.position);

        self.speed *= self.friction;
        self.position.x += self.angle.cos() * self.speed;
        self.position.y += self.angle.sin() * self.speed + self.gravity;
        self.alpha -= self.decay;

        if self.is_spent() {
            Fade::Spent
        } else {
            Fade::Burning
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, rng: &mut Rng) {
        surface.stroke_line(
            self.trail.oldest(),
            self.position,
            Color::hsla(self.hue, self.brightness, self.alpha),
            random(rng, 1.0, 3.0),
        );
    }
}
