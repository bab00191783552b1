use fastrand::Rng;

use crate::color::Color;
use crate::math::{Point, distance, random};
use crate::surface::Surface;
use crate::trail::Trail;

const TRAIL_LEN: usize = 3;
const ACCELERATION: f32 = 1.05;

/// Outcome of one projectile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    Climbing,
    /// The next step would reach the target. The projectile did not move and
    /// should be replaced by a burst at its target.
    Arrived,
}

/// A rising shell travelling in a straight line from `origin` to `target`.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Point,
    pub origin: Point,
    pub target: Point,
    distance_to_target: f32,
    pub distance_traveled: f32,
    pub trail: Trail,
    angle: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub brightness: f32,
}

impl Projectile {
    pub fn new(rng: &mut Rng, origin: Point, target: Point) -> Self {
        Self {
            position: origin,
            origin,
            target,
            distance_to_target: distance(origin, target),
            distance_traveled: 0.0,
            trail: Trail::new(origin, TRAIL_LEN),
            angle: (target.y - origin.y).atan2(target.x - origin.x),
            speed: random(rng, 2.0, 4.0),
            acceleration: ACCELERATION,
            brightness: random(rng, 50.0, 80.0),
        }
    }

    pub fn distance_to_target(&self) -> f32 {
        self.distance_to_target
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances one tick.
    ///
    /// The arrival check measures the distance from the origin to where the
    /// shell is *about* to be, so it stops one step short rather than
    /// overshooting.
    pub fn update(&mut self) -> Flight {
        self.trail.record(self.position);

        self.speed *= self.acceleration;

        let vx = self.angle.cos() * self.speed;
        let vy = self.angle.sin() * self.speed;
        let next = Point::new(self.position.x + vx, self.position.y + vy);
        self.distance_traveled = distance(self.origin, next);

        if self.distance_traveled >= self.distance_to_target {
            Flight::Arrived
        } else {
            self.position = next;
            Flight::Climbing
        }
    }

    /// Strokes the trail using the shared per-tick `hue`. Line width flickers
    /// between draws.
    pub fn draw(&self, surface: &mut impl Surface, hue: f32, rng: &mut Rng) {
        surface.stroke_line(
            self.trail.oldest(),
            self.position,
            Color::hsl(hue, self.brightness),
            random(rng, 1.0, 3.0),
        );
    }
}
