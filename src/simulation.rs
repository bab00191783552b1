use fastrand::Rng;
use log::{debug, trace};

use crate::burst::spawn_burst;
use crate::color::Color;
use crate::input::Pointer;
use crate::math::{Point, random};
use crate::projectile::{Flight, Projectile};
use crate::spark::{Fade, Spark};
use crate::surface::{Composite, Surface};

/// Ticks between automatic launches.
pub const LAUNCH_INTERVAL: u32 = 40;

// Erases half of what is on screen every tick, leaving fading trails.
const FADE_OVERLAY: Color = Color::Rgba {
    r: 0,
    g: 0,
    b: 0,
    alpha: 0.5,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub launch_interval: u32,
    /// Fixed seed for reproducible shows. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            launch_interval: LAUNCH_INTERVAL,
            seed: None,
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub launched: usize,
    pub bursts: usize,
    pub sparks_spent: usize,
}

/// The whole fireworks show: live shells and sparks, the per-tick hue, the
/// auto-launch timer and the pointer state fed by the input adapter.
pub struct Simulation {
    config: SimulationConfig,
    rng: Rng,
    hue: f32,
    timer: u32,
    projectiles: Vec<Projectile>,
    sparks: Vec<Spark>,
    pointer: Pointer,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: SimulationConfig, rng: Rng) -> Self {
        Self {
            config,
            rng,
            hue: 0.0,
            timer: 0,
            projectiles: Vec::new(),
            sparks: Vec::new(),
            pointer: Pointer::default(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn sparks_mut(&mut self) -> &mut Vec<Spark> {
        &mut self.sparks
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut Pointer {
        &mut self.pointer
    }

    /// Fires a new shell from `origin` toward `target`.
    pub fn launch(&mut self, origin: Point, target: Point) {
        debug!(
            "launch ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            origin.x, origin.y, target.x, target.y
        );
        let shell = Projectile::new(&mut self.rng, origin, target);
        self.projectiles.push(shell);
    }

    /// Advances the show by one frame, drawing onto `surface`.
    pub fn tick(&mut self, surface: &mut impl Surface) -> TickReport {
        let mut report = TickReport::default();

        self.hue = random(&mut self.rng, 0.0, 360.0);

        surface.fill_rect(FADE_OVERLAY, Composite::DestinationOut);
        surface.set_composite(Composite::Lighter);

        // Walk backwards so removing index `i` never disturbs an unvisited
        // entry; whatever `swap_remove` moves into `i` was already handled.
        for i in (0..self.projectiles.len()).rev() {
            self.projectiles[i].draw(surface, self.hue, &mut self.rng);
            if self.projectiles[i].update() == Flight::Arrived {
                let shell = self.projectiles.swap_remove(i);
                debug!("burst at ({:.1}, {:.1})", shell.target.x, shell.target.y);
                spawn_burst(&mut self.sparks, &mut self.rng, shell.target, self.hue);
                report.bursts += 1;
            }
        }

        for i in (0..self.sparks.len()).rev() {
            self.sparks[i].draw(surface, &mut self.rng);
            if self.sparks[i].update() == Fade::Spent {
                self.sparks.swap_remove(i);
                report.sparks_spent += 1;
            }
        }

        let width = surface.width();
        let height = surface.height();
        let launch_site = Point::new(width / 2.0, height);

        if self.timer >= self.config.launch_interval {
            // The timer waits at the interval while the pointer is held.
            if !self.pointer.held {
                let target = Point::new(
                    random(&mut self.rng, 0.0, width),
                    random(&mut self.rng, 0.0, height / 2.0),
                );
                self.launch(launch_site, target);
                report.launched += 1;
                self.timer = 0;
            }
        } else {
            self.timer += 1;
        }

        if self.pointer.held {
            if let Some(aim) = self.pointer.position {
                self.launch(launch_site, aim);
                report.launched += 1;
            }
        }

        trace!(
            "tick: hue {:.0}, {} shells, {} sparks, timer {}",
            self.hue,
            self.projectiles.len(),
            self.sparks.len(),
            self.timer
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};
    use pretty_assertions::assert_eq;

    fn seeded(seed: u64) -> Simulation {
        Simulation::with_rng(SimulationConfig::default(), Rng::with_seed(seed))
    }

    #[test]
    fn tick_starts_with_fade_then_switches_to_lighter() {
        let mut sim = seeded(1);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        sim.tick(&mut surface);

        assert_eq!(
            &surface.calls[..2],
            &[
                DrawCall::Fill {
                    color: Color::rgba(0, 0, 0, 0.5),
                    composite: Composite::DestinationOut,
                },
                DrawCall::SetComposite(Composite::Lighter),
            ]
        );
        assert_eq!(surface.composite(), Composite::Lighter);
    }

    #[test]
    fn hue_is_resampled_every_tick() {
        let mut sim = seeded(2);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut hues = Vec::new();
        for _ in 0..5 {
            sim.tick(&mut surface);
            assert!((0.0..360.0).contains(&sim.hue()));
            hues.push(sim.hue());
        }
        hues.dedup();
        assert!(hues.len() > 1);
    }

    #[test]
    fn projectiles_draw_with_the_tick_hue() {
        let mut sim = seeded(3);
        sim.launch(Point::new(400.0, 600.0), Point::new(400.0, 0.0));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        sim.tick(&mut surface);

        let brightness = sim.projectiles()[0].brightness;
        let strokes: Vec<_> = surface.strokes().collect();
        assert_eq!(strokes.len(), 1);
        match strokes[0] {
            DrawCall::Stroke {
                color, composite, ..
            } => {
                assert_eq!(*color, Color::hsl(sim.hue(), brightness));
                assert_eq!(*composite, Composite::Lighter);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn arrival_bursts_at_target_with_current_hue() {
        let mut sim = seeded(4);
        let target = Point::new(120.0, 40.0);
        sim.launch(Point::new(120.0, 41.0), target);
        let mut surface = RecordingSurface::new(800.0, 600.0);

        let report = sim.tick(&mut surface);

        assert_eq!(report.bursts, 1);
        assert!(sim.projectiles().is_empty());
        // The new sparks were already advanced once this tick.
        assert_eq!(sim.sparks().len(), 40);
        assert!(sim.sparks().iter().all(|s| s.trail.newest() == target));
        let hue = sim.hue();
        assert!(
            sim.sparks()
                .iter()
                .all(|s| s.hue >= hue - 50.0 && s.hue < hue + 50.0)
        );
    }

    #[test]
    fn reverse_pass_removes_every_spent_spark() {
        let mut sim = seeded(5);
        let mut rng = Rng::with_seed(50);
        for _ in 0..5 {
            let mut spark = Spark::new(&mut rng, Point::new(10.0, 10.0), 0.0);
            spark.alpha = 0.0;
            sim.sparks_mut().push(spark);
        }
        let mut surface = RecordingSurface::new(100.0, 100.0);

        let report = sim.tick(&mut surface);

        assert_eq!(report.sparks_spent, 5);
        assert!(sim.sparks().is_empty());
        assert_eq!(surface.strokes().count(), 5);
    }

    #[test]
    fn reverse_pass_removes_every_arrived_projectile() {
        let mut sim = seeded(6);
        for x in 0..5 {
            let at = Point::new(x as f32 * 10.0, 50.0);
            sim.launch(at, at);
        }
        let mut surface = RecordingSurface::new(100.0, 100.0);

        let report = sim.tick(&mut surface);

        assert_eq!(report.bursts, 5);
        assert!(sim.projectiles().is_empty());
        assert_eq!(sim.sparks().len(), 200);
    }

    #[test]
    fn mixed_removal_keeps_survivors() {
        let mut sim = seeded(7);
        let mut rng = Rng::with_seed(70);
        for i in 0..6 {
            let mut spark = Spark::new(&mut rng, Point::new(i as f32, 0.0), 0.0);
            spark.alpha = if i % 2 == 0 { 0.0 } else { 1.0 };
            sim.sparks_mut().push(spark);
        }
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let report = sim.tick(&mut surface);

        assert_eq!(report.sparks_spent, 3);
        let mut origins: Vec<f32> = sim.sparks().iter().map(|s| s.trail.newest().x).collect();
        origins.sort_by(f32::total_cmp);
        assert_eq!(origins, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn timer_fires_once_it_reaches_the_interval() {
        let mut sim = seeded(8);
        let mut surface = RecordingSurface::new(800.0, 600.0);

        for tick in 1..=LAUNCH_INTERVAL {
            assert_eq!(sim.tick(&mut surface).launched, 0, "tick {tick}");
            assert_eq!(sim.timer(), tick);
        }
        let report = sim.tick(&mut surface);
        assert_eq!(report.launched, 1);
        assert_eq!(sim.timer(), 0);

        let shell = sim.projectiles().last().map(|p| (p.origin, p.target));
        let (origin, target) = shell.expect("a shell was launched");
        assert_eq!(origin, Point::new(400.0, 600.0));
        assert!((0.0..800.0).contains(&target.x));
        assert!((0.0..300.0).contains(&target.y));
    }

    #[test]
    fn timer_waits_while_pointer_is_held() {
        let mut sim = seeded(9);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        for _ in 0..LAUNCH_INTERVAL {
            sim.tick(&mut surface);
        }
        assert_eq!(sim.timer(), LAUNCH_INTERVAL);

        sim.pointer_mut().move_to(Point::new(10.0, 10.0));
        sim.pointer_mut().press();
        for _ in 0..3 {
            assert_eq!(sim.tick(&mut surface).launched, 1);
            assert_eq!(sim.timer(), LAUNCH_INTERVAL);
        }

        sim.pointer_mut().release();
        assert_eq!(sim.tick(&mut surface).launched, 1);
        assert_eq!(sim.timer(), 0);
    }

    #[test]
    fn held_pointer_without_position_does_not_launch() {
        let mut sim = seeded(10);
        sim.pointer_mut().press();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        assert_eq!(sim.tick(&mut surface).launched, 0);
        assert!(sim.projectiles().is_empty());
    }
}
