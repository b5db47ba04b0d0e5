use std::f64::consts::PI;

use rand::Rng;

use crate::config::CatcherConfig;
use crate::sim::{Rect, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallingKind {
    /// Worth points and health when caught; costs health when missed.
    Star,
    /// Costs lives when caught.
    Meteor,
}

#[derive(Debug, Clone)]
pub struct FallingObject {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub kind: FallingKind,
    rotation: f64,
    rotation_speed: f64,
}

impl FallingObject {
    pub fn new(x: f64, y: f64, kind: FallingKind, speed: f64, rotation_speed: f64, cfg: &CatcherConfig) -> Self {
        let (width, height) = match kind {
            FallingKind::Star => (cfg.star.width, cfg.star.height),
            FallingKind::Meteor => (cfg.meteor.width, cfg.meteor.height),
        };
        Self {
            x,
            y,
            width,
            height,
            speed,
            kind,
            rotation: 0.0,
            rotation_speed,
        }
    }

    pub fn update(&mut self, frames: f64) {
        self.y += self.speed * frames;
        self.rotation += self.rotation_speed * frames;
    }

    pub fn is_off_screen(&self, field_height: f64) -> bool {
        self.y > field_height
    }

    pub fn center(&self) -> (f64, f64) {
        Rect::new(self.x, self.y, self.width, self.height).center()
    }

    pub fn center_in(&self, bounds: &Rect) -> bool {
        let (cx, cy) = self.center();
        bounds.contains_strict(cx, cy)
    }

    pub fn draw(&self, r: &mut dyn Renderer, cfg: &CatcherConfig) {
        let (cx, cy) = self.center();
        match self.kind {
            FallingKind::Star => {
                let outer = self.width / 2.0;
                let inner = outer / 2.0;
                let points: Vec<(f64, f64)> = (0..10)
                    .map(|i| {
                        let radius = if i % 2 == 0 { outer } else { inner };
                        let angle = self.rotation + i as f64 * PI / 5.0;
                        (cx + angle.cos() * radius, cy + angle.sin() * radius)
                    })
                    .collect();
                r.path(&points, cfg.star.color, true);
            }
            FallingKind::Meteor => {
                let radius = self.width / 2.0;
                r.circle(cx, cy, radius, cfg.meteor.color, true);
                let (sin, cos) = self.rotation.sin_cos();
                let spin = |dx: f64, dy: f64| (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos);
                let (ax, ay) = spin(-5.0, -5.0);
                let (bx, by) = spin(5.0, 3.0);
                r.circle(ax, ay, radius / 4.0, cfg.meteor.crater_color, true);
                r.circle(bx, by, radius / 5.0, cfg.meteor.crater_color, true);
            }
        }
    }
}

/// Decides what falls, where, and how often. The engine owns the objects.
pub struct Spawner<'a> {
    cfg: &'a CatcherConfig,
    field_width: f64,
}

impl<'a> Spawner<'a> {
    pub fn new(cfg: &'a CatcherConfig, field_width: f64) -> Self {
        Self { cfg, field_width }
    }

    pub fn speed_for(&self, level: u32) -> f64 {
        let objects = &self.cfg.objects;
        objects.initial_speed + level.saturating_sub(1) as f64 * objects.speed_increase_per_level
    }

    pub fn interval_frames(&self, level: u32) -> u32 {
        let objects = &self.cfg.objects;
        let reduced = objects
            .spawn_rate
            .saturating_sub(level.saturating_mul(objects.spawn_rate_reduction_per_level));
        reduced.max(objects.min_spawn_rate)
    }

    pub fn spawn<R: Rng>(&self, level: u32, rng: &mut R) -> FallingObject {
        let span = (self.field_width - self.cfg.objects.spawn_margin).max(0.0);
        let x = rng.gen::<f64>() * span;
        let kind = if rng.gen::<f64>() < self.cfg.star.spawn_chance {
            FallingKind::Star
        } else {
            FallingKind::Meteor
        };
        let rotation_speed = rng.gen::<f64>() * 0.1 - 0.05;
        FallingObject::new(x, self.cfg.objects.spawn_y, kind, self.speed_for(level), rotation_speed, self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sizes_follow_kind() {
        let cfg = CatcherConfig::default();
        let star = FallingObject::new(0.0, 0.0, FallingKind::Star, 2.0, 0.0, &cfg);
        let meteor = FallingObject::new(0.0, 0.0, FallingKind::Meteor, 2.0, 0.0, &cfg);
        assert_eq!((star.width, star.height), (30.0, 30.0));
        assert_eq!((meteor.width, meteor.height), (35.0, 35.0));
    }

    #[test]
    fn speed_and_interval_scale_with_level() {
        let cfg = CatcherConfig::default();
        let spawner = Spawner::new(&cfg, 800.0);
        assert_eq!(spawner.speed_for(1), 2.0);
        assert_eq!(spawner.speed_for(3), 3.0);
        assert_eq!(spawner.interval_frames(1), 55);
        assert_eq!(spawner.interval_frames(8), 20);
        assert_eq!(spawner.interval_frames(100), 20);
    }

    #[test]
    fn spawns_inside_the_margin_with_both_kinds() {
        let cfg = CatcherConfig::default();
        let spawner = Spawner::new(&cfg, 800.0);
        let mut rng = StdRng::seed_from_u64(99);
        let mut stars = 0;
        for _ in 0..1000 {
            let obj = spawner.spawn(1, &mut rng);
            assert!((0.0..750.0).contains(&obj.x));
            assert_eq!(obj.y, -50.0);
            if obj.kind == FallingKind::Star {
                stars += 1;
            }
        }
        // 70% stars, give or take.
        assert!((600..800).contains(&stars), "stars = {stars}");
    }

    #[test]
    fn centre_test_is_strict() {
        let cfg = CatcherConfig::default();
        let bounds = Rect::new(370.0, 520.0, 60.0, 60.0);
        let mut star = FallingObject::new(355.0, 540.0, FallingKind::Star, 2.0, 0.0, &cfg);
        // Centre exactly on the left edge.
        assert!(!star.center_in(&bounds));
        star.x = 356.0;
        assert!(star.center_in(&bounds));
    }

    #[test]
    fn falls_and_leaves_the_screen() {
        let cfg = CatcherConfig::default();
        let mut obj = FallingObject::new(0.0, 590.0, FallingKind::Meteor, 5.0, 0.0, &cfg);
        assert!(!obj.is_off_screen(600.0));
        obj.update(2.0);
        assert!(!obj.is_off_screen(600.0));
        obj.update(0.5);
        assert!(obj.is_off_screen(600.0));
    }
}
