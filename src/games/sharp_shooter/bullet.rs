use crate::config::{CanvasConfig, ShooterConfig};
use crate::sim::geometry::distance;
use crate::sim::{Renderer, Rgb};

/// An enemy shot travelling in a straight line at the player.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
    rotation: f64,
}

impl Bullet {
    pub fn toward(x: f64, y: f64, target_x: f64, target_y: f64, speed: f64) -> Self {
        let dx = target_x - x;
        let dy = target_y - y;
        let len = dx.hypot(dy);
        let (vx, vy) = if len > 0.0 {
            (dx / len * speed, dy / len * speed)
        } else {
            (0.0, 0.0)
        };
        Self {
            x,
            y,
            vx,
            vy,
            rotation: dy.atan2(dx),
        }
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    /// Advances by `frames` 60 Hz frames.
    pub fn update(&mut self, frames: f64) {
        self.x += self.vx * frames;
        self.y += self.vy * frames;
    }

    pub fn is_off_screen(&self, canvas: &CanvasConfig, margin: f64) -> bool {
        self.x < -margin || self.x > canvas.width + margin || self.y < -margin || self.y > canvas.height + margin
    }

    pub fn hits_player(&self, cfg: &ShooterConfig) -> bool {
        let aim = cfg.waves.aim_point;
        distance(self.x, self.y, aim.x, aim.y) < cfg.waves.hit_radius
    }

    pub fn draw(&self, r: &mut dyn Renderer, cfg: &ShooterConfig) {
        let (hw, hh) = (cfg.bullet.width / 2.0, cfg.bullet.height / 2.0);
        let (sin, cos) = self.rotation.sin_cos();
        let corner = |lx: f64, ly: f64| (self.x + lx * cos - ly * sin, self.y + lx * sin + ly * cos);
        let outline = [corner(-hw, -hh), corner(hw, -hh), corner(hw, hh), corner(-hw, hh)];
        r.circle(self.x, self.y, hw.max(hh), cfg.bullet.glow, false);
        r.path(&outline, cfg.bullet.color, true);
        r.path(&[corner(hw - 1.5, -hh), corner(hw - 1.5, hh)], Rgb(0xFF, 0xAA, 0x00), false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_is_normalized_and_scaled() {
        let b = Bullet::toward(0.0, 0.0, 30.0, 40.0, 5.0);
        let (vx, vy) = b.velocity();
        assert!((vx - 3.0).abs() < 1e-12);
        assert!((vy - 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_direction_stays_put() {
        let mut b = Bullet::toward(10.0, 10.0, 10.0, 10.0, 5.0);
        b.update(10.0);
        assert_eq!((b.x, b.y), (10.0, 10.0));
    }

    #[test]
    fn reaches_the_player_anchor() {
        let cfg = ShooterConfig::default();
        let mut b = Bullet::toward(140.0, 450.0, 400.0, 550.0, cfg.bullet.speed);
        let mut frames = 0;
        while !b.hits_player(&cfg) {
            b.update(1.0);
            frames += 1;
            assert!(frames < 200, "bullet never arrived");
        }
        // ~278.6 units away, 5 per frame, hit radius 30.
        assert_eq!(frames, 50);
    }

    #[test]
    fn off_screen_uses_margin() {
        let canvas = CanvasConfig::default();
        let mut b = Bullet::toward(400.0, 300.0, 400.0, 2000.0, 10.0);
        assert!(!b.is_off_screen(&canvas, 50.0));
        b.y = 649.0;
        assert!(!b.is_off_screen(&canvas, 50.0));
        b.y = 651.0;
        assert!(b.is_off_screen(&canvas, 50.0));
    }
}
