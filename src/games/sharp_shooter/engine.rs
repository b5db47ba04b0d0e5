use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::GameError;
use crate::games::sharp_shooter::bullet::Bullet;
use crate::games::sharp_shooter::wave::WaveManager;
use crate::sim::{
    self, check_elapsed, Banner, GameEvent, Lifecycle, Rect, Renderer, Rgb, Session, TickReport, UiReport,
};

/// Headless Sharp Shooter: waves of pop-up enemies shooting at a fixed
/// player anchor.
pub struct ShooterEngine {
    config: Arc<Config>,
    rng: StdRng,
    session: Session,
    lifecycle: Lifecycle,
    waves: WaveManager,
    bullets: Vec<Bullet>,
    banner_timer: Option<f64>,
    stars: Vec<(f64, f64, f64, f64)>,
}

impl ShooterEngine {
    pub fn new(config: Arc<Config>, mut rng: StdRng) -> Self {
        let bg = &config.shooter.background;
        let stars = sim::starfield(&mut rng, bg.star_count, config.canvas.width, bg.horizon_y);
        Self {
            session: Session::new(&config.game),
            lifecycle: Lifecycle::NotStarted,
            waves: WaveManager::new(1),
            bullets: Vec::new(),
            banner_timer: None,
            stars,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn waves(&self) -> &WaveManager {
        &self.waves
    }

    pub fn start(&mut self) {
        self.reset();
        self.lifecycle = Lifecycle::Running;
        self.waves.start_wave(&self.config.shooter, &mut self.rng);
        info!("sharp shooter started");
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.bullets.clear();
        self.waves = WaveManager::new(self.session.level);
        self.banner_timer = None;
    }

    pub fn stop(&mut self) {
        if self.lifecycle != Lifecycle::NotStarted {
            info!(score = self.session.score, "sharp shooter stopped");
        }
        self.lifecycle = Lifecycle::NotStarted;
    }

    pub fn toggle_pause(&mut self) {
        self.lifecycle = self.lifecycle.toggled();
    }

    pub fn tick(&mut self, elapsed_ms: f64) -> Result<TickReport, GameError> {
        let dt = check_elapsed(elapsed_ms)?;
        let mut events = Vec::new();
        if !self.lifecycle.is_running() {
            return Ok(TickReport { ui: self.report(), events });
        }

        // Everything holds still while the banner is up.
        if let Some(remaining) = self.banner_timer.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.banner_timer = None;
                self.start_next_wave(&mut events);
            }
            return Ok(TickReport { ui: self.report(), events });
        }

        let fired = self.waves.update(dt, &self.config.shooter);
        events.extend(fired.iter().map(|_| GameEvent::EnemyFired));
        self.bullets.extend(fired);

        self.update_bullets(dt, &mut events);

        if self.waves.is_complete() {
            self.banner_timer = Some(self.config.shooter.waves.banner_duration);
            events.push(GameEvent::WaveComplete);
        }

        if self.session.is_out_of_lives() {
            self.lifecycle = Lifecycle::GameOver;
            events.push(GameEvent::GameOver);
            info!(score = self.session.score, level = self.session.level, "sharp shooter game over");
        }

        Ok(TickReport { ui: self.report(), events })
    }

    fn update_bullets(&mut self, dt: f64, events: &mut Vec<GameEvent>) {
        let config = &self.config;
        let session = &mut self.session;
        let frames = dt / config.frame_ms();
        // Sub-step so a long frame can't carry a bullet through the hit radius.
        let steps = frames.ceil().max(1.0) as usize;
        let per_step = frames / steps as f64;

        self.bullets.retain_mut(|bullet| {
            for _ in 0..steps {
                bullet.update(per_step);
                if bullet.hits_player(&config.shooter) {
                    events.push(GameEvent::PlayerHit);
                    if session.damage(config.shooter.enemy.damage) {
                        events.push(GameEvent::LifeLost);
                        debug!(lives = session.lives, "life lost");
                    }
                    return false;
                }
                if bullet.is_off_screen(&config.canvas, config.shooter.bullet.offscreen_margin) {
                    return false;
                }
            }
            true
        });
    }

    fn start_next_wave(&mut self, events: &mut Vec<GameEvent>) {
        self.session.level += 1;
        self.waves.next_level();
        self.waves.start_wave(&self.config.shooter, &mut self.rng);
        events.push(GameEvent::LevelUp(self.session.level));
        events.push(GameEvent::WaveStarted(self.session.level));
    }

    /// Fires at `(x, y)`. Returns the points earned. Shots are ignored
    /// unless the game is running.
    pub fn handle_shot(&mut self, x: f64, y: f64) -> Result<u32, GameError> {
        let canvas = &self.config.canvas;
        let in_bounds = x.is_finite() && y.is_finite() && (0.0..=canvas.width).contains(&x) && (0.0..=canvas.height).contains(&y);
        if !in_bounds {
            return Err(GameError::PointOutOfBounds { x, y });
        }
        if !self.lifecycle.is_running() {
            return Ok(0);
        }
        let points = self.waves.handle_click(x, y, &self.config.shooter);
        self.session.add_score(points);
        Ok(points)
    }

    pub fn report(&self) -> UiReport {
        let mut ui = UiReport::from_session(&self.session, self.lifecycle);
        ui.remaining_enemies = Some(self.waves.remaining_enemies());
        ui.banner = self.banner_timer.map(|_| Banner::WaveComplete {
            next_level: self.session.level + 1,
        });
        ui
    }

    pub fn draw(&self, r: &mut dyn Renderer, crosshair: (f64, f64)) {
        let cfg = &self.config;
        let (w, h) = (cfg.canvas.width, cfg.canvas.height);
        let bg = &cfg.shooter.background;

        r.fill_rect(Rect::new(0.0, 0.0, w, bg.horizon_y), bg.sky_color);
        r.fill_rect(Rect::new(0.0, bg.horizon_y, w, h - bg.horizon_y), bg.ground_color);
        for &(x, y, size, brightness) in &self.stars {
            if size > 1.0 {
                r.circle(x, y, size / 2.0, Rgb::WHITE.with_alpha(brightness, bg.sky_color), false);
            }
        }
        r.path(&[(0.0, bg.horizon_y), (w, bg.horizon_y)], Rgb(0x55, 0x55, 0x55), false);

        self.waves.draw(r, &cfg.shooter);
        for bullet in &self.bullets {
            bullet.draw(r, &cfg.shooter);
        }

        let fx = &cfg.shooter.effects;
        let (cx, cy) = crosshair;
        let size = fx.crosshair_size;
        r.circle(cx, cy, size / 2.0, fx.crosshair_color, false);
        r.path(&[(cx - size, cy), (cx - size / 2.0, cy)], fx.crosshair_color, false);
        r.path(&[(cx + size / 2.0, cy), (cx + size, cy)], fx.crosshair_color, false);
        r.path(&[(cx, cy - size), (cx, cy - size / 2.0)], fx.crosshair_color, false);
        r.path(&[(cx, cy + size / 2.0), (cx, cy + size)], fx.crosshair_color, false);

        if self.banner_timer.is_some() {
            r.fill_rect(Rect::new(w * 0.2, h / 2.0 - 70.0, w * 0.6, 120.0), Rgb(0x10, 0x10, 0x18));
            r.text(w / 2.0, h / 2.0 - 30.0, "WAVE COMPLETE!", Rgb::WHITE);
            r.text(w / 2.0, h / 2.0 + 20.0, &format!("Next: Level {}", self.session.level + 1), Rgb::WHITE);
        }

        if self.lifecycle == Lifecycle::Paused {
            r.fill_rect(Rect::new(w * 0.3, h / 2.0 - 40.0, w * 0.4, 80.0), Rgb(0x10, 0x10, 0x18));
            r.text(w / 2.0, h / 2.0, "PAUSED", Rgb::WHITE);
        }
    }
}
