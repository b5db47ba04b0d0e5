use rand::Rng;
use tracing::{debug, info};

use crate::config::{Point, ShooterConfig};
use crate::games::sharp_shooter::bullet::Bullet;
use crate::games::sharp_shooter::enemy::{Enemy, EnemyEvent};
use crate::sim::Renderer;

/// Owns the enemies of the current wave.
#[derive(Debug, Clone)]
pub struct WaveManager {
    level: u32,
    enemies: Vec<Enemy>,
    active: bool,
    complete: bool,
}

pub fn enemy_count(level: u32, cfg: &ShooterConfig) -> usize {
    let waves = &cfg.waves;
    let count = (waves.base_enemies + level as f64 * waves.enemies_per_level).floor().max(0.0) as usize;
    count.min(waves.max_enemies_per_wave)
}

/// Draws up to `count` distinct points from `pool`, without replacement.
pub fn select_spawn_positions<R: Rng>(pool: &[Point], count: usize, rng: &mut R) -> Vec<Point> {
    let mut available = pool.to_vec();
    let mut selected = Vec::with_capacity(count.min(pool.len()));
    while selected.len() < count && !available.is_empty() {
        let i = rng.gen_range(0..available.len());
        selected.push(available.remove(i));
    }
    selected
}

impl WaveManager {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            enemies: Vec::new(),
            active: false,
            complete: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn next_level(&mut self) {
        self.level += 1;
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn start_wave<R: Rng>(&mut self, cfg: &ShooterConfig, rng: &mut R) {
        let count = enemy_count(self.level, cfg);
        let positions = select_spawn_positions(&cfg.waves.spawn_positions, count, rng);

        self.enemies = positions
            .into_iter()
            .map(|p| {
                let offset = rng.gen::<f64>() * cfg.enemy.idle_delay_variance;
                Enemy::new(p.x, p.y, self.level, offset, cfg)
            })
            .collect();
        self.active = true;
        self.complete = false;

        info!(level = self.level, enemies = self.enemies.len(), "wave started");
    }

    /// Advances every enemy and returns the bullets fired this step.
    pub fn update(&mut self, dt: f64, cfg: &ShooterConfig) -> Vec<Bullet> {
        if !self.active {
            return Vec::new();
        }

        let aim = cfg.waves.aim_point;
        let mut bullets = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.update(dt, cfg) == Some(EnemyEvent::Fire) {
                let (cx, cy) = enemy.center();
                bullets.push(Bullet::toward(cx, cy, aim.x, aim.y, cfg.bullet.speed));
            }
        }

        self.enemies.retain(|e| !e.should_remove());

        if self.enemies.is_empty() {
            self.complete = true;
            self.active = false;
            info!(level = self.level, "wave complete");
        }
        bullets
    }

    /// Damages the first enemy under the point, in spawn order. Returns the
    /// points earned, which are only awarded for a kill.
    pub fn handle_click(&mut self, x: f64, y: f64, cfg: &ShooterConfig) -> u32 {
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.contains_point(x, y)) else {
            return 0;
        };
        if enemy.take_damage(1, cfg) {
            debug!(x = enemy.x, y = enemy.y, "enemy killed");
            cfg.enemy.points
        } else {
            0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn remaining_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn draw(&self, r: &mut dyn Renderer, cfg: &ShooterConfig) {
        for enemy in &self.enemies {
            enemy.draw(r, cfg);
        }
    }
}
