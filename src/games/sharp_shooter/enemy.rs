use crate::config::ShooterConfig;
use crate::sim::{Rect, Renderer, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Spawning,
    Idle,
    Aiming,
    Shooting,
    Dying,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyEvent {
    /// Emitted once on entering `Shooting`.
    Fire,
}

/// A pop-up target that cycles idle → aiming → shooting until it is shot.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    target_y: f64,
    start_y: f64,
    health: i32,
    max_health: i32,
    level: u32,
    state: EnemyState,
    state_timer: f64,
    idle_delay_offset: f64,
    first_idle: bool,
    progress: f64,
    has_shot: bool,
    flash_timer: f64,
}

impl Enemy {
    pub fn new(x: f64, y: f64, level: u32, idle_delay_offset: f64, cfg: &ShooterConfig) -> Self {
        let enemy = &cfg.enemy;
        let bonus = level.checked_div(enemy.levels_per_bonus_health).unwrap_or(0) as i32;
        let health = enemy.health + bonus;
        Self {
            x,
            y,
            width: enemy.width,
            height: enemy.height,
            target_y: y,
            start_y: y + enemy.popup_depth,
            health,
            max_health: health,
            level,
            state: EnemyState::Spawning,
            state_timer: 0.0,
            idle_delay_offset,
            first_idle: true,
            progress: 0.0,
            has_shot: false,
            flash_timer: 0.0,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f64, f64) {
        self.bounds().center()
    }

    /// How long this enemy waits in `Idle` before aiming.
    pub fn aim_delay(&self, cfg: &ShooterConfig) -> f64 {
        let reduced = cfg.enemy.aim_delay - self.level as f64 * cfg.waves.aim_delay_reduction_per_level;
        let mut delay = reduced.max(cfg.waves.min_aim_delay) + self.idle_delay_offset;
        if self.first_idle {
            delay += cfg.enemy.initial_grace_period;
        }
        delay
    }

    pub fn update(&mut self, dt: f64, cfg: &ShooterConfig) -> Option<EnemyEvent> {
        self.state_timer += dt;

        match self.state {
            EnemyState::Spawning => self.update_spawning(cfg),
            EnemyState::Idle => self.update_idle(cfg),
            EnemyState::Aiming => self.update_aiming(cfg),
            // Shooting returns straight away; the flash timer holds meanwhile.
            EnemyState::Shooting => return self.update_shooting(cfg),
            EnemyState::Dying => self.update_dying(cfg),
            EnemyState::Dead => {}
        }

        if self.flash_timer > 0.0 {
            self.flash_timer -= dt;
        }
        None
    }

    fn enter(&mut self, state: EnemyState) {
        self.state = state;
        self.state_timer = 0.0;
        self.progress = 0.0;
    }

    fn update_spawning(&mut self, cfg: &ShooterConfig) {
        self.progress = (self.state_timer / cfg.enemy.popup_duration).min(1.0);
        let eased = 1.0 - (1.0 - self.progress).powi(3);
        self.y = self.start_y + (self.target_y - self.start_y) * eased;

        if self.progress >= 1.0 {
            self.state = EnemyState::Idle;
            self.state_timer = 0.0;
        }
    }

    fn update_idle(&mut self, cfg: &ShooterConfig) {
        if self.state_timer >= self.aim_delay(cfg) {
            self.enter(EnemyState::Aiming);
            self.first_idle = false;
        }
    }

    fn update_aiming(&mut self, cfg: &ShooterConfig) {
        self.progress = (self.state_timer / cfg.enemy.aiming_duration).min(1.0);
        if self.progress >= 1.0 {
            self.enter(EnemyState::Shooting);
        }
    }

    fn update_shooting(&mut self, cfg: &ShooterConfig) -> Option<EnemyEvent> {
        if !self.has_shot {
            self.has_shot = true;
            return Some(EnemyEvent::Fire);
        }

        self.progress = (self.state_timer / cfg.enemy.shoot_animation_duration).min(1.0);
        if self.progress >= 1.0 {
            self.state = EnemyState::Idle;
            self.state_timer = 0.0;
            self.has_shot = false;
        }
        None
    }

    fn update_dying(&mut self, cfg: &ShooterConfig) {
        self.progress = (self.state_timer / cfg.enemy.death_animation_duration).min(1.0);
        if self.progress >= 1.0 {
            self.state = EnemyState::Dead;
        }
    }

    /// Returns true when the hit was lethal.
    pub fn take_damage(&mut self, amount: i32, cfg: &ShooterConfig) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health -= amount;
        self.flash_timer = cfg.effects.hit_indicator_duration;

        if self.health <= 0 {
            self.enter(EnemyState::Dying);
            return true;
        }
        false
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.is_alive() && self.bounds().contains(x, y)
    }

    pub fn is_alive(&self) -> bool {
        !matches!(self.state, EnemyState::Dying | EnemyState::Dead)
    }

    pub fn should_remove(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn draw(&self, r: &mut dyn Renderer, cfg: &ShooterConfig) {
        if self.state == EnemyState::Dead {
            return;
        }
        let colors = &cfg.enemy;
        let backdrop = cfg.background.ground_color;
        let alpha = if self.state == EnemyState::Dying { 1.0 - self.progress } else { 1.0 };
        let tint = |c: Rgb| c.with_alpha(alpha, backdrop);
        let (x, y, w) = (self.x, self.y, self.width);

        if self.state == EnemyState::Aiming {
            let pulse = 0.5 + 0.5 * (self.state_timer / 100.0).sin();
            r.stroke_rect(
                self.bounds().inflate(5.0),
                colors.aiming_glow_color.with_alpha(0.3 + 0.7 * pulse, backdrop),
            );
        }

        if self.flash_timer > 0.0 {
            r.fill_rect(self.bounds(), tint(colors.damage_flash_color));
        }

        let body = tint(colors.body_color);
        r.circle(x + w / 2.0, y + 20.0, 15.0, body, true);
        r.fill_rect(Rect::new(x + 20.0, y + 35.0, 40.0, 50.0), body);

        let raised = matches!(self.state, EnemyState::Aiming | EnemyState::Shooting);
        let arm_y = if raised { y + 40.0 } else { y + 50.0 };
        r.fill_rect(Rect::new(x + 10.0, arm_y, 15.0, 30.0), body);
        r.fill_rect(Rect::new(x + 55.0, arm_y, 15.0, 30.0), body);
        if raised {
            r.fill_rect(Rect::new(x + 35.0, y + 35.0, 10.0, 20.0), tint(colors.highlight_color));
        }

        if self.state == EnemyState::Shooting && self.state_timer < cfg.effects.muzzle_flash_duration {
            r.circle(x + w / 2.0, y + 40.0, 10.0, Rgb(0xFF, 0xFF, 0x00), true);
        }

        if self.health < self.max_health {
            let pct = (self.health.max(0) as f64) / self.max_health as f64;
            r.fill_rect(Rect::new(x, y - 10.0, w, 5.0), Rgb(0x33, 0x33, 0x33));
            let bar = if pct > 0.5 { Rgb(0x4A, 0xDE, 0x80) } else { Rgb(0xEF, 0x44, 0x44) };
            r.fill_rect(Rect::new(x, y - 10.0, w * pct, 5.0), bar);
        }
    }
}
