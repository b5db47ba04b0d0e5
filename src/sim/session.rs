use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl Lifecycle {
    pub fn is_running(self) -> bool {
        self == Lifecycle::Running
    }

    /// Running and Paused swap; every other state ignores the toggle.
    pub fn toggled(self) -> Lifecycle {
        match self {
            Lifecycle::Running => Lifecycle::Paused,
            Lifecycle::Paused => Lifecycle::Running,
            other => other,
        }
    }
}

/// Score, lives, level and health for one play session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    health: i32,
    max_health: i32,
    initial_health: i32,
    initial_lives: u32,
}

impl Session {
    pub fn new(game: &GameConfig) -> Self {
        Self {
            score: 0,
            lives: game.initial_lives,
            level: 1,
            health: game.initial_health,
            max_health: game.max_health,
            initial_health: game.initial_health,
            initial_lives: game.initial_lives,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.initial_lives;
        self.level = 1;
        self.health = self.initial_health;
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Returns true when this hit emptied the health bar. That costs
    /// exactly one life and refills health to max.
    pub fn damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        if self.health <= 0 {
            self.health = self.max_health;
            self.lives = self.lives.saturating_sub(1);
            true
        } else {
            self.health = self.health.min(self.max_health);
            false
        }
    }

    pub fn lose_lives(&mut self, count: u32) {
        self.lives = self.lives.saturating_sub(count);
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    pub fn health_percent(&self) -> u8 {
        let pct = (self.health as f64 / self.max_health as f64 * 100.0).max(0.0);
        pct.round().min(100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Normal,
    Low,
    Critical,
}

impl HealthBand {
    pub fn from_percent(pct: u8) -> Self {
        if pct <= 25 {
            HealthBand::Critical
        } else if pct <= 50 {
            HealthBand::Low
        } else {
            HealthBand::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    WaveComplete { next_level: u32 },
}

/// What the status bar shows after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct UiReport {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub health_percent: u8,
    pub health_band: HealthBand,
    pub remaining_enemies: Option<usize>,
    pub lifecycle: Lifecycle,
    pub banner: Option<Banner>,
}

impl UiReport {
    pub fn from_session(session: &Session, lifecycle: Lifecycle) -> Self {
        let health_percent = session.health_percent();
        Self {
            score: session.score,
            lives: session.lives,
            level: session.level,
            health_percent,
            health_band: HealthBand::from_percent(health_percent),
            remaining_enemies: None,
            lifecycle,
            banner: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    StarCaught,
    StarMissed,
    MeteorHit,
    EnemyFired,
    PlayerHit,
    LifeLost,
    LevelUp(u32),
    WaveStarted(u32),
    WaveComplete,
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub ui: UiReport,
    pub events: Vec<GameEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&GameConfig::default())
    }

    #[test]
    fn damage_crossing_costs_exactly_one_life() {
        let mut s = session();
        assert!(!s.damage(90));
        assert_eq!(s.health(), 10);
        assert_eq!(s.lives, 3);

        // Overshooting far below zero is still one crossing.
        assert!(s.damage(500));
        assert_eq!(s.health(), 100);
        assert_eq!(s.lives, 2);
    }

    #[test]
    fn exact_zero_counts_as_depleted() {
        let mut s = session();
        assert!(s.damage(100));
        assert_eq!(s.lives, 2);
        assert_eq!(s.health(), 100);
    }

    #[test]
    fn heal_is_capped() {
        let mut s = session();
        s.damage(30);
        s.heal(15);
        assert_eq!(s.health(), 85);
        s.heal(50);
        assert_eq!(s.health(), 100);
    }

    #[test]
    fn lives_saturate() {
        let mut s = session();
        s.lose_lives(10);
        assert_eq!(s.lives, 0);
        assert!(s.is_out_of_lives());
        assert!(s.damage(100));
        assert_eq!(s.lives, 0);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut s = session();
        s.add_score(250);
        s.level = 4;
        s.lose_lives(2);
        s.damage(40);
        s.reset();
        assert_eq!(s, session());
    }

    #[test]
    fn health_bands_follow_percent() {
        assert_eq!(HealthBand::from_percent(100), HealthBand::Normal);
        assert_eq!(HealthBand::from_percent(51), HealthBand::Normal);
        assert_eq!(HealthBand::from_percent(50), HealthBand::Low);
        assert_eq!(HealthBand::from_percent(25), HealthBand::Critical);
        assert_eq!(HealthBand::from_percent(0), HealthBand::Critical);
    }

    #[test]
    fn toggle_only_between_running_and_paused() {
        assert_eq!(Lifecycle::Running.toggled(), Lifecycle::Paused);
        assert_eq!(Lifecycle::Paused.toggled(), Lifecycle::Running);
        assert_eq!(Lifecycle::NotStarted.toggled(), Lifecycle::NotStarted);
        assert_eq!(Lifecycle::GameOver.toggled(), Lifecycle::GameOver);
    }
}
