use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::sim::draw::Rgb;

/// Every tunable of both games. Each table falls back to its defaults, so a
/// config file only needs the keys it wants to change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub game: GameConfig,
    pub shooter: ShooterConfig,
    pub catcher: CatcherConfig,
    pub input: InputConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return invalid("canvas dimensions must be positive");
        }
        if self.game.fps <= 0.0 {
            return invalid("game.fps must be positive");
        }
        if self.game.max_health <= 0 {
            return invalid("game.max_health must be positive");
        }
        if self.game.initial_health <= 0 || self.game.initial_health > self.game.max_health {
            return invalid("game.initial_health must be in 1..=max_health");
        }
        if self.game.initial_lives == 0 {
            return invalid("game.initial_lives must be at least 1");
        }
        if self.game.points_per_level == 0 {
            return invalid("game.points_per_level must be positive");
        }
        if self.shooter.waves.spawn_positions.is_empty() {
            return invalid("shooter.waves.spawn_positions must not be empty");
        }
        if self.shooter.enemy.popup_duration <= 0.0 {
            return invalid("shooter.enemy.popup_duration must be positive");
        }
        if !(0.0..=1.0).contains(&self.catcher.star.spawn_chance) {
            return invalid("catcher.star.spawn_chance must be within [0, 1]");
        }
        if self.catcher.objects.min_spawn_rate == 0 {
            return invalid("catcher.objects.min_spawn_rate must be at least one frame");
        }
        Ok(())
    }

    /// Milliseconds per simulation frame. Speeds in the config are per frame.
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.game.fps
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub initial_lives: u32,
    pub max_health: i32,
    pub initial_health: i32,
    pub points_per_level: u32,
    pub fps: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            max_health: 100,
            initial_health: 100,
            points_per_level: 100,
            fps: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ── Sharp Shooter ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    pub waves: WaveConfig,
    pub effects: EffectsConfig,
    pub background: ShooterBackground,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f64,
    pub height: f64,
    pub health: i32,
    /// Enemies gain one extra hit point every this many levels.
    pub levels_per_bonus_health: u32,
    pub damage: i32,
    pub points: u32,
    /// Distance below the target position the popup animation starts from.
    pub popup_depth: f64,
    pub popup_duration: f64,
    pub aim_delay: f64,
    pub aiming_duration: f64,
    pub shoot_animation_duration: f64,
    pub death_animation_duration: f64,
    pub initial_grace_period: f64,
    pub idle_delay_variance: f64,
    pub body_color: Rgb,
    pub highlight_color: Rgb,
    pub damage_flash_color: Rgb,
    pub aiming_glow_color: Rgb,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 100.0,
            health: 1,
            levels_per_bonus_health: 5,
            damage: 10,
            points: 10,
            popup_depth: 150.0,
            popup_duration: 400.0,
            aim_delay: 3000.0,
            aiming_duration: 1200.0,
            shoot_animation_duration: 200.0,
            death_animation_duration: 300.0,
            initial_grace_period: 1500.0,
            idle_delay_variance: 2000.0,
            body_color: Rgb(0x4A, 0x4A, 0x4A),
            highlight_color: Rgb(0x66, 0x66, 0x66),
            damage_flash_color: Rgb(0xFF, 0x00, 0x00),
            aiming_glow_color: Rgb(0xFF, 0x66, 0x00),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f64,
    pub height: f64,
    /// Units per frame.
    pub speed: f64,
    pub offscreen_margin: f64,
    pub color: Rgb,
    pub glow: Rgb,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 12.0,
            speed: 5.0,
            offscreen_margin: 50.0,
            color: Rgb(0xFF, 0x44, 0x44),
            glow: Rgb(0xFF, 0x66, 0x66),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_enemies: f64,
    pub enemies_per_level: f64,
    pub max_enemies_per_wave: usize,
    pub spawn_positions: Vec<Point>,
    pub aim_delay_reduction_per_level: f64,
    pub min_aim_delay: f64,
    pub banner_duration: f64,
    /// Where enemy bullets are aimed and where the player is hit.
    pub aim_point: Point,
    pub hit_radius: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_enemies: 2.0,
            enemies_per_level: 1.5,
            max_enemies_per_wave: 12,
            spawn_positions: vec![
                Point::new(100.0, 400.0),
                Point::new(250.0, 400.0),
                Point::new(400.0, 400.0),
                Point::new(550.0, 400.0),
                Point::new(700.0, 400.0),
                Point::new(150.0, 250.0),
                Point::new(350.0, 250.0),
                Point::new(450.0, 250.0),
                Point::new(650.0, 250.0),
                Point::new(300.0, 100.0),
                Point::new(500.0, 100.0),
                Point::new(700.0, 100.0),
            ],
            aim_delay_reduction_per_level: 100.0,
            min_aim_delay: 500.0,
            banner_duration: 2000.0,
            aim_point: Point::new(400.0, 550.0),
            hit_radius: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub muzzle_flash_duration: f64,
    pub hit_indicator_duration: f64,
    pub crosshair_size: f64,
    pub crosshair_color: Rgb,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            muzzle_flash_duration: 100.0,
            hit_indicator_duration: 200.0,
            crosshair_size: 40.0,
            crosshair_color: Rgb(0xFF, 0x30, 0x30),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShooterBackground {
    pub sky_color: Rgb,
    pub ground_color: Rgb,
    pub horizon_y: f64,
    pub star_count: usize,
}

impl Default for ShooterBackground {
    fn default() -> Self {
        Self {
            sky_color: Rgb(0x87, 0xCE, 0xEB),
            ground_color: Rgb(0x8B, 0x73, 0x55),
            horizon_y: 200.0,
            star_count: 50,
        }
    }
}

// ── Star Catcher ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatcherConfig {
    pub player: PlayerConfig,
    pub star: StarConfig,
    pub meteor: MeteorConfig,
    pub objects: ObjectsConfig,
    pub background: CatcherBackground,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    /// Units per frame.
    pub speed: f64,
    pub start_x: f64,
    pub start_y: f64,
    /// Horizontal inset of the catching box from the basket edges.
    pub catch_inset: f64,
    pub color: Rgb,
    pub trim_color: Rgb,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 60.0,
            speed: 7.0,
            start_x: 360.0,
            start_y: 520.0,
            catch_inset: 10.0,
            color: Rgb(0xFF, 0xD7, 0x00),
            trim_color: Rgb(0xB8, 0x86, 0x0B),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub width: f64,
    pub height: f64,
    pub points: u32,
    pub health_restore: i32,
    pub health_penalty_missed: i32,
    pub spawn_chance: f64,
    pub color: Rgb,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 30.0,
            points: 10,
            health_restore: 15,
            health_penalty_missed: 20,
            spawn_chance: 0.7,
            color: Rgb(0xFF, 0xD7, 0x00),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeteorConfig {
    pub width: f64,
    pub height: f64,
    pub damage: u32,
    pub color: Rgb,
    pub crater_color: Rgb,
}

impl Default for MeteorConfig {
    fn default() -> Self {
        Self {
            width: 35.0,
            height: 35.0,
            damage: 1,
            color: Rgb(0xFF, 0x44, 0x44),
            crater_color: Rgb(0xCC, 0x00, 0x00),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObjectsConfig {
    /// Units per frame at level 1.
    pub initial_speed: f64,
    pub speed_increase_per_level: f64,
    /// Frames between spawns at level 0, before the per-level reduction.
    pub spawn_rate: u32,
    pub spawn_rate_reduction_per_level: u32,
    pub min_spawn_rate: u32,
    /// Spawn x is drawn from `[0, canvas.width - spawn_margin)`.
    pub spawn_margin: f64,
    pub spawn_y: f64,
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            initial_speed: 2.0,
            speed_increase_per_level: 0.5,
            spawn_rate: 60,
            spawn_rate_reduction_per_level: 5,
            min_spawn_rate: 20,
            spawn_margin: 50.0,
            spawn_y: -50.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatcherBackground {
    pub color: Rgb,
    pub star_count: usize,
}

impl Default for CatcherBackground {
    fn default() -> Self {
        Self {
            color: Rgb(0x0A, 0x0E, 0x27),
            star_count: 100,
        }
    }
}

// ── Terminal input ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// How long a steering key counts as held after its last press, for
    /// terminals that never report key release.
    pub hold_timeout_ms: u64,
    /// Logical units the keyboard crosshair moves per key press.
    pub crosshair_step: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_timeout_ms: 180,
            crosshair_step: 25.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().expect("defaults must validate");
        assert_eq!(config.shooter.waves.spawn_positions.len(), 12);
        assert_eq!(config.catcher.player.start_x, 360.0);
        assert!((config.frame_ms() - 16.666_666).abs() < 1e-3);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: Config = toml::from_str(
            r##"
            [game]
            initial_lives = 5

            [shooter.enemy]
            aim_delay = 1000.0
            body_color = "#102030"
            "##,
        )
        .expect("parse");
        assert_eq!(config.game.initial_lives, 5);
        assert_eq!(config.game.max_health, 100);
        assert_eq!(config.shooter.enemy.aim_delay, 1000.0);
        assert_eq!(config.shooter.enemy.aiming_duration, 1200.0);
        assert_eq!(config.shooter.enemy.body_color, Rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn bad_colour_is_a_parse_error() {
        let parsed: Result<Config, _> = toml::from_str(
            r#"
            [catcher.star]
            color = "gold"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn validation_rejects_nonsense() {
        let mut config = Config::default();
        config.game.initial_health = 150;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.shooter.waves.spawn_positions.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.catcher.star.spawn_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
