use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::GameError;
use crate::games::star_catcher::falling::{FallingKind, FallingObject, Spawner};
use crate::games::star_catcher::player::{Direction, Player};
use crate::sim::{self, check_elapsed, GameEvent, Lifecycle, Rect, Renderer, Rgb, Session, TickReport, UiReport};

/// Headless Star Catcher: catch the stars, dodge the meteors.
pub struct CatcherEngine {
    config: Arc<Config>,
    rng: StdRng,
    session: Session,
    lifecycle: Lifecycle,
    player: Player,
    objects: Vec<FallingObject>,
    spawn_timer: f64,
    stars: Vec<(f64, f64, f64, f64)>,
}

impl CatcherEngine {
    pub fn new(config: Arc<Config>, mut rng: StdRng) -> Self {
        let stars = sim::starfield(
            &mut rng,
            config.catcher.background.star_count,
            config.canvas.width,
            config.canvas.height,
        );
        Self {
            session: Session::new(&config.game),
            lifecycle: Lifecycle::NotStarted,
            player: Player::new(&config.catcher.player, config.canvas.width),
            objects: Vec::new(),
            spawn_timer: 0.0,
            stars,
            rng,
            config,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn start(&mut self) {
        self.reset();
        self.lifecycle = Lifecycle::Running;
        info!("star catcher started");
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.objects.clear();
        self.spawn_timer = 0.0;
        self.player.reset();
    }

    pub fn stop(&mut self) {
        if self.lifecycle != Lifecycle::NotStarted {
            info!(score = self.session.score, "star catcher stopped");
        }
        self.lifecycle = Lifecycle::NotStarted;
    }

    pub fn toggle_pause(&mut self) {
        self.lifecycle = self.lifecycle.toggled();
    }

    pub fn set_move_intent(&mut self, dir: Direction, active: bool) {
        self.player.set_intent(dir, active);
    }

    pub fn tick(&mut self, elapsed_ms: f64) -> Result<TickReport, GameError> {
        let dt = check_elapsed(elapsed_ms)?;
        let mut events = Vec::new();
        if !self.lifecycle.is_running() {
            return Ok(TickReport { ui: self.report(), events });
        }

        // Sub-step so fast objects can't skip over the basket.
        let frame_ms = self.config.frame_ms();
        let frames = dt / frame_ms;
        let steps = frames.ceil().max(1.0) as usize;
        for _ in 0..steps {
            self.step(frames / steps as f64, frame_ms, &mut events);
            if self.session.is_out_of_lives() {
                break;
            }
        }

        let earned = self.session.score / self.config.game.points_per_level + 1;
        if earned > self.session.level {
            self.session.level = earned;
            events.push(GameEvent::LevelUp(earned));
            info!(level = earned, "star catcher level up");
        }

        if self.session.is_out_of_lives() {
            self.lifecycle = Lifecycle::GameOver;
            events.push(GameEvent::GameOver);
            info!(score = self.session.score, level = self.session.level, "star catcher game over");
        }

        Ok(TickReport { ui: self.report(), events })
    }

    fn spawn_due(&mut self, dt: f64, frame_ms: f64) {
        let spawner = Spawner::new(&self.config.catcher, self.config.canvas.width);
        self.spawn_timer += dt;
        loop {
            let interval = spawner.interval_frames(self.session.level) as f64 * frame_ms;
            if self.spawn_timer < interval {
                break;
            }
            self.spawn_timer -= interval;
            self.objects.push(spawner.spawn(self.session.level, &mut self.rng));
        }
    }

    fn step(&mut self, frames: f64, frame_ms: f64, events: &mut Vec<GameEvent>) {
        self.player.update(frames);
        self.spawn_due(frames * frame_ms, frame_ms);

        let catcher = &self.config.catcher;
        let field_height = self.config.canvas.height;
        let basket = self.player.bounds();
        let session = &mut self.session;

        self.objects.retain_mut(|obj| {
            obj.update(frames);
            if obj.center_in(&basket) {
                match obj.kind {
                    FallingKind::Star => {
                        session.add_score(catcher.star.points);
                        session.heal(catcher.star.health_restore);
                        events.push(GameEvent::StarCaught);
                    }
                    FallingKind::Meteor => {
                        session.lose_lives(catcher.meteor.damage);
                        events.push(GameEvent::MeteorHit);
                        events.push(GameEvent::LifeLost);
                        debug!(lives = session.lives, "meteor caught");
                    }
                }
                false
            } else if obj.is_off_screen(field_height) {
                if obj.kind == FallingKind::Star {
                    events.push(GameEvent::StarMissed);
                    if session.damage(catcher.star.health_penalty_missed) {
                        events.push(GameEvent::LifeLost);
                        debug!(lives = session.lives, "health depleted");
                    }
                }
                false
            } else {
                true
            }
        });
    }

    pub fn report(&self) -> UiReport {
        UiReport::from_session(&self.session, self.lifecycle)
    }

    pub fn draw(&self, r: &mut dyn Renderer) {
        let cfg = &self.config;
        let (w, h) = (cfg.canvas.width, cfg.canvas.height);
        let background = cfg.catcher.background.color;

        r.fill_rect(Rect::new(0.0, 0.0, w, h), background);
        for &(x, y, size, brightness) in &self.stars {
            if size > 1.0 {
                r.circle(x, y, size / 2.0, Rgb::WHITE.with_alpha(brightness, background), false);
            }
        }

        for obj in &self.objects {
            obj.draw(r, &cfg.catcher);
        }
        self.player.draw(r);

        if self.lifecycle == Lifecycle::Paused {
            r.fill_rect(Rect::new(w * 0.3, h / 2.0 - 40.0, w * 0.4, 80.0), Rgb(0x10, 0x10, 0x18));
            r.text(w / 2.0, h / 2.0, "PAUSED", Rgb::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DrawList;
    use rand::SeedableRng;

    const FRAME: f64 = 1000.0 / 60.0;

    fn engine_with(mutate: impl FnOnce(&mut Config)) -> CatcherEngine {
        let mut config = Config::default();
        mutate(&mut config);
        CatcherEngine::new(Arc::new(config), StdRng::seed_from_u64(7))
    }

    /// An engine that never spawns on its own.
    fn quiet() -> CatcherEngine {
        let mut e = engine_with(|c| {
            c.catcher.objects.spawn_rate = 1_000_000;
            c.catcher.objects.min_spawn_rate = 1_000_000;
        });
        e.start();
        e
    }

    fn drop_object(e: &mut CatcherEngine, x: f64, kind: FallingKind) {
        let obj = FallingObject::new(x, -50.0, kind, 2.0, 0.0, &e.config.catcher);
        e.objects.push(obj);
    }

    fn run_frames(e: &mut CatcherEngine, frames: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(e.tick(FRAME).expect("tick").events);
        }
        events
    }

    #[test]
    fn catching_a_star_scores_and_heals() {
        let mut e = quiet();
        e.session.damage(50);
        drop_object(&mut e, 370.0, FallingKind::Star);

        run_frames(&mut e, 277);
        assert_eq!(e.session().score, 0);
        let events = run_frames(&mut e, 1);
        assert_eq!(events, vec![GameEvent::StarCaught]);
        assert_eq!(e.session().score, 10);
        assert_eq!(e.session().health(), 65);
        assert!(e.objects().is_empty());
    }

    #[test]
    fn catching_heal_is_capped() {
        let mut e = quiet();
        drop_object(&mut e, 370.0, FallingKind::Star);
        run_frames(&mut e, 300);
        assert_eq!(e.session().score, 10);
        assert_eq!(e.session().health(), 100);
    }

    #[test]
    fn missed_star_costs_health() {
        let mut e = quiet();
        drop_object(&mut e, 0.0, FallingKind::Star);
        let events = run_frames(&mut e, 330);
        assert!(events.contains(&GameEvent::StarMissed));
        assert_eq!(e.session().health(), 80);
        assert_eq!(e.report().health_percent, 80);
        assert!(e.objects().is_empty());
    }

    #[test]
    fn missed_meteor_is_harmless() {
        let mut e = quiet();
        drop_object(&mut e, 0.0, FallingKind::Meteor);
        run_frames(&mut e, 330);
        assert_eq!(e.session().health(), 100);
        assert_eq!(e.session().lives, 3);
        assert!(e.objects().is_empty());
    }

    #[test]
    fn caught_meteor_takes_a_life_directly() {
        let mut e = quiet();
        drop_object(&mut e, 370.0, FallingKind::Meteor);
        let events = run_frames(&mut e, 300);
        assert!(events.contains(&GameEvent::MeteorHit));
        assert_eq!(e.session().lives, 2);
        assert_eq!(e.session().health(), 100);
    }

    #[test]
    fn depleting_health_costs_exactly_one_life() {
        let mut e = quiet();
        for i in 0..5 {
            drop_object(&mut e, i as f64 * 40.0, FallingKind::Star);
        }
        let events = run_frames(&mut e, 330);
        assert_eq!(events.iter().filter(|ev| **ev == GameEvent::StarMissed).count(), 5);
        assert_eq!(events.iter().filter(|ev| **ev == GameEvent::LifeLost).count(), 1);
        assert_eq!(e.session().lives, 2);
        assert_eq!(e.session().health(), 100);
    }

    #[test]
    fn game_over_halts_the_simulation() {
        let mut e = quiet();
        for _ in 0..3 {
            drop_object(&mut e, 370.0, FallingKind::Meteor);
        }
        drop_object(&mut e, 0.0, FallingKind::Star);
        let events = run_frames(&mut e, 300);
        assert!(events.contains(&GameEvent::GameOver));
        assert_eq!(e.lifecycle(), Lifecycle::GameOver);

        let left: Vec<_> = e.objects().iter().map(|o| o.y).collect();
        assert_eq!(left.len(), 1);
        assert!(run_frames(&mut e, 100).is_empty());
        assert_eq!(e.objects()[0].y, left[0]);
        assert_eq!(e.session().health(), 100);
    }

    #[test]
    fn player_follows_move_intent() {
        let mut e = quiet();
        e.set_move_intent(Direction::Right, true);
        e.tick(FRAME * 10.0).unwrap();
        assert!((e.player().x - 430.0).abs() < 1e-9);
        e.set_move_intent(Direction::Right, false);
        e.tick(FRAME * 10.0).unwrap();
        assert!((e.player().x - 430.0).abs() < 1e-9);
    }

    #[test]
    fn spawns_on_the_frame_interval() {
        let mut e = engine_with(|_| {});
        e.start();
        // Level 1: every 55 frames.
        e.tick(916.0).unwrap();
        assert!(e.objects().is_empty());
        e.tick(1.0).unwrap();
        assert_eq!(e.objects().len(), 1);

        // A long stall catches up on every missed spawn.
        e.tick(55.0 * FRAME * 3.0).unwrap();
        assert_eq!(e.objects().len(), 4);
    }

    #[test]
    fn level_tracks_score_and_never_drops() {
        let mut e = quiet();
        e.session.add_score(190);
        let report = e.tick(FRAME).unwrap();
        assert_eq!(report.ui.level, 2);
        assert!(report.events.contains(&GameEvent::LevelUp(2)));

        e.session.score = 40;
        assert_eq!(e.tick(FRAME).unwrap().ui.level, 2);
        e.session.score = 300;
        assert_eq!(e.tick(FRAME).unwrap().ui.level, 4);
    }

    #[test]
    fn pause_freezes_objects() {
        let mut e = quiet();
        drop_object(&mut e, 0.0, FallingKind::Star);
        e.tick(FRAME).unwrap();
        let y = e.objects()[0].y;
        e.toggle_pause();
        e.tick(FRAME * 20.0).unwrap();
        assert_eq!(e.objects()[0].y, y);
        e.toggle_pause();
        e.tick(FRAME).unwrap();
        assert!((e.objects()[0].y - (y + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn reset_then_start_is_a_clean_session() {
        let mut e = engine_with(|_| {});
        e.start();
        e.set_move_intent(Direction::Left, true);
        run_frames(&mut e, 600);
        e.session.add_score(120);
        e.stop();
        e.reset();
        e.start();

        let ui = e.report();
        assert_eq!((ui.score, ui.lives, ui.level, ui.health_percent), (0, 3, 1, 100));
        assert!(e.objects().is_empty());
        assert_eq!(e.player().x, 360.0);
        assert!(!e.player().moving_left);
    }

    #[test]
    fn ticks_before_start_do_nothing() {
        let mut e = engine_with(|_| {});
        let report = e.tick(10_000.0).unwrap();
        assert!(report.events.is_empty());
        assert!(e.objects().is_empty());
        assert_eq!(report.ui.lifecycle, Lifecycle::NotStarted);
        assert!(e.tick(-1.0).is_err());
    }

    #[test]
    fn draw_paints_player_objects_and_pause() {
        let mut e = quiet();
        drop_object(&mut e, 100.0, FallingKind::Meteor);
        e.toggle_pause();
        let mut list = DrawList::new();
        e.draw(&mut list);
        assert!(list.shapes().len() > 5);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["PAUSED"]);
    }
}
