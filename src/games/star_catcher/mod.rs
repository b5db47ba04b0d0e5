pub mod engine;
pub mod falling;
pub mod player;

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use ratatui::prelude::*;
use tracing::{trace, warn};

use crate::config::Config;
use crate::games::Game;
use crate::input::{common_command, steering, InputCommand, KeyHold, PointerMap};
use crate::sim::{DrawList, FrameClock, Lifecycle};
use crate::ui::hud;

use engine::CatcherEngine;
use player::Direction;

/// Terminal front end for [`CatcherEngine`]: held keys steer the basket.
pub struct StarCatcher {
    engine: CatcherEngine,
    clock: FrameClock,
    hold: KeyHold,
    pointer: PointerMap,
    field: DrawList,
}

impl StarCatcher {
    pub fn new(config: Arc<Config>, rng: StdRng) -> Self {
        Self {
            clock: FrameClock::new(),
            hold: KeyHold::new(config.input.hold_timeout_ms),
            pointer: PointerMap::new(config.canvas.width, config.canvas.height),
            field: DrawList::new(),
            engine: CatcherEngine::new(config, rng),
        }
    }

    pub fn engine(&self) -> &CatcherEngine {
        &self.engine
    }

    /// Pauses a running game and lets go of any held direction.
    pub fn suspend(&mut self) {
        if self.engine.lifecycle().is_running() {
            self.engine.toggle_pause();
        }
        self.clock = FrameClock::new();
        self.hold.clear();
        self.engine.set_move_intent(Direction::Left, false);
        self.engine.set_move_intent(Direction::Right, false);
    }

    fn apply(&mut self, cmd: InputCommand) {
        match cmd {
            InputCommand::MoveIntent { dir, active } => self.engine.set_move_intent(dir, active),
            InputCommand::PauseToggle => self.engine.toggle_pause(),
            InputCommand::Start => {
                if matches!(self.engine.lifecycle(), Lifecycle::NotStarted | Lifecycle::GameOver) {
                    self.hold.clear();
                    self.engine.start();
                }
            }
            InputCommand::Restart => self.reset(),
            InputCommand::PointerShot { .. } => {}
        }
    }

    fn on_key_at(&mut self, key: KeyEvent, now: Instant) {
        if let Some(dir) = steering(key.code) {
            if let Some(cmd) = self.hold.on_key(dir, key.kind, now) {
                self.apply(cmd);
            }
        } else if let Some(cmd) = common_command(&key) {
            self.apply(cmd);
        }
    }

    fn expire_at(&mut self, now: Instant) {
        for cmd in self.hold.expire(now) {
            self.apply(cmd);
        }
    }
}

impl Game for StarCatcher {
    fn update(&mut self) {
        self.expire_at(Instant::now());

        let Some(dt) = self.clock.frame(self.engine.lifecycle().is_running()) else {
            return;
        };
        match self.engine.tick(dt) {
            Ok(report) => {
                for event in report.events {
                    trace!(?event, "star catcher");
                }
            }
            Err(e) => warn!(error = %e, "tick rejected"),
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        self.on_key_at(key, Instant::now());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.field.clear();
        self.engine.draw(&mut self.field);
        let ui = self.engine.report();

        let help = vec![
            Span::styled(" \u{2190}\u{2192} / A D Move ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Catch stars, dodge meteors ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R Restart", Style::default().fg(Color::DarkGray)),
        ];

        hud::render_game(
            frame,
            area,
            " Star Catcher ",
            Color::Rgb(255, 215, 60),
            hud::status_line("\u{2B50}", &ui),
            &self.field,
            &mut self.pointer,
            hud::footer(&ui, help),
        );
    }

    fn reset(&mut self) {
        self.hold.clear();
        self.engine.stop();
        self.engine.reset();
    }

    fn get_score(&self) -> u32 {
        self.engine.session().score
    }

    fn is_game_over(&self) -> bool {
        self.engine.lifecycle() == Lifecycle::GameOver
    }
}
