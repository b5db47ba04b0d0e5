pub mod bullet;
pub mod enemy;
pub mod engine;
pub mod wave;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use ratatui::prelude::*;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::games::Game;
use crate::input::{common_command, InputCommand, PointerMap};
use crate::sim::{DrawList, FrameClock, Lifecycle};
use crate::ui::hud;

use engine::ShooterEngine;

/// Terminal front end for [`ShooterEngine`]: mouse or crosshair aiming.
pub struct SharpShooter {
    engine: ShooterEngine,
    clock: FrameClock,
    pointer: PointerMap,
    crosshair: (f64, f64),
    step: f64,
    field: DrawList,
}

impl SharpShooter {
    pub fn new(config: Arc<Config>, rng: StdRng) -> Self {
        let (w, h) = (config.canvas.width, config.canvas.height);
        Self {
            pointer: PointerMap::new(w, h),
            crosshair: (w / 2.0, h / 2.0),
            step: config.input.crosshair_step,
            clock: FrameClock::new(),
            field: DrawList::new(),
            engine: ShooterEngine::new(config, rng),
        }
    }

    pub fn engine(&self) -> &ShooterEngine {
        &self.engine
    }

    pub fn crosshair(&self) -> (f64, f64) {
        self.crosshair
    }

    pub fn suspend(&mut self) {
        if self.engine.lifecycle().is_running() {
            self.engine.toggle_pause();
        }
        self.clock = FrameClock::new();
    }

    fn apply(&mut self, cmd: InputCommand) {
        match cmd {
            InputCommand::PointerShot { x, y } => match self.engine.handle_shot(x, y) {
                Ok(0) => {}
                Ok(points) => debug!(points, "hit"),
                Err(e) => warn!(error = %e, "shot rejected"),
            },
            InputCommand::PauseToggle => self.engine.toggle_pause(),
            InputCommand::Start => {
                if matches!(self.engine.lifecycle(), Lifecycle::NotStarted | Lifecycle::GameOver) {
                    self.engine.start();
                }
            }
            InputCommand::Restart => self.reset(),
            InputCommand::MoveIntent { .. } => {}
        }
    }

    fn nudge(&mut self, dx: f64, dy: f64) {
        let canvas = &self.engine.config().canvas;
        self.crosshair = (
            (self.crosshair.0 + dx).clamp(0.0, canvas.width),
            (self.crosshair.1 + dy).clamp(0.0, canvas.height),
        );
    }

    fn fire_at_crosshair(&mut self) {
        let (x, y) = self.crosshair;
        self.apply(InputCommand::PointerShot { x, y });
    }
}

impl Game for SharpShooter {
    fn update(&mut self) {
        let Some(dt) = self.clock.frame(self.engine.lifecycle().is_running()) else {
            return;
        };
        match self.engine.tick(dt) {
            Ok(report) => {
                for event in report.events {
                    trace!(?event, "sharp shooter");
                }
            }
            Err(e) => warn!(error = %e, "tick rejected"),
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let step = self.step;
        match key.code {
            KeyCode::Left => self.nudge(-step, 0.0),
            KeyCode::Right => self.nudge(step, 0.0),
            KeyCode::Up => self.nudge(0.0, -step),
            KeyCode::Down => self.nudge(0.0, step),
            KeyCode::Char('f') | KeyCode::Char('F') if key.kind == KeyEventKind::Press => self.fire_at_crosshair(),
            KeyCode::Enter if key.kind == KeyEventKind::Press && self.engine.lifecycle().is_running() => {
                self.fire_at_crosshair()
            }
            _ => {
                if let Some(cmd) = common_command(&key) {
                    self.apply(cmd);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some((x, y)) = self.pointer.to_logical(mouse.column, mouse.row) else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.crosshair = (x, y);
                self.apply(InputCommand::PointerShot { x, y });
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.crosshair = (x, y),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.field.clear();
        self.engine.draw(&mut self.field, self.crosshair);
        let ui = self.engine.report();

        let help = vec![
            Span::styled(" Click / Enter Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("\u{2190}\u{2191}\u{2193}\u{2192} Aim ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R Restart", Style::default().fg(Color::DarkGray)),
        ];

        hud::render_game(
            frame,
            area,
            " Sharp Shooter ",
            Color::Rgb(230, 90, 90),
            hud::status_line("\u{1F3AF}", &ui),
            &self.field,
            &mut self.pointer,
            hud::footer(&ui, help),
        );
    }

    fn reset(&mut self) {
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
