use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::Config;
use crate::games::sharp_shooter::SharpShooter;
use crate::games::star_catcher::StarCatcher;
use crate::games::Game;
use crate::ui::home::GAME_COUNT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    StarCatcher,
    SharpShooter,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::StarCatcher, Tab::SharpShooter]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::StarCatcher => " Star Catcher ",
            Tab::SharpShooter => " Sharp Shooter ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::StarCatcher => 1,
            Tab::SharpShooter => 2,
        }
    }

    /// The tab for a home-screen tile.
    pub fn for_game(idx: usize) -> Tab {
        match idx {
            0 => Tab::StarCatcher,
            1 => Tab::SharpShooter,
            _ => Tab::Home,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    pub star_catcher: StarCatcher,
    pub sharp_shooter: SharpShooter,
    game_over_seen: [bool; GAME_COUNT],
}

impl App {
    pub fn new(config: Arc<Config>, seed: u64) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            star_catcher: StarCatcher::new(Arc::clone(&config), StdRng::seed_from_u64(seed)),
            sharp_shooter: SharpShooter::new(config, StdRng::seed_from_u64(seed.wrapping_add(1))),
            game_over_seen: [false; GAME_COUNT],
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.set_tab(tab);
        self
    }

    pub fn on_tick(&mut self) {
        match self.current_tab {
            Tab::Home => {}
            Tab::StarCatcher => self.star_catcher.update(),
            Tab::SharpShooter => self.sharp_shooter.update(),
        }
        self.log_game_overs();
    }

    fn log_game_overs(&mut self) {
        let games: [(&str, bool, u32); GAME_COUNT] = [
            ("star catcher", self.star_catcher.is_game_over(), self.star_catcher.get_score()),
            ("sharp shooter", self.sharp_shooter.is_game_over(), self.sharp_shooter.get_score()),
        ];
        for (idx, (name, game_over, score)) in games.into_iter().enumerate() {
            if game_over && !self.game_over_seen[idx] {
                info!(game = name, score, "final score");
            }
            self.game_over_seen[idx] = game_over;
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Repeats and releases only matter to the game holding the key.
        if key.kind != KeyEventKind::Press {
            self.forward_key(key);
            return;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if matches!(self.current_tab, Tab::Home) {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if !matches!(self.current_tab, Tab::Home) {
                    self.set_tab(Tab::Home);
                    return;
                }
            }
            _ => {}
        }

        if matches!(self.current_tab, Tab::Home) && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('1') => self.set_tab(Tab::StarCatcher),
                KeyCode::Char('2') => self.set_tab(Tab::SharpShooter),
                KeyCode::Right | KeyCode::Down => self.selected_game = (self.selected_game + 1) % GAME_COUNT,
                KeyCode::Left | KeyCode::Up => {
                    self.selected_game = (self.selected_game + GAME_COUNT - 1) % GAME_COUNT
                }
                KeyCode::Enter => self.set_tab(Tab::for_game(self.selected_game)),
                _ => {}
            }
            return;
        }

        self.forward_key(key);
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        match self.current_tab {
            Tab::Home => {}
            Tab::StarCatcher => self.star_catcher.handle_mouse(mouse),
            Tab::SharpShooter => self.sharp_shooter.handle_mouse(mouse),
        }
    }

    fn forward_key(&mut self, key: KeyEvent) {
        match self.current_tab {
            Tab::Home => {}
            Tab::StarCatcher => self.star_catcher.handle_input(key),
            Tab::SharpShooter => self.sharp_shooter.handle_input(key),
        }
    }

    /// Leaving a game pauses it so it does not run on unseen.
    fn set_tab(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        match self.current_tab {
            Tab::Home => {}
            Tab::StarCatcher => self.star_catcher.suspend(),
            Tab::SharpShooter => self.sharp_shooter.suspend(),
        }
        self.current_tab = tab;
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.set_tab(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.set_tab(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Lifecycle;
    use crossterm::event::KeyEventState;

    fn app() -> App {
        App::new(Arc::new(Config::default()), 42)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE, kind, state: KeyEventState::NONE }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyEventKind::Press)
    }

    #[test]
    fn home_navigation() {
        let mut app = app();
        app.on_key(press(KeyCode::Right));
        assert_eq!(app.selected_game, 1);
        app.on_key(press(KeyCode::Right));
        assert_eq!(app.selected_game, 0);
        app.on_key(press(KeyCode::Left));
        app.on_key(press(KeyCode::Enter));
        assert_eq!(app.current_tab, Tab::SharpShooter);

        app.on_key(press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.on_key(press(KeyCode::Esc));
        assert_eq!(app.current_tab, Tab::Home);
        app.on_key(press(KeyCode::Char('1')));
        assert_eq!(app.current_tab, Tab::StarCatcher);
    }

    #[test]
    fn tab_cycles_and_quit_works_from_home() {
        let mut app = app();
        app.on_key(press(KeyCode::Tab));
        app.on_key(press(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::SharpShooter);
        app.on_key(press(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Home);
        app.on_key(press(KeyCode::BackTab));
        assert_eq!(app.current_tab, Tab::SharpShooter);

        app.on_key(press(KeyCode::Esc));
        app.on_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn release_events_reach_the_game_but_never_navigate() {
        let mut app = app().with_tab(Tab::StarCatcher);
        app.on_key(press(KeyCode::Char('s')));
        app.on_key(press(KeyCode::Left));
        assert!(app.star_catcher.engine().player().moving_left);

        app.on_key(key(KeyCode::Esc, KeyEventKind::Release));
        assert_eq!(app.current_tab, Tab::StarCatcher);
        app.on_key(key(KeyCode::Left, KeyEventKind::Release));
        assert!(!app.star_catcher.engine().player().moving_left);
    }

    #[test]
    fn leaving_a_running_game_pauses_it() {
        let mut app = app().with_tab(Tab::SharpShooter);
        app.on_key(press(KeyCode::Char('s')));
        assert_eq!(app.sharp_shooter.engine().lifecycle(), Lifecycle::Running);
        app.on_key(press(KeyCode::Esc));
        assert_eq!(app.sharp_shooter.engine().lifecycle(), Lifecycle::Paused);
    }
}
