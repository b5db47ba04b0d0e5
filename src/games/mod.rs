pub mod sharp_shooter;
pub mod star_catcher;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::prelude::*;

pub trait Game {
    fn update(&mut self);
    fn handle_input(&mut self, key: KeyEvent);
    fn handle_mouse(&mut self, _mouse: MouseEvent) {}
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}
