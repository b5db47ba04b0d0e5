use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;

use crate::games::star_catcher::player::Direction;

/// What a key or pointer event means to a game, independent of the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    PointerShot { x: f64, y: f64 },
    MoveIntent { dir: Direction, active: bool },
    PauseToggle,
    Start,
    Restart,
}

/// Keys every game shares. Only fresh presses count.
pub fn common_command(key: &KeyEvent) -> Option<InputCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Some(InputCommand::PauseToggle),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => Some(InputCommand::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputCommand::Restart),
        _ => None,
    }
}

pub fn steering(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Maps terminal cells back to logical canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PointerMap {
    area: Rect,
    width: f64,
    height: f64,
}

impl PointerMap {
    pub fn new(width: f64, height: f64) -> Self {
        Self { area: Rect::default(), width, height }
    }

    /// Records where the canvas was last drawn.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn logical_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// The logical point at the centre of the cell, if the cell is on the canvas.
    pub fn to_logical(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let a = self.area;
        if a.width == 0 || a.height == 0 {
            return None;
        }
        if column < a.x || row < a.y || column >= a.x + a.width || row >= a.y + a.height {
            return None;
        }
        let x = (f64::from(column - a.x) + 0.5) * self.width / f64::from(a.width);
        let y = (f64::from(row - a.y) + 0.5) * self.height / f64::from(a.height);
        Some((x, y))
    }
}

/// Turns key press/repeat/release into held-direction edges.
///
/// Terminals without key release reporting only send presses and repeats.
/// For those, each press pushes a deadline out by the hold timeout and the
/// direction drops once it passes. The first real release switches the
/// timeout off for good.
#[derive(Debug)]
pub struct KeyHold {
    timeout: Duration,
    deadlines: [Option<Instant>; 2],
    release_seen: bool,
}

fn slot(dir: Direction) -> usize {
    match dir {
        Direction::Left => 0,
        Direction::Right => 1,
    }
}

const DIRECTIONS: [Direction; 2] = [Direction::Left, Direction::Right];

impl KeyHold {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            deadlines: [None; 2],
            release_seen: false,
        }
    }

    pub fn on_key(&mut self, dir: Direction, kind: KeyEventKind, now: Instant) -> Option<InputCommand> {
        let held = &mut self.deadlines[slot(dir)];
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let was_held = held.is_some();
                *held = Some(now + self.timeout);
                (!was_held).then_some(InputCommand::MoveIntent { dir, active: true })
            }
            KeyEventKind::Release => {
                self.release_seen = true;
                held.take().map(|_| InputCommand::MoveIntent { dir, active: false })
            }
        }
    }

    /// Releases every direction whose deadline has passed.
    pub fn expire(&mut self, now: Instant) -> Vec<InputCommand> {
        if self.release_seen {
            return Vec::new();
        }
        let mut released = Vec::new();
        for dir in DIRECTIONS {
            let held = &mut self.deadlines[slot(dir)];
            if matches!(held, Some(deadline) if *deadline <= now) {
                *held = None;
                released.push(InputCommand::MoveIntent { dir, active: false });
            }
        }
        released
    }

    pub fn clear(&mut self) {
        self.deadlines = [None; 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn shared_keys_map_on_press_only() {
        assert_eq!(common_command(&key(KeyCode::Char(' '), KeyEventKind::Press)), Some(InputCommand::PauseToggle));
        assert_eq!(common_command(&key(KeyCode::Char('P'), KeyEventKind::Press)), Some(InputCommand::PauseToggle));
        assert_eq!(common_command(&key(KeyCode::Enter, KeyEventKind::Press)), Some(InputCommand::Start));
        assert_eq!(common_command(&key(KeyCode::Char('r'), KeyEventKind::Press)), Some(InputCommand::Restart));
        assert_eq!(common_command(&key(KeyCode::Char('r'), KeyEventKind::Repeat)), None);
        assert_eq!(common_command(&key(KeyCode::Char('x'), KeyEventKind::Press)), None);
    }

    #[test]
    fn steering_keys() {
        assert_eq!(steering(KeyCode::Left), Some(Direction::Left));
        assert_eq!(steering(KeyCode::Char('d')), Some(Direction::Right));
        assert_eq!(steering(KeyCode::Up), None);
    }

    #[test]
    fn pointer_maps_cell_centres() {
        let mut map = PointerMap::new(800.0, 600.0);
        assert_eq!(map.to_logical(0, 0), None);

        map.set_area(Rect::new(10, 5, 80, 30));
        assert_eq!(map.to_logical(10, 5), Some((5.0, 10.0)));
        assert_eq!(map.to_logical(89, 34), Some((795.0, 590.0)));
        assert_eq!(map.to_logical(50, 20), Some((405.0, 310.0)));
        assert_eq!(map.to_logical(9, 5), None);
        assert_eq!(map.to_logical(90, 5), None);
        assert_eq!(map.to_logical(10, 35), None);
    }

    #[test]
    fn hold_expires_without_release_events() {
        let t0 = Instant::now();
        let mut hold = KeyHold::new(180);

        assert_eq!(
            hold.on_key(Direction::Left, KeyEventKind::Press, t0),
            Some(InputCommand::MoveIntent { dir: Direction::Left, active: true })
        );
        // Repeats extend the hold without a new edge.
        let t1 = t0 + Duration::from_millis(100);
        assert_eq!(hold.on_key(Direction::Left, KeyEventKind::Repeat, t1), None);
        assert!(hold.expire(t0 + Duration::from_millis(200)).is_empty());

        assert_eq!(
            hold.expire(t1 + Duration::from_millis(180)),
            vec![InputCommand::MoveIntent { dir: Direction::Left, active: false }]
        );
        assert!(hold.expire(t1 + Duration::from_millis(500)).is_empty());
    }

    #[test]
    fn real_release_disables_the_timeout() {
        let t0 = Instant::now();
        let mut hold = KeyHold::new(180);
        hold.on_key(Direction::Right, KeyEventKind::Press, t0);
        assert_eq!(
            hold.on_key(Direction::Right, KeyEventKind::Release, t0),
            Some(InputCommand::MoveIntent { dir: Direction::Right, active: false })
        );
        assert_eq!(hold.on_key(Direction::Right, KeyEventKind::Release, t0), None);

        hold.on_key(Direction::Left, KeyEventKind::Press, t0);
        assert!(hold.expire(t0 + Duration::from_secs(10)).is_empty());
        assert_eq!(
            hold.on_key(Direction::Left, KeyEventKind::Release, t0 + Duration::from_secs(10)),
            Some(InputCommand::MoveIntent { dir: Direction::Left, active: false })
        );
    }

    #[test]
    fn directions_are_independent() {
        let t0 = Instant::now();
        let mut hold = KeyHold::new(180);
        hold.on_key(Direction::Left, KeyEventKind::Press, t0);
        hold.on_key(Direction::Right, KeyEventKind::Press, t0 + Duration::from_millis(150));
        assert_eq!(
            hold.expire(t0 + Duration::from_millis(200)),
            vec![InputCommand::MoveIntent { dir: Direction::Left, active: false }]
        );
        hold.clear();
        assert!(hold.expire(t0 + Duration::from_secs(1)).is_empty());
    }
}
