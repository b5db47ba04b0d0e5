use crate::config::PlayerConfig;
use crate::sim::{Rect, Renderer, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The basket at the bottom of the field.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub moving_left: bool,
    pub moving_right: bool,
    cfg: PlayerConfig,
    field_width: f64,
}

impl Player {
    pub fn new(cfg: &PlayerConfig, field_width: f64) -> Self {
        Self {
            x: cfg.start_x,
            y: cfg.start_y,
            moving_left: false,
            moving_right: false,
            cfg: cfg.clone(),
            field_width,
        }
    }

    pub fn set_intent(&mut self, dir: Direction, active: bool) {
        match dir {
            Direction::Left => self.moving_left = active,
            Direction::Right => self.moving_right = active,
        }
    }

    pub fn update(&mut self, frames: f64) {
        let max_x = (self.field_width - self.cfg.width).max(0.0);
        let step = self.cfg.speed * frames;
        if self.moving_left && self.x > 0.0 {
            self.x -= step;
        }
        if self.moving_right && self.x < max_x {
            self.x += step;
        }
        self.x = self.x.clamp(0.0, max_x);
    }

    pub fn reset(&mut self) {
        self.x = self.cfg.start_x;
        self.y = self.cfg.start_y;
        self.moving_left = false;
        self.moving_right = false;
    }

    /// The catching box, inset from the basket rim on both sides.
    pub fn bounds(&self) -> Rect {
        let inset = self.cfg.catch_inset;
        Rect::new(self.x + inset, self.y, self.cfg.width - 2.0 * inset, self.cfg.height)
    }

    pub fn draw(&self, r: &mut dyn Renderer) {
        let (x, y, w) = (self.x, self.y, self.cfg.width);
        let fill = self.cfg.color;
        let trim = self.cfg.trim_color;

        let bottom = Rect::new(x, y + 40.0, w, 20.0);
        r.fill_rect(bottom, fill);
        r.stroke_rect(bottom, trim);
        r.path(&[(x, y + 40.0), (x + 10.0, y), (x + 10.0, y + 40.0)], trim, true);
        r.path(&[(x + w, y + 40.0), (x + w - 10.0, y), (x + w - 10.0, y + 40.0)], trim, true);

        let mut i = 20.0;
        while i < w {
            r.path(&[(x + i, y + 10.0), (x + i, y + 50.0)], Rgb(0x8B, 0x69, 0x14), false);
            i += 15.0;
        }
    }
}
