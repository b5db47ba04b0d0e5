//! Engine-agnostic pieces shared by both games.

pub mod clock;
pub mod draw;
pub mod geometry;
pub mod session;

pub use clock::FrameClock;
pub use draw::{DrawList, Renderer, Rgb, Shape};
pub use geometry::Rect;
pub use session::{Banner, GameEvent, HealthBand, Lifecycle, Session, TickReport, UiReport};

use crate::error::GameError;

pub fn check_elapsed(elapsed_ms: f64) -> Result<f64, GameError> {
    if elapsed_ms.is_finite() && elapsed_ms >= 0.0 {
        Ok(elapsed_ms)
    } else {
        Err(GameError::InvalidElapsed(elapsed_ms))
    }
}

/// Cheap deterministic background stars, as `(x, y, size, brightness)`.
pub fn starfield<R: rand::Rng>(rng: &mut R, count: usize, width: f64, height: f64) -> Vec<(f64, f64, f64, f64)> {
    (0..count)
        .map(|_| {
            (
                rng.gen_range(0.0..width),
                rng.gen_range(0.0..height),
                rng.gen_range(0.0..2.0),
                rng.gen_range(0.3..1.0),
            )
        })
        .collect()
}
