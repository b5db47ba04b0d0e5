use std::time::Instant;

/// Turns wall-clock frames into elapsed milliseconds for `tick`.
///
/// The clock only measures while the engine runs. Any frame observed while
/// paused or stopped disarms it, and the first running frame afterwards
/// reports zero elapsed time, so time spent paused never reaches the
/// simulation.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&mut self, running: bool) -> Option<f64> {
        self.frame_at(Instant::now(), running)
    }

    pub fn frame_at(&mut self, now: Instant, running: bool) -> Option<f64> {
        if !running {
            self.last = None;
            return None;
        }
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        self.last = Some(now);
        Some(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn measures_between_running_frames() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame_at(t0, true), Some(0.0));
        let dt = clock.frame_at(t0 + Duration::from_millis(16), true).unwrap();
        assert!((dt - 16.0).abs() < 1e-9);
    }

    #[test]
    fn pause_rearms_without_counting_paused_time() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.frame_at(t0, true);
        assert_eq!(clock.frame_at(t0 + Duration::from_secs(1), false), None);
        assert_eq!(clock.frame_at(t0 + Duration::from_secs(5), true), Some(0.0));
        let dt = clock.frame_at(t0 + Duration::from_millis(5010), true).unwrap();
        assert!((dt - 10.0).abs() < 1e-9);
    }
}
