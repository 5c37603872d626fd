//! Frame timing

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Turns animation-frame timestamps into clamped deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`.
    /// The first frame after a reset counts as one simulation step.
    pub fn delta_secs(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Forget the last timestamp (after the loop was stopped)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_one_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta_secs(5000.0), SIM_DT);
    }

    #[test]
    fn test_delta_and_clamp() {
        let mut clock = FrameClock::new();
        clock.delta_secs(1000.0);
        assert!((clock.delta_secs(1016.0) - 0.016).abs() < 1e-6);
        // Tab was hidden for a while
        assert_eq!(clock.delta_secs(9000.0), MAX_FRAME_DT);
        // Timestamps never run backwards into negative time
        assert_eq!(clock.delta_secs(8000.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.delta_secs(1000.0);
        clock.reset();
        assert_eq!(clock.delta_secs(99_000.0), SIM_DT);
    }
}
