//! Frame-rate side channel.

use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_millis(1000);

/// Counts frames between one-second boundaries.
///
/// The caller samples one monotonic timestamp per analyzed frame and feeds
/// it to [`tick`](FrameRateCounter::tick), which keeps the counter
/// deterministic under test. The frame that crosses the boundary flushes
/// the running count and is itself not counted, matching the capture
/// pipeline this was lifted from.
#[derive(Clone, Copy, Debug)]
pub struct FrameRateCounter {
    window_start: Instant,
    frames: u32,
}

impl FrameRateCounter {
    pub fn new(now: Instant) -> Self {
        FrameRateCounter {
            window_start: now,
            frames: 0,
        }
    }

    /// Record one frame at `now`. Returns the completed window's frame
    /// count when more than a second has elapsed since the last reset.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        if now.saturating_duration_since(self.window_start) > WINDOW {
            let fps = self.frames;
            self.window_start = now;
            self.frames = 0;
            Some(fps)
        } else {
            self.frames += 1;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_on_window_crossing() {
        let t0 = Instant::now();
        let mut counter = FrameRateCounter::new(t0);
        for i in 1..=9 {
            assert_eq!(counter.tick(t0 + Duration::from_millis(i * 100)), None);
        }
        assert_eq!(counter.tick(t0 + Duration::from_millis(1001)), Some(9));
    }

    #[test]
    fn boundary_frame_is_not_counted_into_the_next_window() {
        let t0 = Instant::now();
        let mut counter = FrameRateCounter::new(t0);
        counter.tick(t0 + Duration::from_millis(500));
        assert_eq!(counter.tick(t0 + Duration::from_millis(1500)), Some(1));
        // window restarted at 1500ms; only the two ticks below are counted
        counter.tick(t0 + Duration::from_millis(1600));
        counter.tick(t0 + Duration::from_millis(1700));
        assert_eq!(counter.tick(t0 + Duration::from_millis(2600)), Some(2));
    }

    #[test]
    fn exactly_one_second_does_not_flush() {
        let t0 = Instant::now();
        let mut counter = FrameRateCounter::new(t0);
        assert_eq!(counter.tick(t0 + Duration::from_millis(1000)), None);
    }
}
