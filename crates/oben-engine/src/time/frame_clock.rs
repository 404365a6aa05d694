use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the previous tick.
    pub delta_ms: f32,

    /// Milliseconds since the clock started.
    pub total_ms: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Monotonic clock producing `FrameTime` snapshots.
///
/// Deltas are not clamped: shaders receive the real elapsed time, including
/// long stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// Instants earlier than the previous tick count as zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last);
        let total = now.saturating_duration_since(self.start);
        self.last = self.last.max(now);

        let ft = FrameTime {
            delta_ms: millis(dt),
            total_ms: millis(total),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn millis(d: Duration) -> f32 {
    (d.as_secs_f64() * 1000.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_measures_from_start() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_millis(16));
        assert_eq!(ft.delta_ms, 16.0);
        assert_eq!(ft.total_ms, 16.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn delta_is_since_previous_tick_total_since_start() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.tick_at(t0 + Duration::from_millis(10));
        let ft = clock.tick_at(t0 + Duration::from_millis(35));
        assert_eq!(ft.delta_ms, 25.0);
        assert_eq!(ft.total_ms, 35.0);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn long_stalls_are_not_clamped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(3));
        assert_eq!(ft.delta_ms, 3000.0);
    }

    #[test]
    fn backwards_instant_yields_zero_delta() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.tick_at(t0 + Duration::from_millis(50));
        let ft = clock.tick_at(t0 + Duration::from_millis(20));
        assert_eq!(ft.delta_ms, 0.0);
        assert_eq!(ft.total_ms, 20.0);

        let next = clock.tick_at(t0 + Duration::from_millis(60));
        assert_eq!(next.delta_ms, 10.0);
    }
}
