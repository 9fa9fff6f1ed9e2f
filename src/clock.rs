//! Fixed-timestep accumulator
//!
//! Wall-clock deltas go in, whole `TICK_MS` steps come out. The remainder
//! carries over to the next frame. A negative accumulator is a lead-in: no
//! step runs until wall-clock time has paid it back.

use crate::consts::TICK_MS;

#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    last_ms: Option<u64>,
    accumulator_ms: i64,
    pause_started_ms: Option<u64>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the elapsed milliseconds since
    /// the previous one (0 on the first frame or if time went backwards)
    pub fn advance(&mut self, now_ms: u64) -> i64 {
        let delta = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last) as i64,
            None => 0,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    pub fn accumulate(&mut self, delta_ms: i64) {
        self.accumulator_ms += delta_ms;
    }

    /// Take one fixed step out of the accumulator if there is one
    pub fn try_step(&mut self) -> bool {
        if self.accumulator_ms >= i64::from(TICK_MS) {
            self.accumulator_ms -= i64::from(TICK_MS);
            true
        } else {
            false
        }
    }

    /// Hold simulation back for `ms` of wall-clock time
    pub fn lead_in(&mut self, ms: i32) {
        self.accumulator_ms = -i64::from(ms);
    }

    pub fn accumulator_ms(&self) -> i64 {
        self.accumulator_ms
    }

    /// Remaining lead-in time, 0 once play can start
    pub fn lead_in_remaining_ms(&self) -> i64 {
        (-self.accumulator_ms).max(0)
    }

    pub fn begin_pause(&mut self, now_ms: u64) {
        self.pause_started_ms = Some(now_ms);
    }

    /// Give back the wall-clock time that was accumulated while paused
    pub fn resume(&mut self, now_ms: u64) {
        if let Some(start) = self.pause_started_ms.take() {
            let paused = now_ms.saturating_sub(start) as i64;
            self.accumulator_ms -= paused;
            log::debug!("resumed after {} ms paused", paused);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_whole_ticks_and_keeps_remainder() {
        let mut clock = FixedClock::new();
        clock.advance(1_000);
        let delta = clock.advance(1_050);
        assert_eq!(delta, 50);
        clock.accumulate(delta);

        let mut steps = 0;
        while clock.try_step() {
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(clock.accumulator_ms(), 2);
    }

    #[test]
    fn test_first_frame_has_no_delta() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(123_456), 0);
    }

    #[test]
    fn test_lead_in_blocks_steps() {
        let mut clock = FixedClock::new();
        clock.lead_in(3_000);
        assert_eq!(clock.lead_in_remaining_ms(), 3_000);
        clock.accumulate(2_990);
        assert!(!clock.try_step());
        clock.accumulate(26);
        assert_eq!(clock.lead_in_remaining_ms(), 0);
        assert!(clock.try_step());
        assert!(!clock.try_step());
    }

    #[test]
    fn test_pause_time_is_given_back() {
        let mut clock = FixedClock::new();
        clock.advance(0);
        clock.accumulate(5);
        clock.begin_pause(1_000);
        assert!(clock.is_paused());
        // Frames keep arriving while paused
        let d = clock.advance(1_500);
        clock.accumulate(d);
        let d = clock.advance(2_000);
        clock.accumulate(d);
        clock.resume(2_000);
        assert!(!clock.is_paused());
        // 2000 ms of frames, 1000 ms of it paused
        assert_eq!(clock.accumulator_ms(), 5 + 1_000);
    }
}
