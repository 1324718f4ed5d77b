use serde::{Deserialize, Serialize};

/// Countdown timer aggregate.
///
/// Pure state machine: the owner decides when a second has elapsed and calls
/// [`CountdownTimer::tick`]. `remaining` never goes below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    initial_seconds: u32,
    remaining_seconds: u32,
    state: TimerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Stopped,
    Running,
    Finished,
}

impl CountdownTimer {
    pub fn new(initial_seconds: u32) -> Self {
        Self {
            initial_seconds,
            remaining_seconds: initial_seconds,
            state: TimerState::Stopped,
        }
    }

    /// Enters `Running`. Returns `false` when nothing changed: either the
    /// timer is already running or there is no time left to count down.
    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Running => false,
            _ if self.remaining_seconds == 0 => {
                self.state = TimerState::Finished;
                false
            }
            _ => {
                self.state = TimerState::Running;
                true
            }
        }
    }

    /// Advances by one second. Returns `true` when this tick finished the
    /// countdown. Ticks outside `Running` are ignored.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.state = TimerState::Finished;
            return true;
        }
        false
    }

    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
    }

    pub fn reset(&mut self) {
        self.remaining_seconds = self.initial_seconds;
        self.state = TimerState::Stopped;
    }

    pub fn initial_seconds(&self) -> u32 {
        self.initial_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn display(&self) -> String {
        format_mmss(self.remaining_seconds)
    }
}

/// Formats seconds as zero-padded `MM:SS`. Minutes are not wrapped at 60.
pub fn format_mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_timer_is_stopped() {
        let timer = CountdownTimer::new(1500);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.display(), "25:00");
    }

    #[test]
    fn test_stop_preserves_remaining() {
        let mut timer = CountdownTimer::new(10);
        timer.start();
        timer.tick();
        timer.tick();
        timer.stop();
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.remaining_seconds(), 8);

        // ticks after stop do nothing
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 8);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = CountdownTimer::new(10);
        assert!(timer.start());
        assert!(!timer.start());
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn test_zero_duration_finishes_on_start() {
        let mut timer = CountdownTimer::new(0);
        assert!(!timer.start());
        assert_eq!(timer.state(), TimerState::Finished);
        assert_eq!(timer.display(), "00:00");
    }

    #[test]
    fn test_restart_after_finish_needs_reset() {
        let mut timer = CountdownTimer::new(1);
        timer.start();
        assert!(timer.tick());
        assert!(!timer.start());
        assert_eq!(timer.state(), TimerState::Finished);

        timer.reset();
        assert!(timer.start());
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(61), "01:01");
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(6000), "100:00");
    }

    proptest! {
        #[test]
        fn prop_countdown_runs_to_zero_then_resets(duration in 0u32..5_000) {
            let mut timer = CountdownTimer::new(duration);
            timer.start();
            for _ in 0..duration {
                timer.tick();
            }
            prop_assert_eq!(timer.remaining_seconds(), 0);
            prop_assert_eq!(timer.state(), TimerState::Finished);

            timer.reset();
            prop_assert_eq!(timer.remaining_seconds(), duration);
            prop_assert_eq!(timer.state(), TimerState::Stopped);
        }

        #[test]
        fn prop_extra_ticks_never_underflow(duration in 0u32..500, extra in 0u32..50) {
            let mut timer = CountdownTimer::new(duration);
            timer.start();
            let mut finishes = 0;
            for _ in 0..(duration + extra) {
                if timer.tick() {
                    finishes += 1;
                }
            }
            prop_assert_eq!(timer.remaining_seconds(), 0);
            prop_assert_eq!(finishes, u32::from(duration > 0));
        }
    }
}
