use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{spawn_local, JoinHandle};
use tokio::time::{interval_at, Instant};
use tracing::{debug, info};

use crate::domain::{CountdownTimer, TimerState};

/// Default study block: 25 minutes
pub const DEFAULT_TIMER_SECONDS: u32 = 25 * 60;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub remaining_seconds: u32,
    pub state: TimerState,
    pub display: String,
}

impl From<&CountdownTimer> for TimerSnapshot {
    fn from(timer: &CountdownTimer) -> Self {
        Self {
            remaining_seconds: timer.remaining_seconds(),
            state: timer.state(),
            display: timer.display(),
        }
    }
}

/// Drives a [`CountdownTimer`] with a one-second tick on the current
/// `LocalSet`.
///
/// Owns at most one tick task at a time. Dropping the driver cancels it.
pub struct Countdown {
    timer: Rc<RefCell<CountdownTimer>>,
    ticker: RefCell<Option<JoinHandle<()>>>,
    snapshot_tx: Rc<watch::Sender<TimerSnapshot>>,
}

impl Countdown {
    pub fn new(initial_seconds: u32) -> Self {
        let timer = CountdownTimer::new(initial_seconds);
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::from(&timer));
        Self {
            timer: Rc::new(RefCell::new(timer)),
            ticker: RefCell::new(None),
            snapshot_tx: Rc::new(snapshot_tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Must be called from within a `LocalSet`.
    pub fn start(&self) {
        if !self.timer.borrow_mut().start() {
            debug!("Countdown start ignored");
            self.publish();
            return;
        }
        self.cancel_ticker();

        let timer = Rc::clone(&self.timer);
        let snapshot_tx = Rc::clone(&self.snapshot_tx);
        let handle = spawn_local(async move {
            let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                ticks.tick().await;
                let finished = timer.borrow_mut().tick();
                snapshot_tx.send_replace(TimerSnapshot::from(&*timer.borrow()));
                if finished {
                    info!("Countdown finished");
                    break;
                }
            }
        });
        *self.ticker.borrow_mut() = Some(handle);

        info!(remaining = self.timer.borrow().remaining_seconds(), "Countdown started");
        self.publish();
    }

    pub fn stop(&self) {
        self.cancel_ticker();
        self.timer.borrow_mut().stop();
        self.publish();
    }

    pub fn reset(&self) {
        self.cancel_ticker();
        self.timer.borrow_mut().reset();
        self.publish();
    }

    fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.borrow_mut().take() {
            handle.abort();
        }
    }

    fn publish(&self) {
        let snapshot = TimerSnapshot::from(&*self.timer.borrow());
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_once_per_second() {
        LocalSet::new()
            .run_until(async {
                let countdown = Countdown::new(5);
                countdown.start();
                assert_eq!(countdown.snapshot().state, TimerState::Running);

                sleep(Duration::from_millis(3_500)).await;
                let snapshot = countdown.snapshot();
                assert_eq!(snapshot.remaining_seconds, 2);
                assert_eq!(snapshot.display, "00:02");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_tick_source() {
        LocalSet::new()
            .run_until(async {
                let countdown = Countdown::new(10);
                countdown.start();
                countdown.start();

                sleep(Duration::from_millis(4_500)).await;
                assert_eq!(countdown.snapshot().remaining_seconds, 6);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishes_and_resets() {
        LocalSet::new()
            .run_until(async {
                let countdown = Countdown::new(3);
                let mut rx = countdown.subscribe();
                countdown.start();

                sleep(Duration::from_millis(10_500)).await;
                assert_eq!(countdown.snapshot().remaining_seconds, 0);
                assert_eq!(countdown.snapshot().state, TimerState::Finished);
                assert!(countdown.ticker.borrow().as_ref().map_or(true, JoinHandle::is_finished));

                countdown.reset();
                assert_eq!(rx.borrow_and_update().remaining_seconds, 3);
                assert_eq!(countdown.snapshot().state, TimerState::Stopped);

                // restartable after reset
                countdown.start();
                sleep(Duration::from_millis(1_500)).await;
                assert_eq!(countdown.snapshot().remaining_seconds, 2);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_remaining() {
        LocalSet::new()
            .run_until(async {
                let countdown = Countdown::new(60);
                countdown.start();
                sleep(Duration::from_millis(2_500)).await;
                countdown.stop();
                sleep(Duration::from_secs(10)).await;

                let snapshot = countdown.snapshot();
                assert_eq!(snapshot.remaining_seconds, 58);
                assert_eq!(snapshot.state, TimerState::Stopped);
                assert_eq!(snapshot.display, "00:58");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_ticker() {
        LocalSet::new()
            .run_until(async {
                let countdown = Countdown::new(30);
                let rx = countdown.subscribe();
                countdown.start();
                drop(countdown);

                sleep(Duration::from_secs(5)).await;
                assert_eq!(rx.borrow().remaining_seconds, 30);
            })
            .await;
    }
}
