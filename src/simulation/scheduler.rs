use std::time::{Duration, Instant};

/// Whether scheduled ticks advance the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Two-state run/pause machine. Starts paused; start and stop are idempotent.
#[derive(Debug, Default)]
pub struct Scheduler {
    state: RunState,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Returns true if the state changed
    pub fn start(&mut self) -> bool {
        let changed = self.state == RunState::Paused;
        self.state = RunState::Running;
        changed
    }

    /// Returns true if the state changed
    pub fn stop(&mut self) -> bool {
        let changed = self.state == RunState::Running;
        self.state = RunState::Paused;
        changed
    }

    pub fn toggle(&mut self) -> RunState {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.state
    }
}

/// Fixed-period tick source driven by whatever clock the host feeds it.
///
/// Missed deadlines are not queued: a late poll fires once and the next
/// deadline is measured from that poll.
#[derive(Debug)]
pub struct TickTimer {
    period: Duration,
    next_due: Instant,
}

impl TickTimer {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Instant of the next tick
    pub fn deadline(&self) -> Instant {
        self.next_due
    }

    /// Returns true if a tick is due at `now`, re-arming for `now + period`
    pub fn poll(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due = now + self.period;
            true
        } else {
            false
        }
    }
}
