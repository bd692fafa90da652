use serde::{Deserialize, Serialize};

/// Seconds on the clock at the start of every level.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 180;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CountdownState {
    Stopped,
    Running,
    Paused,
    Expired,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The clock is not running, nothing changed.
    Ignored,
    Ticked(u32),
    Expired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Level countdown driven by an external one second tick.
///
/// The tick source keeps firing while paused; ticks simply have no effect outside
/// [`CountdownState::Running`]. Expiry is terminal until the next [`Countdown::start`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    pub const fn new() -> Self {
        Self {
            remaining: 0,
            state: CountdownState::Stopped,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running)
    }

    pub fn start(&mut self, limit_secs: u32) {
        self.remaining = limit_secs;
        self.state = if limit_secs == 0 {
            CountdownState::Expired
        } else {
            CountdownState::Running
        };
    }

    pub fn stop(&mut self) {
        if !matches!(self.state, CountdownState::Expired) {
            self.state = CountdownState::Stopped;
        }
    }

    /// Stops and clears the clock, back to a freshly constructed countdown.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn pause(&mut self) {
        if matches!(self.state, CountdownState::Running) {
            self.state = CountdownState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if matches!(self.state, CountdownState::Paused) {
            self.state = CountdownState::Running;
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked(self.remaining)
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
