//! Failure-counting circuit breaker for the judge transport.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{info, warn};

/// Point-in-time view of the breaker, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub failures: u32,
    pub tripped: bool,
}

#[derive(Debug)]
struct BreakerState {
    failures: u32,
    last_failure: Option<Instant>,
    tripped: bool,
}

/// Trips after a run of transport failures and fails fast until a reset
/// window has passed since the most recent failure.
///
/// Successes do not touch the counter; the only way back to the closed
/// state is the elapsed reset window. One breaker is shared by every
/// request flowing through an engine instance.
#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    reset_after: Duration,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(threshold: u32, reset_after: Duration) -> Self {
        Self {
            threshold,
            reset_after,
            state: Mutex::new(BreakerState {
                failures: 0,
                last_failure: None,
                tripped: false,
            }),
        }
    }

    /// Gate check before a judge attempt.
    ///
    /// Returns `false` while tripped and still inside the reset window.
    /// Once the window has elapsed the breaker clears its state and the
    /// call proceeds.
    pub fn allow_call(&self) -> bool {
        let mut state = self.state.lock();
        if !state.tripped {
            return true;
        }

        let cooling = state
            .last_failure
            .map(|at| at.elapsed() < self.reset_after)
            .unwrap_or(false);
        if cooling {
            return false;
        }

        info!("judge circuit breaker reset window elapsed, closing");
        state.failures = 0;
        state.last_failure = None;
        state.tripped = false;
        true
    }

    /// Records a failed judge attempt, tripping once the threshold is hit.
    pub fn record_failure(&self) {
        let mut state = self.state.lock();
        state.failures += 1;
        state.last_failure = Some(Instant::now());
        if !state.tripped && state.failures >= self.threshold {
            state.tripped = true;
            warn!(failures = state.failures, "judge circuit breaker tripped");
        }
    }

    #[inline]
    pub fn snapshot(&self) -> BreakerSnapshot {
        let state = self.state.lock();
        BreakerSnapshot {
            failures: state.failures,
            tripped: state.tripped,
        }
    }
}
