//! Stall Watchdog
//!
//! Waits for the link to buffer enough bytes, aborting when the transfer
//! makes no forward progress for the configured stall timeout.
//!
//! The deadline is relative to the last satisfied wait (or the last explicit
//! [`Watchdog::reset`]), never to the start of the process.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{CartError, Result};
use crate::link::Link;

/// Time source used by the watchdog
pub trait Clock {
    /// Current instant
    fn now(&self) -> Instant;

    /// Suspend the caller
    fn sleep(&self, duration: Duration);
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(duration);
        }
    }
}

/// Deterministic clock: sleeping advances time instantly
///
/// Clones share the same timeline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move time forward
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Time elapsed since creation
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Progress-relative stall detector
pub struct Watchdog<C: Clock = SystemClock> {
    clock: C,
    stall_timeout: Duration,

    /// Zero means spin (yield only)
    poll_interval: Duration,

    /// Last time a wait was satisfied
    last_progress: Instant,
}

impl Watchdog<SystemClock> {
    /// Create a watchdog on the wall clock
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Watchdog<C> {
    /// Create a watchdog on the given clock
    pub fn with_clock(config: &Config, clock: C) -> Self {
        let last_progress = clock.now();
        Self {
            clock,
            stall_timeout: config.stall_timeout,
            poll_interval: config.poll_interval,
            last_progress,
        }
    }

    /// Count now as progress
    pub fn reset(&mut self) {
        self.last_progress = self.clock.now();
    }

    /// Time since the last progress
    pub fn idle(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.last_progress)
    }

    /// Get the stall timeout
    pub fn stall_timeout(&self) -> Duration {
        self.stall_timeout
    }

    /// Block until at least `count` bytes are buffered on the link
    ///
    /// Fails with `TransferStall` once `stall_timeout` passes without
    /// progress. There is no retry.
    pub fn await_bytes<L: Link + ?Sized>(&mut self, link: &mut L, count: usize) -> Result<()> {
        loop {
            let available = link.available()?;
            if available >= count {
                self.last_progress = self.clock.now();
                return Ok(());
            }

            let idle = self.idle();
            if idle >= self.stall_timeout {
                tracing::warn!(
                    "No progress for {:?} while waiting for {} bytes ({} available)",
                    idle,
                    count,
                    available
                );
                return Err(CartError::TransferStall {
                    timeout: self.stall_timeout,
                    expected: count,
                    available,
                });
            }

            // Never sleep past the deadline
            let remaining = self.stall_timeout - idle;
            self.clock.sleep(self.poll_interval.min(remaining));
        }
    }
}
