//! Time as a capability. The scheduler never reads the wall clock directly,
//! so tests can drive the loop with simulated time instead of real sleep.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Nanoseconds since some fixed origin (process start for the real
    /// clock). Only differences are meaningful.
    fn now(&self) -> u64;

    fn sleep(&self, ns: u64);

    /// Give other threads a chance to run without sleeping.
    fn yield_now(&self);
}

// ── Real clock ────────────────────────────────────────────────────────────────

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn sleep(&self, ns: u64) {
        thread::sleep(Duration::from_nanos(ns));
    }

    fn yield_now(&self) {
        thread::yield_now();
    }
}

// ── Deterministic clock ───────────────────────────────────────────────────────

/// A clock tests advance by hand. `sleep` jumps time forward instantly, so
/// a paced loop runs as fast as the test can drive it.
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock { now: Cell::new(0) }
    }

    pub fn advance(&self, ns: u64) {
        self.now.set(self.now.get() + ns);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }

    fn sleep(&self, ns: u64) {
        self.advance(ns);
    }

    fn yield_now(&self) {}
}
