//! Deadline-style timers polled from the frame loop.
//!
//! Nothing here sleeps or spawns: callers pass the current `Instant` in, which
//! keeps every race (hold vs. move, resize bursts) deterministic in tests.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::utils::date::millis_until_next_minute;

/// A single cancelable deadline. Arming again replaces the previous one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Disarms and returns true once the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }
}

/// Holds the latest value until no new value has arrived for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    timer: Deadline,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            timer: Deadline::default(),
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.timer.arm(now, self.delay);
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.timer.fire_if_due(now) {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.timer.cancel();
    }

    pub fn next_wake(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }
}

/// Fires once per wall-clock minute, aligned to the minute boundary.
#[derive(Debug, Clone, Default)]
pub struct MinuteTicker {
    timer: Deadline,
    last_fired_minute: Option<i64>,
}

impl MinuteTicker {
    pub fn start(&mut self, now: Instant, wall: DateTime<Utc>) {
        self.schedule(now, wall);
    }

    /// True when a minute boundary has passed since the last tick; the next
    /// tick is scheduled before returning.
    pub fn poll(&mut self, now: Instant, wall: DateTime<Utc>) -> bool {
        if !self.timer.is_armed() {
            self.schedule(now, wall);
        }
        if !self.timer.fire_if_due(now) {
            return false;
        }

        let minute = wall.timestamp().div_euclid(60);
        let fresh = self.last_fired_minute != Some(minute);
        self.last_fired_minute = Some(minute);
        self.schedule(now, wall);
        fresh
    }

    pub fn next_wake(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    fn schedule(&mut self, now: Instant, wall: DateTime<Utc>) {
        let mut delay_ms = millis_until_next_minute(wall);
        // Sitting exactly on a boundary that already ticked: wait a full minute.
        if delay_ms == 0 && self.last_fired_minute == Some(wall.timestamp().div_euclid(60)) {
            delay_ms = 60_000;
        }
        self.timer.arm(now, Duration::from_millis(delay_ms));
    }
}
