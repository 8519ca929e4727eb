//! Touch disambiguation: scroll/swipe vs. hold-to-preview vs. tap.
//!
//! `touch_start` arms the hold timer. Moving past the cancel distance before
//! it fires hands the gesture to native scrolling for good. If the timer
//! fires first the finger becomes a live preview cursor.

use std::time::{Duration, Instant};

use crate::services::grid::GridPoint;

use super::timers::Deadline;

pub const DEFAULT_HOLD_THRESHOLD: Duration = Duration::from_millis(300);
pub const DEFAULT_CANCEL_DISTANCE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchPhase {
    Idle,
    /// Finger down, hold timer running.
    Pending { origin: GridPoint },
    /// Classified as scroll; ignored until the finger lifts.
    Scrolling,
    /// Hold fired; movement drives the preview.
    Holding { position: GridPoint },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    ScrollDetected,
    HoldStarted(GridPoint),
    HoldMoved(GridPoint),
    /// Finger lifted after a hold.
    HoldReleased(GridPoint),
    /// Finger lifted quickly without moving.
    Tap(GridPoint),
}

#[derive(Debug, Clone)]
pub struct TouchGesture {
    hold_threshold: Duration,
    cancel_distance: f32,
    phase: TouchPhase,
    hold_timer: Deadline,
    last_position: GridPoint,
}

impl Default for TouchGesture {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_THRESHOLD, DEFAULT_CANCEL_DISTANCE)
    }
}

impl TouchGesture {
    pub fn new(hold_threshold: Duration, cancel_distance: f32) -> Self {
        Self {
            hold_threshold,
            cancel_distance,
            phase: TouchPhase::Idle,
            hold_timer: Deadline::default(),
            last_position: GridPoint::default(),
        }
    }

    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.phase, TouchPhase::Holding { .. })
    }

    /// A new touch invalidates whatever the previous one left behind.
    pub fn touch_start(&mut self, position: GridPoint, now: Instant) {
        self.phase = TouchPhase::Pending { origin: position };
        self.last_position = position;
        self.hold_timer.arm(now, self.hold_threshold);
    }

    pub fn touch_move(&mut self, position: GridPoint, now: Instant) -> Option<GestureEvent> {
        self.last_position = position;
        // A hold that should already have fired wins over this move.
        let fired = self.poll(now);

        match self.phase {
            TouchPhase::Pending { origin } => {
                // Either axis: a vertical grid scrolls along y.
                let dx = (position.x - origin.x).abs();
                let dy = (position.y - origin.y).abs();
                if dx.max(dy) > self.cancel_distance {
                    self.hold_timer.cancel();
                    self.phase = TouchPhase::Scrolling;
                    Some(GestureEvent::ScrollDetected)
                } else {
                    None
                }
            }
            TouchPhase::Holding { .. } => {
                self.phase = TouchPhase::Holding { position };
                Some(fired.unwrap_or(GestureEvent::HoldMoved(position)))
            }
            TouchPhase::Idle | TouchPhase::Scrolling => None,
        }
    }

    /// Fires the hold timer if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<GestureEvent> {
        let TouchPhase::Pending { .. } = self.phase else {
            return None;
        };
        if !self.hold_timer.fire_if_due(now) {
            return None;
        }
        let position = self.last_position;
        self.phase = TouchPhase::Holding { position };
        Some(GestureEvent::HoldStarted(position))
    }

    pub fn touch_end(&mut self, now: Instant) -> Option<GestureEvent> {
        self.poll(now);
        let event = match self.phase {
            TouchPhase::Pending { .. } => Some(GestureEvent::Tap(self.last_position)),
            TouchPhase::Holding { position } => Some(GestureEvent::HoldReleased(position)),
            TouchPhase::Idle | TouchPhase::Scrolling => None,
        };
        self.reset();
        event
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn next_wake(&self, now: Instant) -> Option<Duration> {
        self.hold_timer.remaining(now)
    }

    fn reset(&mut self) {
        self.phase = TouchPhase::Idle;
        self.hold_timer.cancel();
    }
}
