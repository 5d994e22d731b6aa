//! Debounced evaluation scheduling for free-text filter input.
//!
//! Typing into a filter box should not re-evaluate the predicate on every
//! keystroke. This component delays evaluation until input pauses, while
//! everything else (clearing the value, applying a date range, switching
//! fields) evaluates immediately and bypasses the timer entirely.
//!
//! The mechanics mirror a countdown timer component: each instance owns a
//! unique id, every (re)schedule bumps a generation tag, and the delayed
//! [`ElapsedMsg`] is only honored when both id and tag still match. A
//! superseded or cancelled schedule therefore dies silently when its
//! message finally arrives, which is also what makes unmount safe: a
//! message raced past a disposed view matches no live instance.
//!
//! At most one evaluation is ever pending per instance.
//!
//! # Examples
//!
//! ```rust
//! use datatable_widgets::debounce;
//! use std::time::Duration;
//!
//! let mut pending = debounce::Model::new();
//! assert_eq!(pending.delay(), Duration::from_millis(300));
//!
//! // Each keystroke reschedules; only the last survives.
//! let _cmd = pending.schedule();
//! let _cmd = pending.schedule();
//! assert!(pending.is_pending());
//!
//! pending.cancel();
//! assert!(!pending.is_pending());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Default quiet period after the last keystroke before evaluation fires.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Message delivered when a scheduled quiet period elapses.
///
/// Carries the scheduling instance's id and the generation tag of the
/// schedule that produced it; [`Model::try_elapse`] rejects anything
/// stale.
#[derive(Debug, Clone)]
pub struct ElapsedMsg {
    /// The unique identifier of the debouncer that scheduled this.
    pub id: i64,
    tag: i64,
}

/// A single-pending-timer debounce scheduler.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,
    delay: Duration,
    pending: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a debouncer with the default delay.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    /// Creates a debouncer with a custom delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            id: next_id(),
            tag: 0,
            delay,
            pending: false,
        }
    }

    /// The unique identifier of this instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether an evaluation is currently scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Schedules (or reschedules) an evaluation after the quiet period.
    ///
    /// Bumping the generation tag invalidates any previously returned
    /// command's message, so a burst of keystrokes produces exactly one
    /// accepted [`ElapsedMsg`]: the one from the final call.
    pub fn schedule(&mut self) -> Cmd {
        self.tag += 1;
        self.pending = true;
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.delay, move |_| Box::new(ElapsedMsg { id, tag }) as Msg)
    }

    /// Cancels any pending evaluation. The in-flight message, if one
    /// exists, will be rejected on arrival.
    pub fn cancel(&mut self) {
        self.tag += 1;
        self.pending = false;
    }

    /// Consumes an elapsed message, returning `true` when it corresponds
    /// to the live schedule of this instance.
    ///
    /// Messages for other instances, superseded schedules, or an instance
    /// with nothing pending are rejected.
    pub fn try_elapse(&mut self, msg: &ElapsedMsg) -> bool {
        if !self.pending || msg.id != self.id || msg.tag != self.tag {
            return false;
        }
        self.pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        let a = Model::new();
        let b = Model::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_schedule_then_elapse() {
        let mut m = Model::new();
        let _cmd = m.schedule();
        assert!(m.is_pending());

        let msg = ElapsedMsg {
            id: m.id(),
            tag: m.tag,
        };
        assert!(m.try_elapse(&msg));
        assert!(!m.is_pending());

        // The same message is spent; replaying it does nothing.
        assert!(!m.try_elapse(&msg));
    }

    #[test]
    fn test_reschedule_supersedes_prior_timer() {
        let mut m = Model::new();
        let _cmd = m.schedule();
        let first_tag = m.tag;
        let _cmd = m.schedule();

        // The first schedule's message arrives late and is rejected; the
        // second is honored. Exactly one evaluation fires for the burst.
        assert!(!m.try_elapse(&ElapsedMsg {
            id: m.id(),
            tag: first_tag,
        }));
        assert!(m.try_elapse(&ElapsedMsg {
            id: m.id(),
            tag: m.tag,
        }));
    }

    #[test]
    fn test_cancel_invalidates_in_flight_message() {
        let mut m = Model::new();
        let _cmd = m.schedule();
        let tag = m.tag;
        m.cancel();

        assert!(!m.is_pending());
        assert!(!m.try_elapse(&ElapsedMsg { id: m.id(), tag }));
    }

    #[test]
    fn test_foreign_messages_are_rejected() {
        let mut a = Model::new();
        let mut b = Model::new();
        let _cmd = a.schedule();
        let _cmd = b.schedule();

        assert!(!a.try_elapse(&ElapsedMsg {
            id: b.id(),
            tag: b.tag,
        }));
        assert!(b.try_elapse(&ElapsedMsg {
            id: b.id(),
            tag: b.tag,
        }));
    }

    #[test]
    fn test_custom_delay() {
        let m = Model::with_delay(Duration::from_millis(150));
        assert_eq!(m.delay(), Duration::from_millis(150));
    }
}
