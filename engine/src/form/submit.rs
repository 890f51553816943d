//! Debounced auto-submit — latest-generation-wins token protocol
//!
//! The engine never owns timers; the rendering layer's event loop does.
//! Scheduling hands back a ticket carrying a monotonic generation; when
//! the host's delay elapses it offers the ticket back, and only the
//! newest pending ticket fires. A ticket from a superseded schedule, or
//! one arriving after teardown, is a no-op — a dangling timer can never
//! submit a dead form.

use std::cell::Cell;
use std::time::Duration;

use tracing::trace;

/// Token identifying one scheduled submit generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// Trailing-edge debounce state for auto-submit
#[derive(Debug)]
pub struct SubmitDebouncer {
    delay:      Duration,
    generation: Cell<u64>,
    pending:    Cell<bool>,
}

impl SubmitDebouncer {
    /// A debouncer with the quiet period the host should wait per ticket
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Cell::new(0),
            pending: Cell::new(false),
        }
    }

    /// The configured quiet period
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a submit, superseding any pending one
    ///
    /// Any interim edit reschedules, which resets the quiet period: only
    /// the final state within it is submitted.
    pub fn schedule(&self) -> SubmitTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        self.pending.set(true);
        SubmitTicket(next)
    }

    /// Offer an elapsed ticket back; `true` means the submit should run
    pub fn fire(&self, ticket: SubmitTicket) -> bool {
        if self.pending.get() && ticket.0 == self.generation.get() {
            self.pending.set(false);
            true
        } else {
            trace!(ticket = ticket.0, current = self.generation.get(), "stale submit ticket ignored");
            false
        }
    }

    /// Cancel any pending submit, e.g. on unmount
    pub fn cancel(&self) {
        self.pending.set(false);
        self.generation.set(self.generation.get() + 1);
    }

    /// Whether a scheduled submit has not yet fired or been cancelled
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
