//! Deferred AI moves.
//!
//! A computer move is shown only after an artificial thinking delay. The
//! delay is modelled as a ticket with a deadline; nothing touches the board
//! until a live ticket is redeemed.

use web_time::{Duration, Instant};

/// Handle for one scheduled AI move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingTicket {
    generation: u64,
    ready_at: Instant,
}

impl ThinkingTicket {
    pub fn ready_at(&self) -> Instant {
        self.ready_at
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.ready_at
    }

    /// Time left until the ticket is due, zero once due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.ready_at.saturating_duration_since(now)
    }
}

/// Tracks the single pending ticket. Cancelling or invalidating bumps the
/// generation so older tickets can never be redeemed.
#[derive(Debug, Default)]
pub(crate) struct ThinkingScheduler {
    generation: u64,
    pending: Option<ThinkingTicket>,
}

impl ThinkingScheduler {
    /// Replaces any pending ticket with a new one due after `delay`.
    pub(crate) fn schedule(&mut self, now: Instant, delay: Duration) -> ThinkingTicket {
        self.generation += 1;
        let ticket = ThinkingTicket {
            generation: self.generation,
            ready_at: now + delay,
        };
        self.pending = Some(ticket);
        ticket
    }

    pub(crate) fn pending(&self) -> Option<ThinkingTicket> {
        self.pending
    }

    /// Drops the pending ticket. Returns whether there was one.
    pub(crate) fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.pending.take().is_some()
    }

    /// Consumes the pending ticket if it is due at `now`.
    pub(crate) fn take_due(&mut self, now: Instant) -> Option<ThinkingTicket> {
        match self.pending {
            Some(ticket) if ticket.is_due(now) => self.pending.take(),
            _ => None,
        }
    }

    /// Consumes `ticket` if it is the live pending ticket.
    pub(crate) fn redeem(&mut self, ticket: ThinkingTicket) -> bool {
        if self.pending == Some(ticket) && ticket.generation == self.generation {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
