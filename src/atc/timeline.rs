//! Virtual time for driving a [`Sequencer`] without waiting.
//!
//! Ticks scheduled here behave like real timers that cannot be recalled:
//! they stay pending after the sequencer stops and are delivered anyway.

use chrono::Duration;

use crate::adapters::memory::ManualClock;
use crate::ports::clock::Clock;

use super::sequencer::{Sequencer, Tick};

/// Pending ticks ordered by due time, delivered as the clock advances.
pub struct VirtualTimeline<'c> {
    clock: &'c ManualClock,
    pending: Vec<Tick>,
}

impl<'c> VirtualTimeline<'c> {
    /// Creates an empty timeline over `clock`.
    #[must_use]
    pub fn new(clock: &'c ManualClock) -> Self {
        Self { clock, pending: Vec::new() }
    }

    /// Adds `tick` to the pending set, if there is one.
    pub fn schedule(&mut self, tick: Option<Tick>) {
        if let Some(tick) = tick {
            self.pending.push(tick);
            self.pending.sort_by_key(|t| t.due);
        }
    }

    /// Number of ticks not yet delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward by `by`, delivering every tick that falls
    /// due on the way, including ticks scheduled by those deliveries.
    ///
    /// Returns how many ticks were delivered.
    pub fn advance(&mut self, by: Duration, sequencer: &mut Sequencer<'_>) -> usize {
        let until = self.clock.now() + by;
        let mut delivered = 0;
        while let Some(tick) = self.pop_due(until) {
            self.clock.advance_to(tick.due);
            let next = sequencer.fire(tick);
            self.schedule(next);
            delivered += 1;
        }
        self.clock.advance_to(until);
        delivered
    }

    /// Delivers ticks until none are pending.
    ///
    /// Returns how many ticks were delivered.
    pub fn run_until_idle(&mut self, sequencer: &mut Sequencer<'_>) -> usize {
        let mut delivered = 0;
        while !self.pending.is_empty() {
            let tick = self.pending.remove(0);
            self.clock.advance_to(tick.due);
            let next = sequencer.fire(tick);
            self.schedule(next);
            delivered += 1;
        }
        delivered
    }

    fn pop_due(&mut self, until: chrono::DateTime<chrono::Utc>) -> Option<Tick> {
        match self.pending.first() {
            Some(tick) if tick.due <= until => Some(self.pending.remove(0)),
            _ => None,
        }
    }
}
