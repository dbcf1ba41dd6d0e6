// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cancellable one-shot timers.
//!
//! A [`TimerArena`] is owned by the component that schedules into it. Nothing runs on its own:
//! the owner hands in the current instant and receives the events that became due. Dropping or
//! clearing the arena therefore cancels every outstanding timer, and no callback can outlive
//! its component.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::model::{IdSequence, TimerId};
use crate::model::ids::TimerIdTag;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Scheduled<E> {
    deadline: Instant,
    event: E,
}

#[derive(Debug)]
pub struct TimerArena<E> {
    ids: IdSequence<TimerIdTag>,
    timers: BTreeMap<TimerId, Scheduled<E>>,
}

impl<E> Default for TimerArena<E> {
    fn default() -> Self {
        Self {
            ids: IdSequence::default(),
            timers: BTreeMap::new(),
        }
    }
}

impl<E> TimerArena<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, event: E) -> TimerId {
        let id = self.ids.mint();
        self.timers.insert(id, Scheduled { deadline, event });
        id
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        cancelled
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|scheduled| scheduled.deadline).min()
    }

    /// Removes and returns every timer with `deadline <= now`.
    ///
    /// Events come back ordered by deadline; ties keep scheduling order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<(TimerId, E)> {
        let due_ids: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, scheduled)| scheduled.deadline <= now)
            .map(|(id, _)| *id)
            .collect();

        let mut due: Vec<(Instant, TimerId, E)> = due_ids
            .into_iter()
            .filter_map(|id| {
                self.timers.remove(&id).map(|scheduled| (scheduled.deadline, id, scheduled.event))
            })
            .collect();
        due.sort_by_key(|(deadline, id, _)| (*deadline, *id));
        due.into_iter().map(|(_, id, event)| (id, event)).collect()
    }
}

/// Earliest of several optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{earliest, TimerArena};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn drains_only_due_timers_in_deadline_order() {
        let t0 = Instant::now();
        let mut arena = TimerArena::new();
        arena.schedule(t0 + ms(300), "late");
        arena.schedule(t0 + ms(100), "early");
        arena.schedule(t0 + ms(900), "pending");

        let fired: Vec<&str> = arena.drain_due(t0 + ms(300)).into_iter().map(|(_, e)| e).collect();
        assert_eq!(fired, vec!["early", "late"]);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.next_deadline(), Some(t0 + ms(900)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut arena = TimerArena::new();
        let id = arena.schedule(t0 + ms(10), ());
        assert!(arena.cancel(id));
        assert!(!arena.cancel(id));
        assert!(arena.drain_due(t0 + ms(1000)).is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_firing() {
        let t0 = Instant::now();
        let mut arena = TimerArena::new();
        let first = arena.schedule(t0, ());
        arena.drain_due(t0);
        let second = arena.schedule(t0, ());
        assert_ne!(first, second);
        assert!(!arena.is_pending(first));
    }

    #[test]
    fn cancel_all_empties_the_arena() {
        let t0 = Instant::now();
        let mut arena = TimerArena::new();
        arena.schedule(t0 + ms(1), 1);
        arena.schedule(t0 + ms(2), 2);
        assert_eq!(arena.cancel_all(), 2);
        assert!(arena.is_empty());
        assert_eq!(arena.next_deadline(), None);
    }

    #[test]
    fn earliest_skips_missing_deadlines() {
        let t0 = Instant::now();
        assert_eq!(earliest([None, Some(t0 + ms(5)), Some(t0 + ms(2))]), Some(t0 + ms(2)));
        assert_eq!(earliest([None, None]), None);
    }
}
