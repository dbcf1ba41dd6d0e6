// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced search over the option catalog.
//!
//! Keystrokes update the raw query immediately; the filtered list is recomputed only once the
//! query has been stable for the debounce window (trailing edge, last keystroke wins).

use std::time::{Duration, Instant};

use memchr::memmem;

use crate::model::{Catalog, StateOption, TimerId};
use crate::timer::TimerArena;

/// Case-insensitive substring match against each option's label, keeping catalog order.
///
/// Only an empty query matches everything; whitespace is part of the needle.
pub fn filter_options(query: &str, catalog: &[StateOption]) -> Vec<StateOption> {
    if query.is_empty() {
        return catalog.to_vec();
    }
    let needle = query.to_lowercase();

    let finder = memmem::Finder::new(needle.as_bytes());
    catalog
        .iter()
        .filter(|option| finder.find(option.label().to_lowercase().as_bytes()).is_some())
        .cloned()
        .collect()
}

#[derive(Debug)]
pub struct DebouncedFilter {
    catalog: Catalog,
    delay: Duration,
    raw_query: String,
    settled_query: String,
    filtered: Vec<StateOption>,
    timers: TimerArena<String>,
    pending: Option<TimerId>,
}

impl DebouncedFilter {
    pub fn new(catalog: Catalog, delay: Duration) -> Self {
        let filtered = catalog.to_vec();
        Self {
            catalog,
            delay,
            raw_query: String::new(),
            settled_query: String::new(),
            filtered,
            timers: TimerArena::new(),
            pending: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn settled_query(&self) -> &str {
        &self.settled_query
    }

    pub fn filtered(&self) -> &[StateOption] {
        &self.filtered
    }

    pub fn has_pending_settle(&self) -> bool {
        self.pending.is_some()
    }

    /// Records the raw input and restarts the debounce window.
    pub fn on_query_change(&mut self, raw: impl Into<String>, now: Instant) {
        self.raw_query = raw.into();
        if let Some(pending) = self.pending.take() {
            self.timers.cancel(pending);
        }
        self.pending = Some(self.timers.schedule(now + self.delay, self.raw_query.clone()));
    }

    /// Fires the pending settle if its window has elapsed. Returns `true` when the filtered list
    /// was recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some((_, query)) = self.timers.drain_due(now).into_iter().last() else {
            return false;
        };
        self.pending = None;
        self.settle(query);
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Drops any pending settle; the last settled result stays in place.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.pending = None;
    }

    fn settle(&mut self, query: String) {
        self.filtered = filter_options(&query, &self.catalog);
        tracing::debug!(query = %query, matches = self.filtered.len(), "query settled");
        self.settled_query = query;
    }
}
