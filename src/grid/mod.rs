// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid presentation controller.
//!
//! Two independent flags drive rendering. `expanded` is user-toggled from the summary row and
//! collapsing it nags through the notification center. `visible` drops to `false` on every
//! record change and comes back after the fade delay; a newer change reschedules the fade.

use std::time::{Duration, Instant};

use crate::model::{StateRecord, TimerId};
use crate::notify::{NotificationCenter, NotificationKind};
use crate::snapshot::{CityRowView, GridView, TableView};
use crate::timer::TimerArena;

pub mod format;

pub const COLLAPSE_WARNING: &str = "Expand data!";
pub const SKELETON_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandChange {
    Expanded,
    Collapsed,
}

#[derive(Debug)]
pub struct GridController {
    fade: Duration,
    row_stagger: Duration,
    expanded: bool,
    visible: bool,
    visible_since: Option<Instant>,
    seen_record_rev: u64,
    timers: TimerArena<Instant>,
    pending_fade: Option<TimerId>,
}

impl GridController {
    pub fn new(fade: Duration, row_stagger: Duration) -> Self {
        Self {
            fade,
            row_stagger,
            expanded: true,
            visible: false,
            visible_since: None,
            seen_record_rev: 0,
            timers: TimerArena::new(),
            pending_fade: None,
        }
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn has_pending_fade(&self) -> bool {
        self.pending_fade.is_some()
    }

    /// Summary-row click.
    pub fn toggle_expanded(
        &mut self,
        notifications: &mut NotificationCenter,
        now: Instant,
    ) -> ExpandChange {
        self.expanded = !self.expanded;
        if self.expanded {
            return ExpandChange::Expanded;
        }
        notifications.enqueue(COLLAPSE_WARNING, NotificationKind::Error, now);
        ExpandChange::Collapsed
    }

    /// Restarts the fade if `record_rev` differs from the last one seen.
    pub fn sync_record(&mut self, record_rev: u64, now: Instant) -> bool {
        if record_rev == self.seen_record_rev {
            return false;
        }
        self.seen_record_rev = record_rev;
        self.restart_fade(now);
        true
    }

    pub fn restart_fade(&mut self, now: Instant) {
        if let Some(pending) = self.pending_fade.take() {
            self.timers.cancel(pending);
        }
        self.visible = false;
        self.visible_since = None;
        let deadline = now + self.fade;
        self.pending_fade = Some(self.timers.schedule(deadline, deadline));
    }

    /// Completes a due fade. Returns `true` when `visible` flipped on.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some((_, deadline)) = self.timers.drain_due(now).into_iter().last() else {
            return false;
        };
        self.pending_fade = None;
        self.visible = true;
        self.visible_since = Some(deadline);
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn stagger_delay(&self, index: usize) -> Duration {
        self.row_stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Whether the cascade has reached row `index`.
    pub fn row_revealed(&self, index: usize, now: Instant) -> bool {
        match self.visible_since {
            Some(since) if self.visible => now >= since + self.stagger_delay(index),
            _ => false,
        }
    }

    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.pending_fade = None;
    }

    pub fn view(&self, record: Option<&StateRecord>, is_loading: bool, now: Instant) -> GridView {
        if is_loading {
            return GridView::Skeleton {
                columns: format::COLUMN_COUNT,
                rows: SKELETON_ROWS,
            };
        }
        let Some(record) = record else {
            return GridView::Empty;
        };

        let cities = if self.expanded {
            record
                .cities
                .iter()
                .enumerate()
                .map(|(index, city)| CityRowView {
                    cells: format::city_cells(city),
                    stagger_delay_ms: duration_ms(self.stagger_delay(index)),
                    revealed: self.row_revealed(index, now),
                })
                .collect()
        } else {
            Vec::new()
        };

        GridView::Table(TableView {
            header: format::HEADER.iter().map(|cell| (*cell).to_owned()).collect(),
            summary: format::summary_cells(record),
            expanded: self.expanded,
            visible: self.visible,
            cities,
        })
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
