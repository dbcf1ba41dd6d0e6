// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session state container.
//!
//! The store owns every component and is mutated only through [`Store::dispatch`] and
//! [`Store::tick`]. Asynchronous work is never started here; dispatch returns an [`Effect`]
//! that the driver performs and later feeds back as [`Action::FetchSettled`].

use std::time::Instant;

use crate::config::Config;
use crate::filter::DebouncedFilter;
use crate::grid::{ExpandChange, GridController};
use crate::model::{Catalog, NotificationId, SelectionToken, StateOption, StateRecord};
use crate::notify::{NotificationCenter, NotificationKind};
use crate::provider::ProviderError;
use crate::snapshot::{NotificationView, OptionView, RecordView, RenderSnapshot};
use crate::timer::earliest;
use crate::workflow::{FetchRequest, Resolution, SelectionWorkflow};

pub const FETCH_SUCCESS_MESSAGE: &str = "State Data Retrieved!";
pub const CLEAR_PROMPT_MESSAGE: &str = "Please search for a state!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    QueryChanged(String),
    /// Focus on the search input opens the dropdown.
    OpenDropdown,
    CloseDropdown,
    MoveHighlight(isize),
    SelectHighlighted,
    Select(StateOption),
    FetchSettled {
        token: SelectionToken,
        result: Result<StateRecord, ProviderError>,
    },
    ToggleExpanded,
    Dismiss(NotificationId),
    /// Dismisses the most recent notification, if any.
    DismissLatest,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
}

#[derive(Debug)]
pub struct Store {
    filter: DebouncedFilter,
    notifications: NotificationCenter,
    workflow: SelectionWorkflow,
    grid: GridController,
    surface_fetch_errors: bool,
    dropdown_open: bool,
    highlighted: Option<usize>,
    torn_down: bool,
}

impl Store {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        let timings = &config.timings;
        let filter = DebouncedFilter::new(catalog, timings.debounce());
        let highlighted = (!filter.filtered().is_empty()).then_some(0);
        Self {
            filter,
            notifications: NotificationCenter::new(timings.notification_lifetime()),
            workflow: SelectionWorkflow::new(),
            grid: GridController::new(timings.fade(), timings.row_stagger()),
            surface_fetch_errors: config.surface_fetch_errors,
            dropdown_open: false,
            highlighted,
            torn_down: false,
        }
    }

    pub fn filter(&self) -> &DebouncedFilter {
        &self.filter
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn workflow(&self) -> &SelectionWorkflow {
        &self.workflow
    }

    pub fn grid(&self) -> &GridController {
        &self.grid
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Open and showing at least one option.
    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open && !self.filter.filtered().is_empty()
    }

    /// Starts the grid's first fade-in, as on first display with no record yet.
    pub fn mount(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.grid.restart_fade(now);
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) -> Effect {
        if self.torn_down {
            tracing::debug!(?action, "ignoring action after teardown");
            return Effect::None;
        }

        let effect = self.reduce(action, now);
        self.grid.sync_record(self.workflow.record_rev(), now);
        effect
    }

    fn reduce(&mut self, action: Action, now: Instant) -> Effect {
        match action {
            Action::QueryChanged(raw) => {
                self.filter.on_query_change(raw, now);
                self.dropdown_open = true;
            }
            Action::OpenDropdown => self.dropdown_open = true,
            Action::CloseDropdown => self.dropdown_open = false,
            Action::MoveHighlight(delta) => self.move_highlight(delta),
            Action::SelectHighlighted => {
                let option = self
                    .highlighted
                    .filter(|_| self.dropdown_open())
                    .and_then(|index| self.filter.filtered().get(index).cloned());
                if let Some(option) = option {
                    return self.select(option, now);
                }
            }
            Action::Select(option) => return self.select(option, now),
            Action::FetchSettled { token, result } => self.settle_fetch(token, result, now),
            Action::ToggleExpanded => {
                if self.grid.toggle_expanded(&mut self.notifications, now) == ExpandChange::Collapsed
                {
                    tracing::debug!("grid collapsed");
                }
            }
            Action::Dismiss(id) => {
                self.notifications.dismiss(id);
            }
            Action::DismissLatest => {
                if let Some(id) = self.notifications.items().last().map(|item| item.id()) {
                    self.notifications.dismiss(id);
                }
            }
            Action::Clear => self.clear(now),
        }
        Effect::None
    }

    fn select(&mut self, option: StateOption, now: Instant) -> Effect {
        self.filter.on_query_change(option.label(), now);
        self.dropdown_open = false;
        Effect::Fetch(self.workflow.select(option))
    }

    fn settle_fetch(
        &mut self,
        token: SelectionToken,
        result: Result<StateRecord, ProviderError>,
        now: Instant,
    ) {
        match self.workflow.resolve(token, result) {
            Resolution::Applied(_) => {
                self.notifications.enqueue(FETCH_SUCCESS_MESSAGE, NotificationKind::Success, now);
            }
            Resolution::Failed(err) => {
                if self.surface_fetch_errors {
                    let code = self.workflow.selected().map(|option| option.value()).unwrap_or("?");
                    self.notifications.enqueue(
                        format!("Could not load {code}: {err}"),
                        NotificationKind::Error,
                        now,
                    );
                }
            }
            Resolution::Stale => {}
        }
    }

    fn clear(&mut self, now: Instant) {
        if self.workflow.selected().is_none() {
            return;
        }
        self.workflow.clear();
        self.filter.on_query_change("", now);
        self.notifications.enqueue(CLEAR_PROMPT_MESSAGE, NotificationKind::Info, now);
    }

    fn move_highlight(&mut self, delta: isize) {
        let len = self.filter.filtered().len();
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.dropdown_open = true;
        let current = self.highlighted.unwrap_or(0) as isize;
        self.highlighted = Some((current + delta).rem_euclid(len as isize) as usize);
    }

    /// Fires every due timer. Returns `true` if anything observable changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let settled = self.filter.tick(now);
        if settled {
            self.highlighted = (!self.filter.filtered().is_empty()).then_some(0);
        }
        let expired = self.notifications.tick(now);
        let faded = self.grid.tick(now);
        settled || expired > 0 || faded
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.torn_down {
            return None;
        }
        earliest([
            self.filter.next_deadline(),
            self.notifications.next_deadline(),
            self.grid.next_deadline(),
        ])
    }

    /// Cancels every outstanding timer. Further actions and ticks are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.filter.teardown();
        self.notifications.teardown();
        self.grid.teardown();
        self.torn_down = true;
        tracing::info!("store torn down");
    }

    pub fn snapshot(&self, now: Instant) -> RenderSnapshot {
        let record = self.workflow.current_record().map(|record| record.as_ref());
        let is_loading = self.workflow.is_loading();
        let dropdown_open = self.dropdown_open();
        RenderSnapshot {
            selected_option: self.workflow.selected().map(OptionView::from),
            current_record: record.map(RecordView::from),
            is_loading,
            query: self.filter.raw_query().to_owned(),
            filtered_options: self.filter.filtered().iter().map(OptionView::from).collect(),
            dropdown_open,
            highlighted_option: self.highlighted.filter(|_| dropdown_open),
            expanded: self.grid.expanded(),
            visible: self.grid.visible(),
            notifications: self
                .notifications
                .items()
                .iter()
                .map(|item| NotificationView {
                    id: item.id().get(),
                    message: item.message().to_owned(),
                    kind: item.kind(),
                    remaining_ms: u64::try_from(
                        self.notifications.remaining(item, now).as_millis(),
                    )
                    .unwrap_or(u64::MAX),
                })
                .collect(),
            grid: self.grid.view(record, is_loading, now),
        }
    }
}

#[cfg(test)]
mod tests;
