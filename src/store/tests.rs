// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::{fixture, rstest};

use super::{Action, Effect, Store, CLEAR_PROMPT_MESSAGE, FETCH_SUCCESS_MESSAGE};
use crate::config::Config;
use crate::grid::COLLAPSE_WARNING;
use crate::model::{catalog_from_pairs, StateOption, StateRecord};
use crate::notify::NotificationKind;
use crate::provider::mock::generate_record;
use crate::provider::ProviderError;
use crate::snapshot::GridView;
use crate::workflow::FetchRequest;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn record_for(option: &StateOption, seed: u64) -> StateRecord {
    generate_record(&mut StdRng::seed_from_u64(seed), option).expect("record")
}

fn expect_fetch(effect: Effect) -> FetchRequest {
    match effect {
        Effect::Fetch(request) => request,
        Effect::None => panic!("expected a fetch effect"),
    }
}

fn codes(store: &Store) -> Vec<String> {
    store.filter().filtered().iter().map(|option| option.value().to_owned()).collect()
}

struct StoreCtx {
    store: Store,
    t0: Instant,
}

impl StoreCtx {
    fn with_config(config: Config) -> Self {
        let catalog = catalog_from_pairs([("California", "CA"), ("New York", "NY"), ("Texas", "TX")]);
        Self {
            store: Store::new(catalog, &config),
            t0: Instant::now(),
        }
    }

    fn at(&self, offset_ms: u64) -> Instant {
        self.t0 + ms(offset_ms)
    }

    fn dispatch(&mut self, action: Action, offset_ms: u64) -> Effect {
        let now = self.at(offset_ms);
        self.store.dispatch(action, now)
    }

    fn tick(&mut self, offset_ms: u64) -> bool {
        let now = self.at(offset_ms);
        self.store.tick(now)
    }

    fn messages(&self) -> Vec<(String, NotificationKind)> {
        self.store
            .notifications()
            .items()
            .iter()
            .map(|item| (item.message().to_owned(), item.kind()))
            .collect()
    }
}

#[fixture]
fn ctx() -> StoreCtx {
    StoreCtx::with_config(Config::default())
}

#[rstest]
fn end_to_end_scenario(mut ctx: StoreCtx) {
    // Type "Cal" and wait for the debounce window.
    ctx.dispatch(Action::QueryChanged("C".to_owned()), 0);
    ctx.dispatch(Action::QueryChanged("Ca".to_owned()), 50);
    ctx.dispatch(Action::QueryChanged("Cal".to_owned()), 100);
    assert!(ctx.tick(400));
    assert_eq!(codes(&ctx.store), vec!["CA"]);
    assert!(ctx.store.dropdown_open());

    // Select CA.
    let request = expect_fetch(ctx.dispatch(Action::SelectHighlighted, 450));
    assert_eq!(request.option.value(), "CA");
    assert!(ctx.store.workflow().is_loading());
    assert!(!ctx.store.dropdown_open());
    let snapshot = ctx.store.snapshot(ctx.at(450));
    assert!(snapshot.is_loading);
    assert!(matches!(snapshot.grid, GridView::Skeleton { .. }));

    let record = record_for(&request.option, 1);
    ctx.dispatch(Action::FetchSettled { token: request.token, result: Ok(record) }, 950);
    let snapshot = ctx.store.snapshot(ctx.at(950));
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.current_record.as_ref().map(|r| r.abbreviation.as_str()), Some("CA"));
    assert_eq!(ctx.messages(), vec![(FETCH_SUCCESS_MESSAGE.to_owned(), NotificationKind::Success)]);
    assert!(!snapshot.visible);

    // Fade completes.
    assert!(ctx.tick(1_450));
    assert!(ctx.store.grid().visible());

    // Collapse: one error notification, city rows hidden.
    ctx.dispatch(Action::ToggleExpanded, 1_500);
    let snapshot = ctx.store.snapshot(ctx.at(1_500));
    assert!(!snapshot.expanded);
    assert_eq!(ctx.store.notifications().len(), 2);
    assert_eq!(
        ctx.messages()[1],
        (COLLAPSE_WARNING.to_owned(), NotificationKind::Error)
    );
    let GridView::Table(table) = snapshot.grid else {
        panic!("expected table");
    };
    assert!(table.cities.is_empty());

    // Expand again: rows back, no new notification.
    ctx.dispatch(Action::ToggleExpanded, 1_600);
    let snapshot = ctx.store.snapshot(ctx.at(1_600));
    assert!(snapshot.expanded);
    assert_eq!(ctx.store.notifications().len(), 2);
    let GridView::Table(table) = snapshot.grid else {
        panic!("expected table");
    };
    assert_eq!(table.cities.len(), 5);
}

#[rstest]
fn only_the_last_query_is_applied(mut ctx: StoreCtx) {
    ctx.dispatch(Action::QueryChanged("Tex".to_owned()), 0);
    ctx.dispatch(Action::QueryChanged("New".to_owned()), 200);
    assert!(!ctx.tick(350));
    assert_eq!(codes(&ctx.store), vec!["CA", "NY", "TX"]);
    assert!(ctx.tick(500));
    assert_eq!(codes(&ctx.store), vec!["NY"]);
}

#[rstest]
fn empty_result_keeps_dropdown_closed(mut ctx: StoreCtx) {
    ctx.dispatch(Action::QueryChanged("zzz".to_owned()), 0);
    ctx.tick(300);
    let snapshot = ctx.store.snapshot(ctx.at(300));
    assert!(snapshot.filtered_options.is_empty());
    assert!(!snapshot.dropdown_open);
    assert_eq!(snapshot.highlighted_option, None);
    assert_eq!(ctx.dispatch(Action::SelectHighlighted, 310), Effect::None);
}

#[rstest]
fn stale_fetch_never_overwrites_newer_selection(mut ctx: StoreCtx) {
    let ca = StateOption::new("California", "CA");
    let tx = StateOption::new("Texas", "TX");

    let a = expect_fetch(ctx.dispatch(Action::Select(ca.clone()), 0));
    let b = expect_fetch(ctx.dispatch(Action::Select(tx.clone()), 10));

    ctx.dispatch(Action::FetchSettled { token: b.token, result: Ok(record_for(&tx, 2)) }, 400);
    ctx.dispatch(Action::FetchSettled { token: a.token, result: Ok(record_for(&ca, 3)) }, 600);

    let snapshot = ctx.store.snapshot(ctx.at(600));
    assert_eq!(snapshot.current_record.map(|r| r.abbreviation), Some("TX".to_owned()));
    assert_eq!(snapshot.selected_option.map(|o| o.value), Some("TX".to_owned()));
    assert_eq!(ctx.store.notifications().len(), 1);
}

#[rstest]
fn failed_fetch_is_log_only_by_default(mut ctx: StoreCtx) {
    let tx = StateOption::new("Texas", "TX");
    let request = expect_fetch(ctx.dispatch(Action::Select(tx), 0));
    ctx.dispatch(
        Action::FetchSettled {
            token: request.token,
            result: Err(ProviderError::Unavailable("offline".to_owned())),
        },
        500,
    );

    assert!(!ctx.store.workflow().is_loading());
    assert!(ctx.store.notifications().is_empty());
    assert_eq!(ctx.store.snapshot(ctx.at(500)).grid, GridView::Empty);
}

#[test]
fn failed_fetch_can_surface_a_notification() {
    let mut config = Config::default();
    config.surface_fetch_errors = true;
    let mut ctx = StoreCtx::with_config(config);

    let request = expect_fetch(ctx.dispatch(Action::Select(StateOption::new("Texas", "TX")), 0));
    ctx.dispatch(
        Action::FetchSettled {
            token: request.token,
            result: Err(ProviderError::Unavailable("offline".to_owned())),
        },
        500,
    );

    let messages = ctx.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].1, NotificationKind::Error);
    assert!(messages[0].0.contains("TX"));
}

#[rstest]
fn notifications_expire_without_dismissal(mut ctx: StoreCtx) {
    ctx.dispatch(Action::ToggleExpanded, 0);
    ctx.dispatch(Action::ToggleExpanded, 100);
    ctx.dispatch(Action::ToggleExpanded, 200);
    assert_eq!(ctx.store.notifications().len(), 2);

    ctx.tick(3_000);
    assert_eq!(ctx.store.notifications().len(), 1);
    ctx.tick(3_200);
    assert!(ctx.store.notifications().is_empty());
}

#[rstest]
fn dismissing_twice_is_harmless(mut ctx: StoreCtx) {
    ctx.dispatch(Action::ToggleExpanded, 0);
    let id = ctx.store.notifications().items()[0].id();
    ctx.dispatch(Action::Dismiss(id), 10);
    ctx.dispatch(Action::Dismiss(id), 20);
    ctx.dispatch(Action::DismissLatest, 30);
    assert!(ctx.store.notifications().is_empty());
    assert_eq!(ctx.store.next_deadline(), None);
}

#[rstest]
fn clear_resets_selection_and_prompts(mut ctx: StoreCtx) {
    // Nothing selected: clear is unavailable.
    ctx.dispatch(Action::Clear, 0);
    assert!(ctx.store.notifications().is_empty());

    let ca = StateOption::new("California", "CA");
    let request = expect_fetch(ctx.dispatch(Action::Select(ca.clone()), 0));
    assert_eq!(ctx.store.filter().raw_query(), "California");
    ctx.dispatch(Action::FetchSettled { token: request.token, result: Ok(record_for(&ca, 4)) }, 500);

    ctx.dispatch(Action::Clear, 1_000);
    let snapshot = ctx.store.snapshot(ctx.at(1_000));
    assert!(snapshot.selected_option.is_none());
    assert!(snapshot.current_record.is_none());
    assert_eq!(snapshot.query, "");
    assert_eq!(
        ctx.messages().last().cloned(),
        Some((CLEAR_PROMPT_MESSAGE.to_owned(), NotificationKind::Info))
    );
}

#[rstest]
fn highlight_wraps_around(mut ctx: StoreCtx) {
    ctx.dispatch(Action::OpenDropdown, 0);
    assert_eq!(ctx.store.snapshot(ctx.at(0)).highlighted_option, Some(0));
    ctx.dispatch(Action::MoveHighlight(-1), 0);
    assert_eq!(ctx.store.snapshot(ctx.at(0)).highlighted_option, Some(2));
    ctx.dispatch(Action::MoveHighlight(1), 0);
    assert_eq!(ctx.store.snapshot(ctx.at(0)).highlighted_option, Some(0));

    let request = expect_fetch(ctx.dispatch(Action::SelectHighlighted, 0));
    assert_eq!(request.option.value(), "CA");
}

#[rstest]
fn each_record_change_fades_exactly_once(mut ctx: StoreCtx) {
    let ca = StateOption::new("California", "CA");
    let first = expect_fetch(ctx.dispatch(Action::Select(ca.clone()), 0));
    ctx.dispatch(Action::FetchSettled { token: first.token, result: Ok(record_for(&ca, 1)) }, 100);
    let second = expect_fetch(ctx.dispatch(Action::Select(ca.clone()), 200));
    ctx.dispatch(Action::FetchSettled { token: second.token, result: Ok(record_for(&ca, 2)) }, 300);

    assert!(!ctx.store.grid().visible());
    ctx.tick(700);
    assert!(!ctx.store.grid().visible(), "first fade was rescheduled");
    ctx.tick(800);
    assert!(ctx.store.grid().visible());
    assert!(!ctx.store.grid().has_pending_fade());
}

#[rstest]
fn teardown_cancels_all_timers_and_ignores_later_events(mut ctx: StoreCtx) {
    let ca = StateOption::new("California", "CA");
    ctx.dispatch(Action::QueryChanged("Cal".to_owned()), 0);
    let request = expect_fetch(ctx.dispatch(Action::Select(ca.clone()), 10));
    ctx.dispatch(Action::FetchSettled { token: request.token, result: Ok(record_for(&ca, 1)) }, 20);
    assert!(ctx.store.next_deadline().is_some());

    ctx.store.teardown();
    assert!(ctx.store.is_torn_down());
    assert_eq!(ctx.store.next_deadline(), None);
    assert!(!ctx.tick(10_000));
    assert!(!ctx.store.grid().visible());
    assert_eq!(ctx.dispatch(Action::Select(ca), 10_001), Effect::None);
}

#[rstest]
fn mount_fades_in_without_a_record(mut ctx: StoreCtx) {
    assert!(!ctx.store.grid().visible());
    let now = ctx.at(0);
    ctx.store.mount(now);
    assert_eq!(ctx.store.next_deadline(), Some(ctx.at(500)));

    assert!(!ctx.tick(499));
    assert!(ctx.tick(500));
    assert!(ctx.store.grid().visible());
    assert!(ctx.store.workflow().current_record().is_none());
    assert!(ctx.store.notifications().is_empty());
}
