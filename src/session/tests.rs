// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Session, SessionEvent};
use crate::config::Config;
use crate::model::{catalog_from_pairs, StateOption, StateRecord};
use crate::provider::mock::generate_record;
use crate::provider::{MockProvider, ProviderError, RecordProvider};
use crate::store::{Action, Store};

fn store() -> Store {
    let catalog = catalog_from_pairs([("California", "CA"), ("New York", "NY"), ("Texas", "TX")]);
    Store::new(catalog, &Config::default())
}

/// Resolves `CA` slowly and everything else quickly.
fn skewed_provider() -> Arc<dyn RecordProvider> {
    Arc::new(|option: StateOption| async move {
        let delay = if option.value() == "CA" { 900 } else { 100 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        generate_record(&mut StdRng::seed_from_u64(9), &option)
    })
}

#[tokio::test(start_paused = true)]
async fn mock_provider_round_trip() {
    let provider = Arc::new(MockProvider::new(Some(42), Duration::from_millis(500)));
    let mut session = Session::new(store(), provider);

    session.dispatch(Action::QueryChanged("tex".to_owned()));
    session.settle_query().await;
    assert_eq!(session.store().filter().filtered().len(), 1);

    session.dispatch(Action::SelectHighlighted);
    assert!(session.store().workflow().is_loading());
    assert_eq!(session.in_flight(), 1);

    session.settle_fetches().await;
    let workflow = session.store().workflow();
    assert!(!workflow.is_loading());
    assert_eq!(workflow.current_record().map(|r| r.abbreviation.as_str()), Some("TX"));
    assert_eq!(session.store().notifications().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_superseded_fetch_is_discarded() {
    let mut session = Session::new(store(), skewed_provider());

    session.dispatch(Action::Select(StateOption::new("California", "CA")));
    session.dispatch(Action::Select(StateOption::new("Texas", "TX")));
    assert_eq!(session.in_flight(), 2);

    session.settle_fetches().await;
    let workflow = session.store().workflow();
    assert_eq!(workflow.current_record().map(|r| r.abbreviation.as_str()), Some("TX"));
    assert_eq!(session.store().notifications().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn provider_failure_clears_loading() {
    let provider: Arc<dyn RecordProvider> = Arc::new(|_option: StateOption| async move {
        Err::<StateRecord, _>(ProviderError::Unavailable("offline".to_owned()))
    });
    let mut session = Session::new(store(), provider);

    session.dispatch(Action::Select(StateOption::new("Texas", "TX")));
    let event = session.step().await;
    assert!(matches!(event, Some(SessionEvent::FetchSettled { .. })));
    assert!(!session.store().workflow().is_loading());
    assert!(session.store().notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn mismatched_record_is_rejected() {
    let provider: Arc<dyn RecordProvider> = Arc::new(|_option: StateOption| async move {
        generate_record(&mut StdRng::seed_from_u64(1), &StateOption::new("Ohio", "OH"))
    });
    let mut session = Session::new(store(), provider);

    session.dispatch(Action::Select(StateOption::new("Texas", "TX")));
    session.settle_fetches().await;
    assert!(session.store().workflow().current_record().is_none());
    assert!(!session.store().workflow().is_loading());
}

#[tokio::test(start_paused = true)]
async fn notifications_drain_on_their_own() {
    let mut session = Session::new(store(), skewed_provider());
    session.dispatch(Action::Select(StateOption::new("Texas", "TX")));
    session.settle_fetches().await;
    assert_eq!(session.store().notifications().len(), 1);

    while session.step().await.is_some() {}

    assert!(session.store().notifications().is_empty());
    assert!(session.store().grid().visible());
    assert_eq!(session.store().next_deadline(), None);
}

#[tokio::test(start_paused = true)]
async fn teardown_aborts_inflight_fetches() {
    let mut session = Session::new(store(), skewed_provider());
    session.dispatch(Action::Select(StateOption::new("California", "CA")));
    session.teardown();

    assert_eq!(session.step().await, None);
    assert!(session.store().is_torn_down());
}

#[tokio::test(start_paused = true)]
async fn grid_fades_in_after_start() {
    let mut session = Session::new(store(), skewed_provider());
    assert!(session.has_pending_work());
    assert!(!session.store().grid().visible());

    let event = session.step().await;
    assert_eq!(event, Some(SessionEvent::TimersFired { changed: true }));
    assert!(session.store().grid().visible());
    assert_eq!(session.step().await, None);
}
