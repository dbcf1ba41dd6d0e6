// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Async driver around the [`Store`].
//!
//! Fetch effects run as tasks in a [`JoinSet`]; their results come back tagged with the
//! selection token they were started for. Timer deadlines are awaited with `sleep_until` so a
//! single-threaded runtime wakes exactly when the store has work.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::{Id as TaskId, JoinSet};

use crate::model::{SelectionToken, StateOption, StateRecord};
use crate::provider::{validate_record, ProviderError, RecordProvider};
use crate::store::{Action, Effect, Store};

/// Current instant on the runtime clock (follows paused time in tests).
pub fn runtime_now() -> Instant {
    tokio::time::Instant::now().into_std()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A fetch finished and was fed back into the store.
    FetchSettled { token: SelectionToken },
    /// One or more timers fired.
    TimersFired { changed: bool },
}

struct FetchOutcome {
    token: SelectionToken,
    result: Result<StateRecord, ProviderError>,
}

pub struct Session {
    store: Store,
    provider: Arc<dyn RecordProvider>,
    fetches: JoinSet<FetchOutcome>,
    tokens: HashMap<TaskId, SelectionToken>,
}

impl Session {
    /// Mounts the store at the runtime clock's current instant.
    pub fn new(mut store: Store, provider: Arc<dyn RecordProvider>) -> Self {
        store.mount(runtime_now());
        Self {
            store,
            provider,
            fetches: JoinSet::new(),
            tokens: HashMap::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn in_flight(&self) -> usize {
        self.fetches.len()
    }

    /// `true` while [`Session::step`] has something to wait for.
    pub fn has_pending_work(&self) -> bool {
        !self.fetches.is_empty() || self.store.next_deadline().is_some()
    }

    /// Applies an action at the runtime clock's current instant and performs its effect.
    pub fn dispatch(&mut self, action: Action) {
        let effect = self.store.dispatch(action, runtime_now());
        self.perform(effect);
    }

    fn perform(&mut self, effect: Effect) {
        let Effect::Fetch(request) = effect else {
            return;
        };
        let token = request.token;
        let option: StateOption = request.option;
        let fetch = self.provider.fetch(option.clone());
        let handle = self.fetches.spawn(async move {
            let result = fetch.await.and_then(|record| validate_record(&option, record));
            FetchOutcome { token, result }
        });
        self.tokens.insert(handle.id(), token);
    }

    /// Waits for the next fetch completion or timer deadline and applies it.
    ///
    /// Returns `None` when nothing is pending.
    pub async fn step(&mut self) -> Option<SessionEvent> {
        if !self.has_pending_work() {
            return None;
        }
        let deadline = self.store.next_deadline();

        let timer = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            Some(joined) = self.fetches.join_next_with_id(), if !self.fetches.is_empty() => {
                Some(self.settle(joined))
            }
            () = timer => {
                let changed = self.store.tick(runtime_now());
                Some(SessionEvent::TimersFired { changed })
            }
        }
    }

    fn settle(
        &mut self,
        joined: Result<(TaskId, FetchOutcome), tokio::task::JoinError>,
    ) -> SessionEvent {
        let (token, result) = match joined {
            Ok((task_id, outcome)) => {
                self.tokens.remove(&task_id);
                (outcome.token, outcome.result)
            }
            Err(err) => {
                let token = self.tokens.remove(&err.id());
                tracing::error!(error = %err, "fetch task did not complete");
                let Some(token) = token else {
                    return SessionEvent::TimersFired { changed: false };
                };
                (token, Err(ProviderError::Unavailable(format!("fetch task failed: {err}"))))
            }
        };
        let effect = self.store.dispatch(Action::FetchSettled { token, result }, runtime_now());
        self.perform(effect);
        SessionEvent::FetchSettled { token }
    }

    /// Steps until no fetch is in flight.
    pub async fn settle_fetches(&mut self) {
        while self.in_flight() > 0 {
            if self.step().await.is_none() {
                break;
            }
        }
    }

    /// Steps until the typed query has settled.
    pub async fn settle_query(&mut self) {
        while self.store.filter().has_pending_settle() {
            if self.step().await.is_none() {
                break;
            }
        }
    }

    /// Cancels every timer and aborts in-flight fetches.
    pub fn teardown(&mut self) {
        self.store.teardown();
        // Dropping the set aborts every task still running.
        drop(std::mem::take(&mut self.fetches));
        self.tokens.clear();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests;
