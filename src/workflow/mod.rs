// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection workflow: `Idle -> Loading -> Settled`.
//!
//! The workflow is the only owner of the current record and the loading flag. Fetches are not
//! cancelled when a newer selection arrives; instead every fetch carries the token minted for
//! its selection and only the current token's resolution is applied.

use std::sync::Arc;

use crate::model::ids::SelectionTokenTag;
use crate::model::{IdSequence, SelectionToken, StateOption, StateRecord};
use crate::provider::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading { token: SelectionToken },
    Settled,
}

/// Work the driver must perform for a committed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: SelectionToken,
    pub option: StateOption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The record became current.
    Applied(Arc<StateRecord>),
    /// The fetch failed; the previous record is retained.
    Failed(ProviderError),
    /// The token belongs to a superseded selection.
    Stale,
}

#[derive(Debug)]
pub struct SelectionWorkflow {
    tokens: IdSequence<SelectionTokenTag>,
    phase: Phase,
    selected: Option<StateOption>,
    current_record: Option<Arc<StateRecord>>,
    record_rev: u64,
}

impl Default for SelectionWorkflow {
    fn default() -> Self {
        Self {
            tokens: IdSequence::default(),
            phase: Phase::Idle,
            selected: None,
            current_record: None,
            record_rev: 0,
        }
    }
}

impl SelectionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn selected(&self) -> Option<&StateOption> {
        self.selected.as_ref()
    }

    pub fn current_record(&self) -> Option<&Arc<StateRecord>> {
        self.current_record.as_ref()
    }

    /// Bumped whenever the current record is replaced or cleared.
    pub fn record_rev(&self) -> u64 {
        self.record_rev
    }

    pub fn current_token(&self) -> Option<SelectionToken> {
        match self.phase {
            Phase::Loading { token } => Some(token),
            Phase::Idle | Phase::Settled => None,
        }
    }

    /// Commits a selection. The previous record stays visible until replaced.
    pub fn select(&mut self, option: StateOption) -> FetchRequest {
        let token = self.tokens.mint();
        if let Phase::Loading { token: superseded } = self.phase {
            tracing::debug!(%superseded, %token, "selection superseded");
        }
        tracing::info!(%token, code = option.value(), "selection committed");
        self.phase = Phase::Loading { token };
        self.selected = Some(option.clone());
        FetchRequest { token, option }
    }

    pub fn resolve(
        &mut self,
        token: SelectionToken,
        result: Result<StateRecord, ProviderError>,
    ) -> Resolution {
        if self.current_token() != Some(token) {
            tracing::debug!(%token, "discarding stale fetch result");
            return Resolution::Stale;
        }

        self.phase = Phase::Settled;
        match result {
            Ok(record) => {
                let record = Arc::new(record);
                self.current_record = Some(Arc::clone(&record));
                self.record_rev = self.record_rev.wrapping_add(1);
                tracing::info!(%token, code = %record.abbreviation, "record applied");
                Resolution::Applied(record)
            }
            Err(err) => {
                tracing::warn!(%token, error = %err, "fetch failed; keeping previous record");
                Resolution::Failed(err)
            }
        }
    }

    /// Forgets the selection and record. An in-flight fetch becomes stale.
    pub fn clear(&mut self) -> bool {
        let had_record = self.current_record.take().is_some();
        self.selected = None;
        self.phase = Phase::Idle;
        if had_record {
            self.record_rev = self.record_rev.wrapping_add(1);
        }
        had_record
    }
}
