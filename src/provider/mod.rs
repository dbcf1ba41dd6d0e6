// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Record providers.
//!
//! The core treats a provider as a black box that eventually settles with a record or an error.
//! Closures returning a future implement [`RecordProvider`] directly.

use std::future::Future;
use std::pin::Pin;

use crate::model::{StateOption, StateRecord};

pub(crate) mod mock;

pub use mock::MockProvider;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid record for {code}: {reason}")]
    InvalidRecord { code: String, reason: String },
}

pub type ProviderFuture =
    Pin<Box<dyn Future<Output = Result<StateRecord, ProviderError>> + Send + 'static>>;

pub trait RecordProvider: Send + Sync + 'static {
    fn fetch(&self, option: StateOption) -> ProviderFuture;
}

impl<F, Fut> RecordProvider for F
where
    F: Fn(StateOption) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StateRecord, ProviderError>> + Send + 'static,
{
    fn fetch(&self, option: StateOption) -> ProviderFuture {
        Box::pin(self(option))
    }
}

/// Rejects records that do not belong to the requested option or carry implausible cities.
pub fn validate_record(
    option: &StateOption,
    record: StateRecord,
) -> Result<StateRecord, ProviderError> {
    if record.abbreviation != option.value() {
        return Err(ProviderError::InvalidRecord {
            code: option.value().to_owned(),
            reason: format!("abbreviation mismatch ({})", record.abbreviation),
        });
    }
    if let Some(city) = record.implausible_city() {
        return Err(ProviderError::InvalidRecord {
            code: option.value().to_owned(),
            reason: format!("{} founded in {}", city.name, city.founded_year),
        });
    }
    Ok(record)
}
