// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Options come from a fixed catalog; records are produced by a provider per selection.

pub mod catalog;
pub mod ids;
pub mod option;
pub mod record;

pub use catalog::{catalog_from_pairs, us_states, Catalog};
pub use ids::{Id, IdSequence, NotificationId, SelectionToken, TimerId};
pub use option::StateOption;
pub use record::{CityList, CityRecord, StateRecord, MAX_FOUNDED_YEAR, MIN_FOUNDED_YEAR};
