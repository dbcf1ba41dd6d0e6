// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use smol_str::SmolStr;

/// Earliest plausible founding year accepted for a city.
pub const MIN_FOUNDED_YEAR: i32 = 1500;
/// Latest plausible founding year accepted for a city.
pub const MAX_FOUNDED_YEAR: i32 = 2100;

/// Largest cities of a state, in display order. Providers usually return five.
pub type CityList = SmallVec<[CityRecord; 5]>;

/// Summary data for one state, produced by a record provider.
///
/// Records are immutable once produced; a new selection replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub name: SmolStr,
    pub abbreviation: SmolStr,
    pub capital: SmolStr,
    pub population: u64,
    /// Square miles.
    pub total_area: u64,
    pub admission_date: NaiveDate,
    pub governor: SmolStr,
    /// Whole dollars.
    pub gdp: u64,
    pub median_income: u64,
    pub cities: CityList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: SmolStr,
    pub population: u64,
    pub leader_name: SmolStr,
    pub founded_year: i32,
}

impl CityRecord {
    pub fn has_plausible_founding(&self) -> bool {
        (MIN_FOUNDED_YEAR..=MAX_FOUNDED_YEAR).contains(&self.founded_year)
    }
}

impl StateRecord {
    /// First city whose founding year falls outside the plausible historical range.
    pub fn implausible_city(&self) -> Option<&CityRecord> {
        self.cities.iter().find(|city| !city.has_plausible_founding())
    }
}
