// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{CityRecord, StateRecord};

pub(crate) const HEADER: [&str; 6] = [
    "Name",
    "Population",
    "Capital/Mayor",
    "Governor/Founded",
    "GDP",
    "Area/Income",
];

pub(crate) const COLUMN_COUNT: usize = HEADER.len();

/// `39538223` -> `39,538,223`.
pub fn thousands(value: u64) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(value);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Billions of dollars with one decimal, e.g. `$3370.0B`.
pub fn gdp_billions(gdp: u64) -> String {
    format!("${:.1}B", gdp as f64 / 1e9)
}

pub fn square_miles(area: u64) -> String {
    format!("{} sq mi", thousands(area))
}

pub(crate) fn summary_cells(record: &StateRecord) -> Vec<String> {
    vec![
        format!("{} ({})", record.name, record.abbreviation),
        thousands(record.population),
        record.capital.to_string(),
        record.governor.to_string(),
        gdp_billions(record.gdp),
        square_miles(record.total_area),
    ]
}

pub(crate) fn city_cells(city: &CityRecord) -> Vec<String> {
    vec![
        city.name.to_string(),
        thousands(city.population),
        city.leader_name.to_string(),
        city.founded_year.to_string(),
        "-".to_owned(),
        "-".to_owned(),
    ]
}
