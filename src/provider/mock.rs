// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smol_str::SmolStr;
use tokio::sync::Mutex;

use super::{ProviderError, ProviderFuture, RecordProvider};
use crate::model::{CityList, CityRecord, StateOption, StateRecord};

const CITY_COUNT: usize = 5;

const FIRST_NAMES: &[&str] = &[
    "Avery", "Blake", "Carmen", "Dana", "Elliot", "Frances", "Gabriel", "Harper", "Imani",
    "Jordan", "Kendall", "Luis", "Morgan", "Nadia", "Owen", "Priya", "Quinn", "Rosa", "Samuel",
    "Tessa", "Umar", "Valerie", "Wesley", "Yara",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Bennett", "Chen", "Dawson", "Ellis", "Fischer", "Garcia", "Hughes", "Ibarra",
    "Jensen", "Khan", "Lopez", "Mitchell", "Nguyen", "Okafor", "Patel", "Reyes", "Sullivan",
    "Thompson", "Underwood", "Vasquez", "Walker", "Young", "Zimmerman",
];

const CITY_PREFIXES: &[&str] = &[
    "Spring", "River", "Oak", "Maple", "Cedar", "Fair", "Green", "Lake", "Clear", "Red", "Stone",
    "Bright", "Elm", "Silver", "North", "West",
];

const CITY_SUFFIXES: &[&str] = &[
    "field", "ton", "ville", "wood", "port", " Falls", " Springs", "dale", "burg", " Heights",
    "view", " City",
];

/// Seeded stand-in for a real data source.
///
/// Values are random within plausible bounds; only the name and code come from the option.
#[derive(Debug, Clone)]
pub struct MockProvider {
    rng: Arc<Mutex<StdRng>>,
    latency: Duration,
}

impl MockProvider {
    pub fn new(seed: Option<u64>, latency: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Arc::new(Mutex::new(rng)),
            latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl RecordProvider for MockProvider {
    fn fetch(&self, option: StateOption) -> ProviderFuture {
        let rng = Arc::clone(&self.rng);
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let mut rng = rng.lock().await;
            generate_record(&mut *rng, &option)
        })
    }
}

pub(crate) fn generate_record(
    rng: &mut impl Rng,
    option: &StateOption,
) -> Result<StateRecord, ProviderError> {
    let cities: CityList = (0..CITY_COUNT)
        .map(|_| CityRecord {
            name: city_name(rng),
            population: rng.random_range(50_000..=8_000_000),
            leader_name: person_name(rng),
            founded_year: rng.random_range(1600..=1900),
        })
        .collect();

    Ok(StateRecord {
        name: option.label().into(),
        abbreviation: option.value().into(),
        capital: city_name(rng),
        population: rng.random_range(500_000..=40_000_000),
        total_area: rng.random_range(1_000..=700_000),
        admission_date: admission_date(rng)?,
        governor: person_name(rng),
        gdp: rng.random_range(30_000_000_000..=3_000_000_000_000),
        median_income: rng.random_range(40_000..=85_000),
        cities,
    })
}

fn pick<'a>(rng: &mut impl Rng, pool: &[&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

fn person_name(rng: &mut impl Rng) -> SmolStr {
    SmolStr::from(format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)))
}

fn city_name(rng: &mut impl Rng) -> SmolStr {
    SmolStr::from(format!("{}{}", pick(rng, CITY_PREFIXES), pick(rng, CITY_SUFFIXES)))
}

/// Between the first and the last admission to the Union.
fn admission_date(rng: &mut impl Rng) -> Result<NaiveDate, ProviderError> {
    let bounds = NaiveDate::from_ymd_opt(1787, 12, 7).zip(NaiveDate::from_ymd_opt(1959, 8, 21));
    let Some((first, last)) = bounds else {
        return Err(ProviderError::Unavailable("admission date bounds".to_owned()));
    };
    let span = (last - first).num_days().unsigned_abs();
    first
        .checked_add_days(Days::new(rng.random_range(0..=span)))
        .ok_or_else(|| ProviderError::Unavailable("admission date out of range".to_owned()))
}
