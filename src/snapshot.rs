// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only render snapshot handed to a presentation layer.
//!
//! Everything here is plain data (strings and numbers) so any front-end can draw it and the
//! shape can be published as a JSON schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{CityRecord, StateOption, StateRecord};
use crate::notify::NotificationKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RenderSnapshot {
    pub selected_option: Option<OptionView>,
    pub current_record: Option<RecordView>,
    pub is_loading: bool,
    /// Raw query as typed.
    pub query: String,
    pub filtered_options: Vec<OptionView>,
    /// Open and non-empty; an empty result never shows as an open panel.
    pub dropdown_open: bool,
    pub highlighted_option: Option<usize>,
    pub expanded: bool,
    pub visible: bool,
    pub notifications: Vec<NotificationView>,
    pub grid: GridView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OptionView {
    pub label: String,
    pub value: String,
}

impl From<&StateOption> for OptionView {
    fn from(option: &StateOption) -> Self {
        Self {
            label: option.label().to_owned(),
            value: option.value().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecordView {
    pub name: String,
    pub abbreviation: String,
    pub capital: String,
    pub population: u64,
    pub total_area: u64,
    /// ISO-8601 calendar date.
    pub admission_date: String,
    pub governor: String,
    pub gdp: u64,
    pub median_income: u64,
    pub cities: Vec<CityView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CityView {
    pub name: String,
    pub population: u64,
    pub leader_name: String,
    pub founded_year: i32,
}

impl From<&CityRecord> for CityView {
    fn from(city: &CityRecord) -> Self {
        Self {
            name: city.name.to_string(),
            population: city.population,
            leader_name: city.leader_name.to_string(),
            founded_year: city.founded_year,
        }
    }
}

impl From<&StateRecord> for RecordView {
    fn from(record: &StateRecord) -> Self {
        Self {
            name: record.name.to_string(),
            abbreviation: record.abbreviation.to_string(),
            capital: record.capital.to_string(),
            population: record.population,
            total_area: record.total_area,
            admission_date: record.admission_date.format("%Y-%m-%d").to_string(),
            governor: record.governor.to_string(),
            gdp: record.gdp,
            median_income: record.median_income,
            cities: record.cities.iter().map(CityView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NotificationView {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridView {
    /// No record yet (or cleared).
    Empty,
    /// Placeholder drawn while a fetch is in flight.
    Skeleton { columns: usize, rows: usize },
    Table(TableView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableView {
    pub header: Vec<String>,
    pub summary: Vec<String>,
    pub expanded: bool,
    pub visible: bool,
    /// Empty while collapsed.
    pub cities: Vec<CityRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CityRowView {
    pub cells: Vec<String>,
    pub stagger_delay_ms: u64,
    /// Whether the row's cascade delay has elapsed since the grid became visible.
    pub revealed: bool,
}

/// JSON schema of [`RenderSnapshot`], pretty-printed.
pub fn snapshot_schema_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&schemars::schema_for!(RenderSnapshot))
}
