// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// One selectable entry of the option catalog.
///
/// Identity is the short code (`value`); two options with the same code are the same option
/// even if their labels differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateOption {
    label: SmolStr,
    value: SmolStr,
}

impl StateOption {
    pub fn new(label: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Dropdown entry text, e.g. `California (CA)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.label, self.value)
    }
}

impl PartialEq for StateOption {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for StateOption {}

impl std::hash::Hash for StateOption {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for StateOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
