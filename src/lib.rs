// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stategrid: US-state lookup with a debounced search, timed notifications, a token-guarded
//! fetch workflow and an animated summary grid.
//!
//! The core ([`store::Store`]) is synchronous and clock-driven; [`session::Session`] runs it
//! on a tokio runtime and [`tui`] draws its [`snapshot::RenderSnapshot`].

pub mod config;
pub mod filter;
pub mod grid;
pub mod model;
pub mod notify;
pub mod provider;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod timer;
pub mod tui;
pub mod workflow;
