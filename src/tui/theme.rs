// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};

use crate::notify::NotificationKind;

const SUCCESS_COLOR: Color = Color::Green;
const ERROR_COLOR: Color = Color::Red;
const INFO_COLOR: Color = Color::Blue;
const FOCUS_COLOR: Color = Color::Yellow;
const HIDDEN_COLOR: Color = Color::DarkGray;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TuiTheme;

impl TuiTheme {
    pub(crate) fn base_style(&self) -> Style {
        Style::default()
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(FOCUS_COLOR)
        } else {
            self.base_style()
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn header_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn summary_style(&self) -> Style {
        self.base_style().fg(INFO_COLOR).add_modifier(Modifier::BOLD)
    }

    /// Rows that have not faded in yet.
    pub(crate) fn hidden_style(&self) -> Style {
        self.base_style().fg(HIDDEN_COLOR).add_modifier(Modifier::DIM)
    }

    pub(crate) fn notification_style(&self, kind: NotificationKind) -> Style {
        let bg = match kind {
            NotificationKind::Success => SUCCESS_COLOR,
            NotificationKind::Error => ERROR_COLOR,
            NotificationKind::Info => INFO_COLOR,
        };
        Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD)
    }
}
