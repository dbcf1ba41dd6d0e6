// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

use super::theme::TuiTheme;
use super::Focus;
use crate::grid::format::HEADER;
use crate::notify::NotificationKind;
use crate::snapshot::{GridView, NotificationView, OptionView, RenderSnapshot, TableView};

const SEARCH_HEIGHT: u16 = 3;
const DROPDOWN_MAX_ROWS: u16 = 8;
const NOTIFICATION_WIDTH: u16 = 44;
const SKELETON_CELL: &str = "░░░░░░░░";
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const SEARCH_PLACEHOLDER: &str = "Type to search a state...";

pub(super) fn draw(frame: &mut Frame<'_>, snapshot: &RenderSnapshot, focus: Focus, theme: &TuiTheme) {
    let area = frame.size();
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_search(frame, rows[0], snapshot, focus, theme);
    draw_grid(frame, rows[1], &snapshot.grid, focus, theme);
    frame.render_widget(Paragraph::new(footer_line(focus)), rows[2]);

    if snapshot.dropdown_open {
        draw_dropdown(frame, rows[0], rows[1], snapshot, theme);
    }
    draw_notifications(frame, area, &snapshot.notifications, theme);
}

fn draw_search(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &RenderSnapshot,
    focus: Focus,
    theme: &TuiTheme,
) {
    let focused = focus == Focus::Search;
    let mut title = String::from(" Select US State ");
    if let Some(selected) = &snapshot.selected_option {
        title.push_str(&format!("[{}] ", selected.value));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.panel_border_style(focused));

    let mut spans = Vec::new();
    if snapshot.query.is_empty() {
        spans.push(Span::styled(SEARCH_PLACEHOLDER, theme.hidden_style()));
    } else {
        spans.push(Span::raw(snapshot.query.clone()));
    }
    if snapshot.is_loading {
        spans.push(Span::styled("  loading...", theme.hidden_style()));
    }

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let typed = u16::try_from(snapshot.query.chars().count()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(typed.min(inner.width.saturating_sub(1)));
        frame.set_cursor(x, inner.y);
    }
}

pub(super) fn dropdown_label(option: &OptionView) -> String {
    format!("{} ({})", option.label, option.value)
}

fn draw_dropdown(
    frame: &mut Frame<'_>,
    search: Rect,
    below: Rect,
    snapshot: &RenderSnapshot,
    theme: &TuiTheme,
) {
    let visible_rows = u16::try_from(snapshot.filtered_options.len())
        .unwrap_or(u16::MAX)
        .min(DROPDOWN_MAX_ROWS);
    let height = visible_rows.saturating_add(2).min(below.height);
    if height < 3 {
        return;
    }
    let area = Rect {
        x: search.x,
        y: below.y,
        width: search.width,
        height,
    };

    let items: Vec<ListItem<'_>> = snapshot
        .filtered_options
        .iter()
        .map(|option| ListItem::new(dropdown_label(option)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(theme.panel_border_style(true)))
        .style(theme.base_style())
        .highlight_style(theme.selection_style());

    let mut state = ListState::default();
    state.select(snapshot.highlighted_option);
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_grid(frame: &mut Frame<'_>, area: Rect, grid: &GridView, focus: Focus, theme: &TuiTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" State Data ")
        .border_style(theme.panel_border_style(focus == Focus::Grid));

    match grid {
        GridView::Empty => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Pick a state to load its data.",
                theme.hidden_style(),
            )))
            .block(block);
            frame.render_widget(hint, area);
        }
        GridView::Skeleton { columns, rows } => {
            // Summary placeholder plus the city placeholders.
            let body = (0..=*rows).map(|_| {
                Row::new(vec![SKELETON_CELL; *columns]).style(theme.hidden_style())
            });
            let table = Table::new(body, column_widths(*columns))
                .header(Row::new(HEADER.to_vec()).style(theme.header_style()))
                .block(block);
            frame.render_widget(table, area);
        }
        GridView::Table(view) => {
            let table = Table::new(table_rows(view, focus, theme), column_widths(view.header.len()))
                .header(Row::new(view.header.clone()).style(theme.header_style()))
                .block(block);
            frame.render_widget(table, area);
        }
    }
}

fn column_widths(columns: usize) -> Vec<Constraint> {
    let columns = u32::try_from(columns.max(1)).unwrap_or(1);
    (0..columns).map(|_| Constraint::Ratio(1, columns)).collect()
}

pub(super) fn summary_cells(view: &TableView) -> Vec<String> {
    let marker = if view.expanded { "▾ " } else { "▸ " };
    let mut cells = view.summary.clone();
    if let Some(first) = cells.first_mut() {
        first.insert_str(0, marker);
    }
    cells
}

fn table_rows<'a>(view: &'a TableView, focus: Focus, theme: &TuiTheme) -> Vec<Row<'a>> {
    let mut summary_style = if view.visible {
        theme.summary_style()
    } else {
        theme.hidden_style()
    };
    if focus == Focus::Grid {
        summary_style = summary_style.add_modifier(Modifier::REVERSED);
    }

    let mut rows = vec![Row::new(summary_cells(view)).style(summary_style)];
    rows.extend(view.cities.iter().map(|city| {
        let style = if view.visible && city.revealed {
            theme.base_style()
        } else {
            theme.hidden_style()
        };
        let mut cells = city.cells.clone();
        if let Some(first) = cells.first_mut() {
            first.insert_str(0, "  ");
        }
        Row::new(cells).style(style)
    }));
    rows
}

fn notification_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✔",
        NotificationKind::Error => "✖",
        NotificationKind::Info => "ℹ",
    }
}

pub(super) fn notification_line(item: &NotificationView, theme: &TuiTheme) -> Line<'static> {
    let seconds = item.remaining_ms.div_ceil(1000);
    Line::from(Span::styled(
        format!(" {} {}  {seconds}s ", notification_icon(item.kind), item.message),
        theme.notification_style(item.kind),
    ))
}

fn draw_notifications(
    frame: &mut Frame<'_>,
    area: Rect,
    notifications: &[NotificationView],
    theme: &TuiTheme,
) {
    if notifications.is_empty() || area.height < 2 {
        return;
    }
    let width = NOTIFICATION_WIDTH.min(area.width);
    let height = u16::try_from(notifications.len())
        .unwrap_or(u16::MAX)
        .min(area.height.saturating_sub(1));
    let stack = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    };

    // Newest on top.
    let lines: Vec<Line<'static>> = notifications
        .iter()
        .rev()
        .take(usize::from(height))
        .map(|item| notification_line(item, theme))
        .collect();
    frame.render_widget(Clear, stack);
    frame.render_widget(Paragraph::new(lines), stack);
}

pub(super) fn footer_line(focus: Focus) -> Line<'static> {
    let entries: &[(&str, &str)] = match focus {
        Focus::Search => &[
            ("PICK", "↑↓"),
            ("SELECT", "enter"),
            ("CLOSE", "esc"),
            ("GRID", "tab"),
            ("CLEAR", "^l"),
            ("QUIT", "^c"),
        ],
        Focus::Grid => &[
            ("EXPAND", "enter"),
            ("CLEAR", "x"),
            ("DISMISS", "d"),
            ("SEARCH", "/"),
            ("QUIT", "q"),
        ],
    };

    let mut spans = Vec::with_capacity(entries.len() * 3);
    for (index, (label, key)) in entries.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*label, Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}
