use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::store::KeyValueStore;
use crate::tui::app::{App, Focus, RowHit};
use crate::util::unicode::{display_width, skip_columns, truncate_to_width};
use crate::view::RowView;

const EMPTY_TEXT: &str = "Nothing to show";
const EDIT_LABEL: &str = "edit";
const DELETE_LABEL: &str = "del";
/// Narrower than this and rows drop their edit/del buttons
const MIN_WIDTH_FOR_ACTIONS: u16 = 30;

/// Render the visible rows, or the empty-state line
pub fn render_list<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    app.hits.rows.clear();
    let bg = app.theme.background;

    if app.view().show_empty {
        let empty = Paragraph::new(format!(" {}", EMPTY_TEXT))
            .style(Style::default().fg(app.theme.muted).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    if height == 0 {
        return;
    }

    // Keep the selected row on screen
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }
    let total = app.view().rows.len();
    app.scroll = app.scroll.min(total.saturating_sub(height));

    let rows: Vec<RowView> = app
        .view()
        .rows
        .iter()
        .skip(app.scroll)
        .take(height)
        .cloned()
        .collect();

    for (offset, row) in rows.iter().enumerate() {
        let index = app.scroll + offset;
        let line_area = Rect::new(area.x, area.y + offset as u16, area.width, 1);
        render_row(frame, app, row, index, line_area);
    }
}

fn render_row<S: KeyValueStore>(
    frame: &mut Frame,
    app: &mut App<S>,
    row: &RowView,
    index: usize,
    area: Rect,
) {
    let is_selected = index == app.cursor && app.focus == Focus::List;
    let editing = app.editor.editing_id() == Some(row.id.as_str());
    let bg = if is_selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();

    // Selection bar + checkbox
    let marker = if is_selected { "\u{258C}" } else { " " };
    spans.push(Span::styled(
        marker,
        Style::default().fg(app.theme.accent).bg(bg),
    ));
    let check = if row.completed { "[x]" } else { "[ ]" };
    spans.push(Span::styled(
        check,
        Style::default().fg(app.theme.check_color(row.completed)).bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    let prefix_w = 5;

    let show_actions = area.width >= MIN_WIDTH_FOR_ACTIONS;
    // "edit  del " on the right
    let actions_w = if show_actions {
        display_width(EDIT_LABEL) + 2 + display_width(DELETE_LABEL) + 1
    } else {
        0
    };
    let label_w = width.saturating_sub(prefix_w + actions_w + 1);

    let mut cursor_pos = None;
    if editing {
        if let Some(buffer) = app.editor.buffer() {
            let cursor_col = buffer.cursor_col();
            let skip = (cursor_col + 1).saturating_sub(label_w);
            let shown = truncate_to_width(skip_columns(buffer.text(), skip), label_w);
            let shown_w = display_width(&shown);
            spans.push(Span::styled(
                shown,
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.background)
                    .add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled(
                " ".repeat(label_w.saturating_sub(shown_w)),
                Style::default()
                    .bg(app.theme.background)
                    .add_modifier(Modifier::UNDERLINED),
            ));
            if label_w > 0 {
                let col = (cursor_col - skip).min(label_w - 1);
                cursor_pos = Some(Position::new(area.x + (prefix_w + col) as u16, area.y));
            }
        }
    } else {
        let text = truncate_to_width(&row.text, label_w);
        let text_w = display_width(&text);
        let style = if row.completed {
            Style::default()
                .fg(app.theme.muted)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if is_selected {
            Style::default().fg(app.theme.text_bright).bg(bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::styled(
            " ".repeat(label_w.saturating_sub(text_w)),
            Style::default().bg(bg),
        ));
    }

    let label_rect = Rect::new(area.x + prefix_w as u16, area.y, label_w as u16, 1);
    let mut edit_rect = Rect::default();
    let mut delete_rect = Rect::default();

    if show_actions {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        let action_style = Style::default().fg(app.theme.muted).bg(bg);
        let edit_x = area.x + (prefix_w + label_w + 1) as u16;
        spans.push(Span::styled(EDIT_LABEL, action_style));
        spans.push(Span::styled("  ", Style::default().bg(bg)));
        spans.push(Span::styled(
            DELETE_LABEL,
            Style::default().fg(app.theme.danger).bg(bg),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        edit_rect = Rect::new(edit_x, area.y, display_width(EDIT_LABEL) as u16, 1);
        delete_rect = Rect::new(
            edit_x + display_width(EDIT_LABEL) as u16 + 2,
            area.y,
            display_width(DELETE_LABEL) as u16,
            1,
        );
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)), area);

    if let Some(pos) = cursor_pos {
        if !app.show_help {
            frame.set_cursor_position(pos);
        }
    }

    app.hits.rows.push(RowHit {
        id: row.id.clone(),
        checkbox: Rect::new(area.x + 1, area.y, 3, 1),
        label: label_rect,
        edit: edit_rect,
        delete: delete_rect,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Filter;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn empty_state() {
        let mut app = app_with_items(&[]);
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_list(frame, &mut app, area);
        });
        assert_eq!(output, format!(" {}", EMPTY_TEXT));
        assert!(app.hits.rows.is_empty());
    }

    #[test]
    fn rows_with_checkboxes_and_actions() {
        let mut app = app_with_items(&[("Buy milk", false), ("Walk dog", true)]);
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_list(frame, &mut app, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" [ ] Buy milk"));
        assert!(lines[1].starts_with(" [x] Walk dog"));
        assert!(lines[0].ends_with("edit  del"));
        assert_eq!(app.hits.rows.len(), 2);
        assert_eq!(app.hits.rows[1].checkbox, Rect::new(1, 1, 3, 1));
    }

    #[test]
    fn filter_limits_rows() {
        let mut app = app_with_items(&[("A", false), ("B", true), ("C", false)]);
        app.set_filter(Filter::Completed);
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_list(frame, &mut app, area);
        });
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("[x] B"));
    }

    #[test]
    fn editing_row_shows_buffer() {
        let mut app = app_with_items(&[("Buy milk", false)]);
        app.begin_edit_selected();
        if let Some(buffer) = app.editor.buffer_mut() {
            buffer.insert_str(" and eggs");
        }
        let output = render_to_string(TERM_W, 3, |frame, area| {
            render_list(frame, &mut app, area);
        });
        assert!(output.contains("Buy milk and eggs"));
    }

    #[test]
    fn narrow_terminal_hides_actions() {
        let mut app = app_with_items(&[("Buy milk", false)]);
        let output = render_to_string(20, 3, |frame, area| {
            render_list(frame, &mut app, area);
        });
        assert!(!output.contains("del"));
        assert_eq!(app.hits.rows[0].delete, Rect::default());
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let items: Vec<(String, bool)> = (0..10).map(|i| (format!("item {}", i), false)).collect();
        let refs: Vec<(&str, bool)> = items.iter().map(|(t, c)| (t.as_str(), *c)).collect();
        let mut app = app_with_items(&refs);
        app.cursor = 9;
        let output = render_to_string(TERM_W, 3, |frame, area| {
            render_list(frame, &mut app, area);
        });
        assert_eq!(app.scroll, 7);
        assert!(output.contains("item 9"));
        assert!(!output.contains("item 6"));
        assert_eq!(app.hits.rows[0].id, "t8");
    }
}
