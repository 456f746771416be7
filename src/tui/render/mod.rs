pub mod add_bar;
pub mod footer;
pub mod help_overlay;
pub mod list_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::io::store::KeyValueStore;

use super::app::App;

/// Main render function: lays out the screen and records click regions
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hint_rows = if app.show_key_hints { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // new-item field
            Constraint::Min(1),            // list
            Constraint::Length(1),         // count, filters, clear completed
            Constraint::Length(hint_rows), // key hints
        ])
        .split(area);

    add_bar::render_add_bar(frame, app, chunks[0]);
    list_view::render_list(frame, app, chunks[1]);
    footer::render_footer(frame, app, chunks[2]);
    if app.show_key_hints {
        footer::render_key_hints(frame, app, chunks[3]);
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Focus;
    use test_helpers::*;

    #[test]
    fn full_screen_layout() {
        let mut app = app_with_items(&[("Buy milk", false)]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("todos"));
        assert!(lines[3].starts_with(" [ ] Buy milk"));
        assert!(lines[(TERM_H - 2) as usize].starts_with(" 1 item"));
        assert!(lines[(TERM_H - 1) as usize].contains("Enter add"));
    }

    #[test]
    fn key_hints_can_be_hidden() {
        let mut app = app_with_items(&[]);
        app.show_key_hints = false;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), TERM_H as usize);
        assert!(lines[(TERM_H - 1) as usize].starts_with(" 0 items"));
        assert!(lines[3].contains("Nothing to show"));
    }

    #[test]
    fn help_overlay_on_top() {
        let mut app = app_with_items(&[]);
        app.set_focus(Focus::List);
        app.show_help = true;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("Key Bindings"));
    }
}
