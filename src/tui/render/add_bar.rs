use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::util::unicode::{display_width, skip_columns};

const PLACEHOLDER: &str = "What needs to be done?";
const ADD_LABEL: &str = " Add ";

/// Render the bordered new-item field with its Add button
pub fn render_add_bar<S>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let focused = app.focus == Focus::Input && !app.editor.is_editing();
    let border_color = if focused {
        app.theme.accent
    } else {
        app.theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(app.theme.background))
        .title(Span::styled(
            " todos ",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        app.hits.input = Rect::default();
        app.hits.add_button = Rect::default();
        return;
    }

    // Button on the right, one cell of padding before it
    let button_w = (display_width(ADD_LABEL) as u16).min(inner.width);
    let button = Rect::new(inner.right() - button_w, inner.y, button_w, 1);
    let field = Rect::new(
        inner.x,
        inner.y,
        inner.width.saturating_sub(button_w + 1),
        1,
    );
    app.hits.input = field;
    app.hits.add_button = button;

    let button_style = Style::default()
        .fg(app.theme.background)
        .bg(if focused { app.theme.accent } else { app.theme.muted })
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Span::styled(ADD_LABEL, button_style)), button);

    let width = field.width as usize;
    if app.input.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(app.theme.muted)
                .bg(app.theme.background)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(placeholder, field);
        if focused && width > 0 {
            frame.set_cursor_position(Position::new(field.x, field.y));
        }
        return;
    }

    // Scroll horizontally so the cursor stays in view
    let cursor_col = app.input.cursor_col();
    let skip = (cursor_col + 1).saturating_sub(width);
    let shown = skip_columns(app.input.text(), skip);
    let line = Line::from(Span::styled(
        shown.to_string(),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background),
    ));
    frame.render_widget(Paragraph::new(line), field);

    if focused && width > 0 {
        let col = (cursor_col - skip).min(width - 1) as u16;
        frame.set_cursor_position(Position::new(field.x + col, field.y));
    }
}
