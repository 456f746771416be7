use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Key bindings by section, as shown in the overlay
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "List",
        &[
            ("\u{2191}\u{2193} j k", "Move selection"),
            ("g G", "Jump to top / bottom"),
            ("space x", "Toggle completed"),
            ("e Enter", "Edit (or double-click)"),
            ("d Del", "Delete"),
            ("c", "Clear completed"),
            ("Tab i a", "New item field"),
        ],
    ),
    (
        "Filters",
        &[("1 2 3", "All / Active / Completed"), ("f", "Next filter")],
    ),
    (
        "Editing",
        &[
            ("Enter", "Save (blank deletes)"),
            ("Esc", "Cancel"),
            ("Tab", "Save, then new item field"),
        ],
    ),
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q", "Quit"),
            ("Ctrl-C", "Quit from anywhere"),
        ],
    ),
];

const KEY_COLUMN: usize = 12;
const OVERLAY_WIDTH: u16 = 46;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled(" Key Bindings", header_style))];
    for (title, bindings) in SECTIONS {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(format!(" {}", title), header_style)));
        for (keys, desc) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:<width$}", keys, width = KEY_COLUMN), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    }

    // Sized to the content, centered, clipped to the screen
    let width = OVERLAY_WIDTH.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let overlay = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.muted).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}
