use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::store::KeyValueStore;
use crate::tui::app::{App, Focus};
use crate::util::unicode::display_width;

const CLEAR_LABEL: &str = "Clear completed";

/// Render the footer: active count, filter tabs, clear-completed control
pub fn render_footer<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let view = app.view().clone();

    let mut row = SpanRow::new(area);
    row.push(" ".into(), Style::default().bg(bg));
    row.push(
        view.count_label.clone(),
        Style::default().fg(app.theme.text).bg(bg),
    );
    row.push("   ".into(), Style::default().bg(bg));

    app.hits.tabs.clear();
    for (i, tab) in view.tabs.iter().enumerate() {
        if i > 0 {
            row.push(" ".into(), Style::default().bg(bg));
        }
        let style = if tab.active {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.muted).bg(bg)
        };
        let rect = row.push(format!(" {} ", tab.filter.label()), style);
        app.hits.tabs.push((rect, tab.filter));
    }

    // Right-aligned clear control, when it fits
    let clear_w = display_width(CLEAR_LABEL);
    app.hits.clear_completed = Rect::default();
    if row.col + 2 + clear_w + 1 <= width {
        let gap = width - row.col - clear_w - 1;
        row.push(" ".repeat(gap), Style::default().bg(bg));
        let style = if view.has_completed {
            Style::default().fg(app.theme.text).bg(bg)
        } else {
            Style::default().fg(app.theme.muted).bg(bg)
        };
        app.hits.clear_completed = row.push(CLEAR_LABEL.into(), style);
    }

    let footer = Paragraph::new(Line::from(row.spans)).style(Style::default().bg(bg));
    frame.render_widget(footer, area);
}

/// Spans laid out left to right, remembering where each one landed
struct SpanRow {
    area: Rect,
    col: usize,
    spans: Vec<Span<'static>>,
}

impl SpanRow {
    fn new(area: Rect) -> Self {
        SpanRow {
            area,
            col: 0,
            spans: Vec::new(),
        }
    }

    fn push(&mut self, text: String, style: Style) -> Rect {
        let w = display_width(&text);
        let rect = Rect::new(
            self.area.x + self.col as u16,
            self.area.y,
            w as u16,
            self.area.height.min(1),
        );
        self.col += w;
        self.spans.push(Span::styled(text, style));
        rect
    }
}

/// Render the one-line key hints for the current focus
pub fn render_key_hints<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hints = if app.editor.is_editing() {
        "Enter save  Esc cancel  \u{2191}\u{2193} save and move"
    } else {
        match app.focus {
            Focus::Input => "Enter add  Tab list  Ctrl-C quit",
            Focus::List => "space toggle  e edit  d delete  1/2/3 filter  c clear  ? help  q quit",
        }
    };
    let paragraph = Paragraph::new(format!(" {}", hints))
        .style(Style::default().fg(app.theme.muted).bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
