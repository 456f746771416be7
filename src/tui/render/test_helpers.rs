use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::MemoryStore;
use crate::session::Command;
use crate::tui::app::App;
use crate::tui::app::tests::test_app;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut lines: Vec<String> = (0..h)
        .map(|y| {
            let row: String = (0..w)
                .filter_map(|x| buffer.cell((x, y)))
                .map(|cell| cell.symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// An app over an in-memory store holding `(text, completed)` items in order.
/// Ids are "t1", "t2", ...
pub fn app_with_items(items: &[(&str, bool)]) -> App<MemoryStore> {
    let mut app = test_app();
    for (text, completed) in items {
        let id = app.session.items().len() + 1;
        app.dispatch(Command::Add(text.to_string()));
        if *completed {
            app.dispatch(Command::Toggle(format!("t{}", id)));
        }
    }
    app.cursor = 0;
    app
}
