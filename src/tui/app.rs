use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::store::KeyValueStore;
use crate::model::config::UiConfig;
use crate::model::filter::Filter;
use crate::session::{Command, Outcome, Session};
use crate::view::{ListView, Renderer, RowView, build_view};

use super::editor::InlineEditor;
use super::input;
use super::line_buffer::LineBuffer;
use super::render;
use super::theme::Theme;

/// Which widget receives typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The "new item" field
    Input,
    /// The item list (row commands, or the inline editor when open)
    List,
}

/// The terminal's [`Renderer`]: holds the latest view until the next draw.
#[derive(Debug, Clone)]
pub struct Screen {
    pub view: ListView,
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            view: build_view(&[], Filter::All),
        }
    }
}

impl Renderer for Screen {
    fn render(&mut self, view: &ListView) {
        self.view = view.clone();
    }
}

/// Clickable regions of one list row, recorded while drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHit {
    pub id: String,
    pub checkbox: Rect,
    pub label: Rect,
    pub edit: Rect,
    pub delete: Rect,
}

/// Screen regions from the last draw, used to route mouse clicks
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub input: Rect,
    pub add_button: Rect,
    pub rows: Vec<RowHit>,
    pub tabs: Vec<(Rect, Filter)>,
    pub clear_completed: Rect,
}

/// Main application state for the terminal UI
pub struct App<S> {
    pub session: Session<S, Screen>,
    pub focus: Focus,
    /// Text of the "new item" field
    pub input: LineBuffer,
    pub editor: InlineEditor,
    /// Selected row, index into the visible rows
    pub cursor: usize,
    /// First visible row
    pub scroll: usize,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub should_quit: bool,
    pub theme: Theme,
    pub hits: HitMap,
    /// Last left click on a label: when, and which row id (double-click detection)
    pub last_click: Option<(Instant, String)>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: Session<S, Screen>, ui: &UiConfig) -> Self {
        App {
            session,
            focus: Focus::Input,
            input: LineBuffer::new(),
            editor: InlineEditor::default(),
            cursor: 0,
            scroll: 0,
            show_help: false,
            show_key_hints: ui.show_key_hints,
            should_quit: false,
            theme: Theme::from_config(ui),
            hits: HitMap::default(),
            last_click: None,
        }
    }

    /// The view from the most recent render
    pub fn view(&self) -> &ListView {
        &self.session.renderer().view
    }

    pub fn selected_row(&self) -> Option<&RowView> {
        self.view().rows.get(self.cursor)
    }

    /// Dispatch a command. An open inline edit is committed first.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        self.blur_editor();
        let outcome = self.session.dispatch(command);
        self.clamp_cursor();
        outcome
    }

    /// Add the text in the new-item field, then clear the field
    pub fn submit_input(&mut self) {
        let text = self.input.take();
        if let Outcome::Added(id) = self.dispatch(Command::Add(text)) {
            self.select_id(&id);
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_row().map(|r| r.id.clone()) {
            self.dispatch(Command::Toggle(id));
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_row().map(|r| r.id.clone()) {
            self.dispatch(Command::Delete(id));
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.dispatch(Command::SetFilter(filter.name().to_string()));
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn clear_completed(&mut self) {
        self.dispatch(Command::ClearCompleted);
    }

    /// Open the inline editor on the selected row
    pub fn begin_edit_selected(&mut self) {
        if let Some(id) = self.selected_row().map(|r| r.id.clone()) {
            self.begin_edit(&id);
        }
    }

    /// Open the inline editor on the row with `id`, if visible
    pub fn begin_edit(&mut self, id: &str) {
        if self.editor.editing_id() == Some(id) {
            return;
        }
        // Resolve any other open edit first; it may remove its row.
        self.blur_editor();
        let Some(row) = self.view().rows.iter().find(|r| r.id == id) else {
            return;
        };
        let text = row.text.clone();
        self.editor.begin(id, &text);
        self.focus = Focus::List;
        self.select_id(id);
    }

    /// Enter in the editor
    pub fn commit_edit(&mut self) {
        if let Some(command) = self.editor.commit() {
            self.session.dispatch(command);
            self.clamp_cursor();
        }
    }

    /// Escape in the editor: drop the edit and redraw from stored state
    pub fn discard_edit(&mut self) {
        if self.editor.discard() {
            self.session.refresh();
        }
    }

    /// Focus left the editor: commit like Enter
    pub fn blur_editor(&mut self) {
        if self.editor.is_editing() {
            self.commit_edit();
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.blur_editor();
        let len = self.view().rows.len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor.saturating_add_signed(delta);
        self.cursor = next.min(len - 1);
    }

    pub fn move_to_top(&mut self) {
        self.blur_editor();
        self.cursor = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.blur_editor();
        self.cursor = self.view().rows.len().saturating_sub(1);
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if focus != Focus::List {
            self.blur_editor();
        }
        self.focus = focus;
    }

    pub fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.view().rows.iter().position(|r| r.id == id) {
            self.cursor = idx;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.view().rows.len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }
}

/// Run the terminal UI until the user quits
pub fn run<S: KeyValueStore>(mut app: App<S>) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    tracing::info!(items = app.session.items().len(), "ui started");
    let result = run_event_loop(&mut terminal, &mut app);

    // Leaving the UI is a blur too
    app.blur_editor();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    tracing::info!("ui stopped");

    result
}

fn run_event_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                Event::FocusLost => app.blur_editor(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
