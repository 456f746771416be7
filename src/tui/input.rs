use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::io::store::KeyValueStore;
use crate::model::filter::Filter;
use crate::session::Command;

use super::app::{App, Focus};
use super::line_buffer::LineBuffer;

/// Two clicks on the same label within this window count as a double-click
pub const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Handle a key press
pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay swallows the next key
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.editor.is_editing() {
        handle_editing(app, key);
        return;
    }

    match app.focus {
        Focus::Input => handle_input_field(app, key),
        Focus::List => handle_list(app, key),
    }
}

/// Keys while a row's inline editor is open
fn handle_editing<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.discard_edit(),
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Down => app.move_cursor(1),
        KeyCode::Tab | KeyCode::BackTab => app.set_focus(Focus::Input),
        _ => {
            if let Some(buffer) = app.editor.buffer_mut() {
                edit_line(buffer, key);
            }
        }
    }
}

/// Keys in the new-item field
fn handle_input_field<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => {
            app.set_focus(Focus::List)
        }
        _ => {
            edit_line(&mut app.input, key);
        }
    }
}

/// Keys over the list
fn handle_list<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        (_, KeyCode::Up | KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::Down | KeyCode::Char('j')) => app.move_cursor(1),
        (_, KeyCode::Home | KeyCode::Char('g')) => app.move_to_top(),
        (_, KeyCode::End | KeyCode::Char('G')) => app.move_to_bottom(),

        (_, KeyCode::Char(' ') | KeyCode::Char('x')) => app.toggle_selected(),
        (_, KeyCode::Enter | KeyCode::Char('e')) => app.begin_edit_selected(),
        (_, KeyCode::Delete | KeyCode::Char('d')) => app.delete_selected(),

        (_, KeyCode::Char('1')) => app.set_filter(Filter::All),
        (_, KeyCode::Char('2')) => app.set_filter(Filter::Active),
        (_, KeyCode::Char('3')) => app.set_filter(Filter::Completed),
        (_, KeyCode::Char('f')) => {
            let next = app.session.filter().cycle();
            app.set_filter(next);
        }
        (_, KeyCode::Char('c')) => app.clear_completed(),

        (_, KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('i') | KeyCode::Char('a')) => {
            app.set_focus(Focus::Input)
        }
        _ => {}
    }
}

/// Apply a text-editing key to a line buffer. Returns whether it was handled.
pub fn edit_line(buffer: &mut LineBuffer, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Left if ctrl || alt => buffer.move_word_left(),
        KeyCode::Right if ctrl || alt => buffer.move_word_right(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        KeyCode::Backspace if ctrl || alt => buffer.delete_word_left(),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete(),
        KeyCode::Char('a') if ctrl => buffer.move_home(),
        KeyCode::Char('e') if ctrl => buffer.move_end(),
        KeyCode::Char('w') if ctrl => buffer.delete_word_left(),
        KeyCode::Char(c) if !ctrl => buffer.insert_char(c),
        _ => return false,
    }
    true
}

/// Handle a bracketed paste into whichever text field has focus
pub fn handle_paste<S: KeyValueStore>(app: &mut App<S>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(buffer) = app.editor.buffer_mut() {
        buffer.insert_str(text);
    } else if app.focus == Focus::Input {
        app.input.insert_str(text);
    }
}

/// What a click landed on. Rows are identified by id so the target survives
/// a re-render triggered by committing an open edit.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Input,
    AddButton,
    Tab(Filter),
    ClearCompleted,
    Checkbox(String),
    Label(String),
    Edit(String),
    Delete(String),
    Nothing,
}

fn hit_test<S>(app: &App<S>, col: u16, row: u16) -> Target {
    let pos = Position::new(col, row);
    let hits = &app.hits;
    if contains(hits.add_button, pos) {
        return Target::AddButton;
    }
    if contains(hits.input, pos) {
        return Target::Input;
    }
    if let Some((_, f)) = hits.tabs.iter().find(|(r, _)| contains(*r, pos)) {
        return Target::Tab(*f);
    }
    if contains(hits.clear_completed, pos) {
        return Target::ClearCompleted;
    }
    for r in &hits.rows {
        if contains(r.checkbox, pos) {
            return Target::Checkbox(r.id.clone());
        }
        if contains(r.edit, pos) {
            return Target::Edit(r.id.clone());
        }
        if contains(r.delete, pos) {
            return Target::Delete(r.id.clone());
        }
        if contains(r.label, pos) {
            return Target::Label(r.id.clone());
        }
    }
    Target::Nothing
}

fn contains(rect: Rect, pos: Position) -> bool {
    rect.width > 0 && rect.height > 0 && rect.contains(pos)
}

/// Handle a mouse event: left clicks only
pub fn handle_mouse<S: KeyValueStore>(app: &mut App<S>, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }
    let target = hit_test(app, mouse.column, mouse.row);

    // Clicking anything but the row being edited blurs the editor
    let on_editing_row = matches!(
        &target,
        Target::Label(id) if app.editor.editing_id() == Some(id.as_str())
    );
    if !on_editing_row {
        app.blur_editor();
    }

    match target {
        Target::Input => app.set_focus(Focus::Input),
        Target::AddButton => {
            app.submit_input();
            app.set_focus(Focus::Input);
        }
        Target::Tab(filter) => app.set_filter(filter),
        Target::ClearCompleted => app.clear_completed(),
        Target::Checkbox(id) => {
            app.select_id(&id);
            app.dispatch(Command::Toggle(id));
        }
        Target::Edit(id) => app.begin_edit(&id),
        Target::Delete(id) => {
            app.dispatch(Command::Delete(id));
        }
        Target::Label(id) => {
            if on_editing_row {
                return;
            }
            app.set_focus(Focus::List);
            app.select_id(&id);
            let now = Instant::now();
            let is_double = app.last_click.as_ref().is_some_and(|(at, last_id)| {
                *last_id == id && now.duration_since(*at) <= DOUBLE_CLICK
            });
            if is_double {
                app.last_click = None;
                app.begin_edit(&id);
            } else {
                app.last_click = Some((now, id));
            }
        }
        Target::Nothing => {}
    }
}
