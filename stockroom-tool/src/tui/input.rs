use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stockroom_core::{Confirmation, Store};

use super::app::{App, AppMode};
use super::field::TextField;

pub fn handle_event<S: Store>(app: &mut App<S>, event: Event) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            handle_key(app, key);
        }
    }
}

fn handle_key<S: Store>(app: &mut App<S>, key: KeyEvent) {
    match app.mode {
        AppMode::List => handle_list_key(app, key),
        AppMode::Search => handle_search_key(app, key),
        AppMode::SelectSort => handle_popup_key(app, key),
        AppMode::ConfirmDelete(_) => handle_confirm_key(app, key),
        AppMode::Form => handle_form_key(app, key),
        AppMode::Saving => {}
    }
}

fn handle_list_key<S: Store>(app: &mut App<S>, key: KeyEvent) {
    app.last_error = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('s') => app.open_sort_picker(),
        KeyCode::Char('a') => app.open_form(),
        KeyCode::Char(c) => {
            app.dispatch_row_key(c);
        }
        _ => {}
    }
}

fn handle_search_key<S: Store>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_search(false),
        KeyCode::Enter => app.end_search(true),
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        _ => {
            if edit_field(&mut app.search, key) {
                app.search_changed();
            }
        }
    }
}

fn handle_popup_key<S: Store>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_popup(),
        KeyCode::Enter => app.popup_select(),
        KeyCode::Up => app.popup_up(),
        KeyCode::Down => app.popup_down(),
        _ => {}
    }
}

fn handle_confirm_key<S: Store>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_delete(Confirmation::Accepted),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.answer_delete(Confirmation::Declined)
        }
        _ => {}
    }
}

fn handle_form_key<S: Store>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        _ => {
            if let Some(input) = app.focused_input() {
                edit_field(input, key);
            }
        }
    }
}

/// Applies a line-editing key. Returns whether the text changed.
fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            field.insert(c);
            true
        }
        (KeyCode::Backspace, _) => {
            field.backspace();
            true
        }
        (KeyCode::Delete, _) => {
            field.delete();
            true
        }
        (KeyCode::Left, _) => {
            field.left();
            false
        }
        (KeyCode::Right, _) => {
            field.right();
            false
        }
        (KeyCode::Home, _) => {
            field.home();
            false
        }
        (KeyCode::End, _) => {
            field.end();
            false
        }
        _ => false,
    }
}
