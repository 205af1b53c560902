use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.session().overlay_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.close_overlay(),
            _ if is_ctrl_char(key, 'f') => app.toggle_favorite(),
            _ if is_ctrl_char(key, 't') => app.toggle_theme(),
            _ => {}
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(ch) = key.code {
            match ch.to_ascii_lowercase() {
                'l' => app.clear(),
                'n' => app.load_more(),
                'f' => app.toggle_favorite(),
                't' => app.toggle_theme(),
                'v' => app.toggle_view(),
                'r' => app.reload_config(),
                _ => {}
            }
        }
        return;
    }

    match key.code {
        KeyCode::Char(ch) => app.insert_char(ch),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Up => app.move_highlight(-1),
        KeyCode::Down => app.move_highlight(1),
        KeyCode::Enter => app.open_highlighted(),
        KeyCode::Esc => app.clear(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&ch))
}
