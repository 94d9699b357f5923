//! Main UI input handler.
//!
//! Global keys are checked first; everything else goes to the focused
//! control. Every edit goes through one composition setter.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::constants::{FONT_SIZE_MAX, FONT_SIZE_MIN, POSITION_MAX, POSITION_MIN};
use crate::models::TEMPLATES;
use crate::tui::controls::{
    pop_message_char, push_message_char, step_color, step_font_size, step_position,
    step_template, ControlField,
};
use crate::tui::AppState;

/// Position slider step for PgUp/PgDn.
const POSITION_PAGE: i32 = 10;

/// Handle input for main UI
pub fn handle_main_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => {
            state.should_quit = true;
            return Ok(true);
        }
        KeyCode::Char('s') if ctrl => {
            state.start_export();
            return Ok(false);
        }
        KeyCode::Esc => {
            state.should_quit = true;
            return Ok(true);
        }
        KeyCode::F(1) => {
            state.show_help = true;
            return Ok(false);
        }
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            return Ok(false);
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.previous();
            return Ok(false);
        }
        _ => {}
    }

    if ctrl || key.modifiers.contains(KeyModifiers::ALT) {
        return Ok(false);
    }

    match state.focus {
        ControlField::Template => handle_template(state, key.code),
        ControlField::Message => handle_message(state, key.code),
        ControlField::FontSize => handle_font_size(state, key.code),
        ControlField::Color => handle_color(state, key.code),
        ControlField::Position => handle_position(state, key.code),
        ControlField::Download => handle_download(state, key.code),
    }
}

/// Handle input while the help overlay is shown
pub fn handle_help_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
        state.show_help = false;
    }
    Ok(false)
}

fn handle_template(state: &mut AppState, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Left => step_template(&mut state.composition, -1),
        KeyCode::Right => step_template(&mut state.composition, 1),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            state.composition.set_template(&TEMPLATES[index]);
        }
        KeyCode::Char('q') => return Ok(quit(state)),
        _ => {}
    }
    Ok(false)
}

fn handle_message(state: &mut AppState, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Char(c) => {
            push_message_char(&mut state.composition, c);
        }
        KeyCode::Enter => {
            push_message_char(&mut state.composition, '\n');
        }
        KeyCode::Backspace => {
            pop_message_char(&mut state.composition);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_font_size(state: &mut AppState, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Left => step_font_size(&mut state.composition, -1),
        KeyCode::Right => step_font_size(&mut state.composition, 1),
        KeyCode::Home => state.composition.set_font_size(FONT_SIZE_MIN),
        KeyCode::End => state.composition.set_font_size(FONT_SIZE_MAX),
        KeyCode::Char('q') => return Ok(quit(state)),
        _ => {}
    }
    Ok(false)
}

fn handle_color(state: &mut AppState, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Left => step_color(&mut state.composition, -1),
        KeyCode::Right => step_color(&mut state.composition, 1),
        KeyCode::Char('q') => return Ok(quit(state)),
        _ => {}
    }
    Ok(false)
}

fn handle_position(state: &mut AppState, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Left => step_position(&mut state.composition, -1),
        KeyCode::Right => step_position(&mut state.composition, 1),
        KeyCode::PageUp => step_position(&mut state.composition, -POSITION_PAGE),
        KeyCode::PageDown => step_position(&mut state.composition, POSITION_PAGE),
        KeyCode::Home => state.composition.set_position(POSITION_MIN),
        KeyCode::End => state.composition.set_position(POSITION_MAX),
        KeyCode::Char('q') => return Ok(quit(state)),
        _ => {}
    }
    Ok(false)
}

fn handle_download(state: &mut AppState, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => state.start_export(),
        KeyCode::Char('q') => return Ok(quit(state)),
        _ => {}
    }
    Ok(false)
}

fn quit(state: &mut AppState) -> bool {
    state.should_quit = true;
    true
}
