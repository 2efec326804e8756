//! Raw key input shared by the CLI and TUI frontends.
//!
//! Keys arrive as a stream of crossterm events. `next_key` turns that stream
//! into guesses and cancellation requests, skipping everything else.

use crate::debug_log;
use crate::error::{Error, Result};
use crate::game_state::KeyInput;
use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use std::io;

/// The character a terminal delivers for Ctrl+C when signals are off.
pub const CTRL_C_CHAR: char = '\u{3}';
const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Maps a terminal event to a key the round cares about.
pub fn key_input(event: &Event) -> Option<KeyInput> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c' | 'C') if ctrl => Some(KeyInput::Cancel),
        KeyCode::Char(CTRL_C_CHAR) => Some(KeyInput::Cancel),
        KeyCode::Char(_) if ctrl || alt => None,
        // Garbage from escape sequences, e.g. when alt-tabbing.
        KeyCode::Char(c) if c.is_control() || c == REPLACEMENT_CHAR => None,
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        _ => None,
    }
}

/// Waits for the next guess or cancellation. Cancel safe.
pub async fn next_key<S>(events: &mut S) -> Result<KeyInput>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    while let Some(event) = events.next().await {
        let event = event?;
        match key_input(&event) {
            Some(key) => return Ok(key),
            None => debug_log!("Ignoring event: {:?}", event),
        }
    }
    Err(Error::InputClosed)
}

/// Keeps the terminal in raw mode until dropped, optionally on the alternate
/// screen with the cursor hidden.
#[derive(Debug)]
pub struct TerminalGuard {
    alternate_screen: bool,
}

impl TerminalGuard {
    pub fn raw_mode() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self {
            alternate_screen: false,
        })
    }

    pub fn alternate_screen() -> io::Result<Self> {
        let mut guard = Self::raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        guard.alternate_screen = true;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        }
        let _ = disable_raw_mode();
    }
}
