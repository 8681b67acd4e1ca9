//! Keyboard input. The simulation consumes one [`InputState`] snapshot per
//! tick; the terminal implementation turns the crossterm event stream into
//! those snapshots.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::mpsc::Receiver;

use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal,
};

use crate::scoreboard::NamePrompt;

/// One sampled keyboard snapshot. Direction and fire are level-held; the
/// rest are edge-triggered and reported exactly once per key press.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub confirm_pressed: bool,
    pub pause_toggled: bool,
    pub quit_requested: bool,
    pub restart_requested: bool,
}

pub trait InputSource {
    /// Drain pending events and return the current snapshot.
    fn poll(&mut self) -> InputState;
}

// ── Terminal implementation ───────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many polls. Covers terminals that don't emit key-release events:
/// OS key-repeat arrives at ≥ 15 Hz, so a window of 8 ticks (≈133 ms at the
/// default 60 UPS) is always refreshed before it expires.
const HOLD_WINDOW: u64 = 8;

/// Keyboard front end over the blocking reader thread's event channel.
/// Also serves as the modal name prompt on a new high score, since it owns
/// the only route to key events.
pub struct TerminalConsole {
    rx: Receiver<Event>,
    /// Maps each held key to the poll on which it was last seen.
    key_seen: HashMap<KeyCode, u64>,
    tick: u64,
}

impl TerminalConsole {
    pub fn new(rx: Receiver<Event>) -> Self {
        TerminalConsole {
            rx,
            key_seen: HashMap::new(),
            tick: 0,
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_seen
            .get(&key)
            .map(|&last| self.tick.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

impl InputSource for TerminalConsole {
    fn poll(&mut self) -> InputState {
        self.tick += 1;
        let mut state = InputState::default();

        while let Ok(event) = self.rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };
            match kind {
                // Press: record key + raise one-shot flags
                KeyEventKind::Press => {
                    self.key_seen.insert(code, self.tick);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            state.quit_requested = true;
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            state.quit_requested = true;
                        }
                        KeyCode::Char('n') | KeyCode::Char('N')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            state.restart_requested = true;
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            state.pause_toggled = true;
                        }
                        KeyCode::Char(' ') => {
                            state.confirm_pressed = true;
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh the timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    self.key_seen.insert(code, self.tick);
                }
                // Release: drop it immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    self.key_seen.remove(&code);
                }
            }
        }

        state.move_left = self.is_held(KeyCode::Left)
            || self.is_held(KeyCode::Char('a'))
            || self.is_held(KeyCode::Char('A'));
        state.move_right = self.is_held(KeyCode::Right)
            || self.is_held(KeyCode::Char('d'))
            || self.is_held(KeyCode::Char('D'));
        state.fire = self.is_held(KeyCode::Char(' '));
        state
    }
}

impl NamePrompt for TerminalConsole {
    /// Modal line editor for the high-score name. Blocks the loop, which is
    /// fine: the game is already over and frozen behind the prompt.
    fn read_name(&mut self) -> Option<String> {
        let mut name = String::new();
        if draw_prompt(&name).is_err() {
            return None;
        }
        loop {
            let Ok(event) = self.rx.recv() else {
                return None;
            };
            let Event::Key(KeyEvent { code, kind, .. }) = event else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter => {
                    let name = name.trim().to_string();
                    return if name.is_empty() { None } else { Some(name) };
                }
                KeyCode::Esc => return None,
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(c) if !c.is_control() => {
                    name.push(c);
                }
                _ => continue,
            }
            let _ = draw_prompt(&name);
        }
    }
}

fn draw_prompt(name: &str) -> io::Result<()> {
    let mut out = io::stdout();
    let (width, height) = terminal::size()?;
    let text = format!("New high score! Enter a name (up to 7 chars): {name}_ ");
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    execute!(
        out,
        cursor::MoveTo(col, height / 2 + 4),
        terminal::Clear(terminal::ClearType::CurrentLine),
        cursor::MoveTo(col, height / 2 + 4),
        Print(&text),
    )?;
    out.flush()
}
