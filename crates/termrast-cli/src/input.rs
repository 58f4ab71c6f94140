//! Terminal keyboard/mouse input via crossterm.

use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::collections::HashSet;
use std::time::Duration;
use termrast_hal::{InputDriver, Key};

/// Crossterm-backed input driver.
///
/// Plain terminals report key presses (and autorepeat) but no releases, so
/// the pressed set is rebuilt on every poll: a key counts as held for the
/// frames in which the terminal delivered an event for it. Pointer motion
/// accumulates into a delta between `cursor_delta` calls.
pub struct TerminalInput {
    pressed: HashSet<Key>,
    delta: (f32, f32),
    last_cursor: Option<(u16, u16)>,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            delta: (0.0, 0.0),
            last_cursor: None,
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w' | 'W') => Some(Key::W),
        KeyCode::Char('a' | 'A') => Some(Key::A),
        KeyCode::Char('s' | 'S') => Some(Key::S),
        KeyCode::Char('d' | 'D') => Some(Key::D),
        KeyCode::Char('i' | 'I') => Some(Key::I),
        KeyCode::Char('o' | 'O') => Some(Key::O),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Return),
        _ => None,
    }
}

impl InputDriver for TerminalInput {
    fn poll(&mut self) {
        self.pressed.clear();

        while crossterm::event::poll(Duration::ZERO).unwrap_or(false) {
            let Ok(event) = crossterm::event::read() else {
                break;
            };
            match event {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if let Some(mapped) = map_key(key.code) {
                        self.pressed.insert(mapped);
                    }
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        self.pressed.insert(Key::Shift);
                    }
                }
                Event::Mouse(mouse) => {
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            self.pressed.insert(Key::LeftButton);
                        }
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            if let Some((px, py)) = self.last_cursor {
                                self.delta.0 += mouse.column as f32 - px as f32;
                                self.delta.1 += mouse.row as f32 - py as f32;
                            }
                            self.last_cursor = Some((mouse.column, mouse.row));
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn cursor_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.delta)
    }
}
