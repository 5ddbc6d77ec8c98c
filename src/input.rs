use crate::machine::NUM_KEYS;
use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// map of keyboard characters to the hex pad, using the left-hand side of a
/// qwerty keyboard:
///   1 2 3 4        1 2 3 C
///   q w e r   ->   4 5 6 D
///   a s d f        7 8 9 E
///   z x c v        A 0 B F
const CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// reads keypresses into the 16-key held-state vector the machine consumes
pub trait Input {
    /// which of the 16 keys count as held right now
    fn key_state(&mut self) -> Result<[bool; NUM_KEYS], io::Error>;

    /// true once the user has asked to stop the emulator
    fn quit_requested(&self) -> bool;
}

/// simple implementation of Input, using crossterm events on stdin.
///
/// Terminals only report key-down, never key-up, so a mapped keypress counts
/// as "held" for the single frame in which it was seen.
pub struct CrosstermInput {
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl CrosstermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(CrosstermInput {
            keymap: HashMap::from(CONVENTIONAL_KEYMAP),
            quit: false,
        })
    }
}

impl Drop for CrosstermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for CrosstermInput {
    fn key_state(&mut self) -> Result<[bool; NUM_KEYS], io::Error> {
        let mut keys = [false; NUM_KEYS];
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                match evt.code {
                    KeyCode::Char(key) => {
                        if let Some(mapped) = self.keymap.get(&key) {
                            keys[*mapped as usize] = true;
                        }
                    }
                    KeyCode::Esc => self.quit = true,
                    _ => {}
                }
            }
        }
        Ok(keys)
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing
pub struct DummyInput {
    keys: [bool; NUM_KEYS],
}

impl DummyInput {
    pub fn new(held: &[u8]) -> Self {
        let mut keys = [false; NUM_KEYS];
        for &k in held {
            keys[k as usize] = true;
        }
        DummyInput { keys }
    }
}

impl Input for DummyInput {
    fn key_state(&mut self) -> Result<[bool; NUM_KEYS], io::Error> {
        Ok(self.keys)
    }

    fn quit_requested(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_all_sixteen_keys() {
        let mut seen = [false; NUM_KEYS];
        for (_, key) in CONVENTIONAL_KEYMAP {
            seen[key as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_dummy_input_reports_held_keys() {
        let mut input = DummyInput::new(&[0x1, 0xf]);
        let keys = input.key_state().unwrap();
        assert!(keys[0x1]);
        assert!(keys[0xf]);
        assert_eq!(keys.iter().filter(|&&k| k).count(), 2);
    }
}
