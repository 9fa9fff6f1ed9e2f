//! Player intents and the name-entry buffer
//!
//! Platform code turns key presses into [`Intent`]s and hands them to
//! [`crate::game::Game::handle`].

use crate::highscores::MAX_NAME_LEN;
use crate::sim::{Command, Direction};

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Steer the player (only while playing)
    Move(Direction),
    Command(Command),
    /// Typed character (only while entering a name)
    Char(char),
    Backspace,
}

/// Name typed before a run, committed with the score
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    buf: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character. ASCII letters and digits only, up to the max length.
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii_alphanumeric() || self.buf.len() >= MAX_NAME_LEN {
            return false;
        }
        self.buf.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.buf.pop();
    }

    /// Non-empty names can be confirmed
    pub fn is_ready(&self) -> bool {
        !self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list() {
        let mut name = NameEntry::new();
        assert!(name.push('a'));
        assert!(name.push('Z'));
        assert!(name.push('7'));
        assert!(!name.push(' '));
        assert!(!name.push('-'));
        assert!(!name.push('é'));
        assert_eq!(name.as_str(), "aZ7");
    }

    #[test]
    fn test_max_length() {
        let mut name = NameEntry::new();
        for c in "ABCDEFGHIJKL".chars() {
            name.push(c);
        }
        assert_eq!(name.as_str(), "ABCDEFGHIJ");
    }

    #[test]
    fn test_backspace_and_ready() {
        let mut name = NameEntry::new();
        assert!(!name.is_ready());
        name.push('X');
        assert!(name.is_ready());
        name.backspace();
        name.backspace();
        assert!(!name.is_ready());
    }

    #[test]
    fn test_take_empties_buffer() {
        let mut name = NameEntry::new();
        name.push('Q');
        assert_eq!(name.take(), "Q");
        assert_eq!(name.as_str(), "");
    }
}
