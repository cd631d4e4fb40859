//! Button labels and keyboard characters, mapped onto buffer operations.

use crate::parser::canonical_glyph;

/// Labels that may trigger a backspace. Both keypad layouts are accepted.
const BACKSPACE_LABELS: &[&str] = &["←", "⌫", "DEL", "Del"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A character to append, already in canonical form.
    Token(char),
    Clear,
    Backspace,
    Evaluate,
}

impl Key {
    /// Maps a keypad button label.
    pub fn from_label(label: &str) -> Option<Key> {
        match label {
            "AC" | "C" => Some(Key::Clear),
            "=" => Some(Key::Evaluate),
            _ if BACKSPACE_LABELS.contains(&label) => Some(Key::Backspace),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::from_char(c),
                    _ => None,
                }
            }
        }
    }

    /// Maps a typed character. Characters outside the keypad map to `None`.
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '=' | '\n' | '\r' => Some(Key::Evaluate),
            'c' | 'C' | '\u{1b}' => Some(Key::Clear),
            '\u{8}' | '\u{7f}' | '←' | '⌫' => Some(Key::Backspace),
            _ => {
                let canonical = canonical_glyph(c);
                Some(Key::Token(canonical)).filter(|_| crate::parser::is_allowed(canonical))
            }
        }
    }

    /// Maps a named key as reported by a windowing toolkit.
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name {
            "BackSpace" | "Delete" => Some(Key::Backspace),
            "Return" | "KP_Enter" => Some(Key::Evaluate),
            "Escape" => Some(Key::Clear),
            _ => None,
        }
    }
}
