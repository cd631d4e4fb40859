//! The editable display line of a calculator session.

use crate::keys::Key;
use crate::parser::{self, canonical_glyph, CalcError, EvaluationOutcome, Number};
use tracing::debug;

/// Shown in place of the expression when evaluation fails.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// The placeholder shown when nothing has been typed.
const PLACEHOLDER: &str = "0";

/// Holds the expression being composed and the last value it produced.
///
/// The expression is never empty; `"0"` stands in for "nothing typed yet"
/// and is replaced by the first digit. Operator adjacency and parenthesis
/// balance are not checked while typing, only on [`DisplayBuffer::evaluate`].
///
/// A failed evaluation leaves no expression behind: the marker is shown
/// until the next edit, which starts again from `"0"`.
#[derive(Clone, Debug)]
pub struct DisplayBuffer {
    text: String,
    last_result: Option<Number>,
    error: Option<CalcError>,
    error_marker: String,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self::with_error_marker(DEFAULT_ERROR_MARKER)
    }

    pub fn with_error_marker(marker: impl Into<String>) -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
            last_result: None,
            error: None,
            error_marker: marker.into(),
        }
    }

    /// What the display should show right now.
    pub fn text(&self) -> &str {
        if self.error.is_some() {
            &self.error_marker
        } else {
            &self.text
        }
    }

    pub fn last_result(&self) -> Option<Number> {
        self.last_result
    }

    /// The failure currently on display, if any.
    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.error.is_none() && self.text == PLACEHOLDER
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.reset();
    }

    pub fn backspace(&mut self) {
        if self.error.take().is_some() {
            self.reset();
            return;
        }

        self.text.pop();
        if self.text.is_empty() {
            self.reset();
        }
    }

    /// Appends one character, translating display glyphs first.
    ///
    /// Characters outside the expression alphabet are refused and leave the
    /// buffer untouched. Whitespace is ignored.
    pub fn append(&mut self, token: char) -> Result<(), CalcError> {
        if token.is_whitespace() {
            return Ok(());
        }

        let token = canonical_glyph(token);
        if !parser::is_allowed(token) {
            return Err(CalcError::InvalidCharacter {
                character: token,
                position: self.text.chars().count(),
            });
        }

        if self.error.take().is_some() {
            self.reset();
        }

        if self.text == PLACEHOLDER {
            match token {
                '0'..='9' => {
                    self.text.clear();
                    self.text.push(token);
                }
                // Nothing to close yet.
                ')' => {}
                // The zero becomes the left operand.
                _ => self.text.push(token),
            }
        } else {
            self.text.push(token);
        }

        Ok(())
    }

    /// Evaluates the current expression and replaces it with the result,
    /// or with the error marker on failure.
    ///
    /// While an error is on display this reports it again without
    /// re-evaluating anything.
    pub fn evaluate(&mut self) -> EvaluationOutcome {
        if let Some(ref err) = self.error {
            return Err(err.clone());
        }

        let outcome = parser::calculate(&self.text);
        match &outcome {
            Ok(number) => {
                self.text = number.to_string();
                self.last_result = Some(*number);
            }
            Err(err) => {
                debug!(expr = %self.text, error = %err, "expression rejected");
                self.reset();
                self.error = Some(err.clone());
            }
        }
        outcome
    }

    pub fn press(&mut self, key: Key) -> Result<(), CalcError> {
        match key {
            Key::Token(c) => self.append(c),
            Key::Clear => {
                self.clear();
                Ok(())
            }
            Key::Backspace => {
                self.backspace();
                Ok(())
            }
            Key::Evaluate => self.evaluate().map(|_| ()),
        }
    }

    fn reset(&mut self) {
        self.text.clear();
        self.text.push_str(PLACEHOLDER);
    }
}

#[cfg(test)]
mod tests;
