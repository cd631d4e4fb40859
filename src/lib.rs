//! A four-function calculator core: a whitelisting arithmetic evaluator and
//! the display buffer that feeds it.
//!
//! Front ends translate button presses or keystrokes into [`Key`]s and hand
//! them to a [`DisplayBuffer`], then render [`DisplayBuffer::text`].

pub mod buffer;
pub mod keys;
pub mod parser;

pub use buffer::DisplayBuffer;
pub use keys::Key;
pub use parser::{calculate, evaluate, validate, CalcError, ErrorKind, EvaluationOutcome, Number};
