//! Arithmetic over `0-9 . + - * / ( )`.
//!
//! Input is whitelisted by [`validate`] and then lexed and reduced by a
//! grammar that only knows numbers, the four operators, unary minus and
//! parentheses. Nothing else can be expressed.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

#[macro_use]
mod macros;
mod ast;
pub mod lex;

pub use self::ast::ParseError;
pub use self::lex::LexError;

lazy_static! {
    /// Display glyphs accepted in place of their canonical operators.
    pub static ref GLYPHS: HashMap<char, char> = glyph_map! {
        '×' => '*',
        '÷' => '/',
    };
}

/// Translates a display glyph to its canonical operator, passing anything
/// else through untouched.
pub fn canonical_glyph(c: char) -> char {
    GLYPHS.get(&c).copied().unwrap_or(c)
}

/// Whether `c` belongs to the canonical expression alphabet.
pub fn is_allowed(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '(' | ')') || lex::Operator::is_operator(c)
}

/// Coarse classification of [`CalcError`], for callers that only care about
/// which way an expression failed.
///
/// Besides the character, syntax and division failures there is
/// `Overflow`, for literals or results too large to hold in an `f64`.
/// Match with a wildcard arm; more kinds may be added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    InvalidCharacter,
    SyntaxError,
    DivisionByZero,
    /// A number or intermediate result that is not finite.
    Overflow,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Invalid character '{character}' at index {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result out of range")]
    Overflow,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            CalcError::Lex(_) | CalcError::Parse(_) => ErrorKind::SyntaxError,
            CalcError::DivisionByZero => ErrorKind::DivisionByZero,
            CalcError::Overflow => ErrorKind::Overflow,
        }
    }
}

/// A finite evaluation result.
///
/// Renders without a fractional part when it has none, so `6/3` shows as
/// `2` rather than `2.0`. The rendering always lexes back to the same value.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Number(f64);

impl Number {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_integer(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl From<Number> for f64 {
    fn from(n: Number) -> f64 {
        n.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // `-0` would read back fine but looks odd in a display.
        if self.0 == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

pub type EvaluationOutcome = Result<Number, CalcError>;

/// Checks every character against the alphabet and returns the canonical
/// form: glyphs translated, whitespace dropped.
pub fn validate(raw: &str) -> Result<String, CalcError> {
    raw.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, c)| {
            let canonical = canonical_glyph(c);
            if is_allowed(canonical) {
                Ok(canonical)
            } else {
                Err(CalcError::InvalidCharacter {
                    character: c,
                    position,
                })
            }
        })
        .collect()
}

/// Evaluates a canonical expression.
pub fn evaluate(expr: &str) -> EvaluationOutcome {
    let outcome = lex::lex(expr)
        .map_err(CalcError::from)
        .and_then(|tokens| {
            trace!(?tokens, "lexed");
            Ok(ast::ast_gen(tokens)?)
        })
        .and_then(|tree| tree.get_value())
        .map(|value| Number(if value == 0.0 { 0.0 } else { value }));

    debug!(expr, ?outcome, "evaluated");
    outcome
}

/// [`validate`] followed by [`evaluate`].
pub fn calculate(raw: &str) -> EvaluationOutcome {
    evaluate(&validate(raw)?)
}
