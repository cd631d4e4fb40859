use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Deepest parenthesis nesting the lexer will descend into.
pub const MAX_NESTING: usize = 256;

simple_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    OperatorPrecedence {
        PlusMinus,
        MultDiv
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Mult,
    Div,
    Plus,
    Minus,
}

impl Operator {
    pub fn precedence(&self) -> OperatorPrecedence {
        use self::Operator::*;

        match self {
            Mult | Div => OperatorPrecedence::MultDiv,
            Plus | Minus => OperatorPrecedence::PlusMinus,
        }
    }

    pub fn from_char(c: char) -> Option<Operator> {
        use self::Operator::*;

        Some(match c {
            '*' => Mult,
            '/' => Div,
            '+' => Plus,
            '-' => Minus,
            _ => return None,
        })
    }

    pub fn get_char(&self) -> char {
        use self::Operator::*;

        match self {
            Mult => '*',
            Div => '/',
            Plus => '+',
            Minus => '-',
        }
    }

    pub fn is_operator(c: char) -> bool {
        Self::from_char(c).is_some()
    }

    /// Division by zero is rejected before this is reached.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        use self::Operator::*;

        match self {
            Mult => left * right,
            Div => left / right,
            Plus => left + right,
            Minus => left - right,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    Number(f64),
    Op(Operator),
    Parentheses(Vec<Token>),
    Negation,
}

impl Token {
    pub fn is_op(&self) -> bool {
        matches!(self, Token::Op(_))
    }

    pub fn is_neg(&self) -> bool {
        *self == Token::Negation
    }

    pub fn get_descriptor(&self) -> Cow<'static, str> {
        use self::Token::*;

        match self {
            Number(n) => format!("number {}", n).into(),
            Parentheses(_) => Cow::Borrowed("parentheses expression"),
            Op(op) => format!("operator {}", op.get_char()).into(),
            Negation => Cow::Borrowed("token '-'"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Incomplete expression")]
    UnexpectedEOF,
    #[error("Empty parentheses")]
    EmptyParentheses,
    #[error("Unexpected character '{character}' at index {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("Malformed number at index {position}")]
    MalformedNumber { position: usize },
    #[error("Parentheses nested deeper than {} levels", MAX_NESTING)]
    TooDeep,
}

trait TokenBuilder: fmt::Debug {
    fn can_insert(&self, c: char) -> bool;
    fn push(&mut self, c: char) -> Result<(), ()>;
    fn into_token(self: Box<Self>) -> Result<Token, LexError>;
}

#[derive(Debug)]
struct OperatorBuilder {
    inner: Option<Operator>,
}

impl OperatorBuilder {
    fn new() -> Self {
        Self { inner: None }
    }
}

impl TokenBuilder for OperatorBuilder {
    fn can_insert(&self, c: char) -> bool {
        self.inner.is_none() && Operator::is_operator(c)
    }

    fn push(&mut self, c: char) -> Result<(), ()> {
        Operator::from_char(c)
            .filter(|_| self.inner.is_none())
            .map(|op| {
                self.inner = Some(op);
            })
            .ok_or(())
    }

    fn into_token(self: Box<Self>) -> Result<Token, LexError> {
        self.inner.map(Token::Op).ok_or(LexError::UnexpectedEOF)
    }
}

#[derive(Debug)]
struct NegationBuilder {
    complete: bool,
}

impl NegationBuilder {
    fn new() -> Self {
        Self { complete: false }
    }
}

impl TokenBuilder for NegationBuilder {
    fn can_insert(&self, c: char) -> bool {
        !self.complete && c == '-'
    }

    fn push(&mut self, c: char) -> Result<(), ()> {
        if self.can_insert(c) {
            self.complete = true;
            Ok(())
        } else {
            Err(())
        }
    }

    fn into_token(self: Box<Self>) -> Result<Token, LexError> {
        Some(Token::Negation)
            .filter(|_| self.complete)
            .ok_or(LexError::UnexpectedEOF)
    }
}

/// Digits with at most one decimal point; either side of the point may be
/// empty but not both.
#[derive(Debug)]
struct NumberBuilder {
    whole: String,
    fraction: Option<String>,
    start: usize,
}

impl NumberBuilder {
    fn new(start: usize) -> Self {
        Self {
            whole: String::new(),
            fraction: None,
            start,
        }
    }
}

impl TokenBuilder for NumberBuilder {
    fn can_insert(&self, c: char) -> bool {
        c.is_ascii_digit() || c == '.' && self.fraction.is_none()
    }

    fn push(&mut self, c: char) -> Result<(), ()> {
        match c {
            '0'..='9' => match self.fraction {
                Some(ref mut fraction) => fraction.push(c),
                None => self.whole.push(c),
            },
            '.' if self.fraction.is_none() => self.fraction = Some(String::new()),
            _ => return Err(()),
        }
        Ok(())
    }

    fn into_token(self: Box<Self>) -> Result<Token, LexError> {
        let NumberBuilder {
            whole,
            fraction,
            start,
        } = *self;
        let fraction = fraction.unwrap_or_default();
        let malformed = LexError::MalformedNumber { position: start };

        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed);
        }

        format!(
            "{}.{}",
            if whole.is_empty() { "0" } else { whole.as_str() },
            if fraction.is_empty() { "0" } else { fraction.as_str() }
        )
        .parse()
        .map(Token::Number)
        .map_err(|_| malformed)
    }
}

#[derive(Debug)]
struct ParenthesesBuilder {
    inner: String,
    level: usize,
    complete: bool,
    start: usize,
    depth: usize,
}

impl ParenthesesBuilder {
    fn new(start: usize, depth: usize) -> Self {
        Self {
            inner: String::new(),
            level: 0,
            complete: false,
            start,
            depth,
        }
    }
}

impl TokenBuilder for ParenthesesBuilder {
    fn can_insert(&self, _c: char) -> bool {
        !self.complete
    }

    fn push(&mut self, c: char) -> Result<(), ()> {
        if self.complete {
            return Err(());
        }

        match c {
            '(' => {
                if self.level > 0 {
                    self.inner.push(c);
                }
                self.level += 1;
            }
            ')' => {
                self.level = self.level.checked_sub(1).ok_or(())?;
                if self.level > 0 {
                    self.inner.push(c);
                } else {
                    self.complete = true;
                }
            }
            _ => self.inner.push(c),
        }
        Ok(())
    }

    fn into_token(self: Box<Self>) -> Result<Token, LexError> {
        if !self.complete {
            Err(LexError::UnexpectedEOF)
        } else if self.inner.trim().is_empty() {
            Err(LexError::EmptyParentheses)
        } else if self.depth + 1 >= MAX_NESTING {
            Err(LexError::TooDeep)
        } else {
            lex_ind(&self.inner, self.start + 1, self.depth + 1).map(Token::Parentheses)
        }
    }
}

fn lex_ind(s: &str, mut ind: usize, depth: usize) -> Result<Vec<Token>, LexError> {
    use self::LexError::*;

    let mut tokens: Vec<Token> = vec![];
    let mut pending: Option<Box<dyn TokenBuilder>> = None;
    let mut chars = s.chars().peekable();
    // Negations leave this alone: "3*--2" still wants an operand.
    let mut wants_operand = true;

    while let Some(c) = chars.next() {
        if pending.is_none() {
            pending = match c {
                _ if c.is_whitespace() => None,
                '-' if wants_operand => Some(Box::new(NegationBuilder::new())),
                '0'..='9' | '.' if wants_operand => Some(Box::new(NumberBuilder::new(ind))),
                '(' if wants_operand => Some(Box::new(ParenthesesBuilder::new(ind, depth))),
                _ if Operator::is_operator(c) && !wants_operand => {
                    Some(Box::new(OperatorBuilder::new()))
                }
                _ => {
                    return Err(UnexpectedCharacter {
                        character: c,
                        position: ind,
                    })
                }
            };
        }

        if let Some(mut item) = pending.take() {
            item.push(c).map_err(|()| UnexpectedCharacter {
                character: c,
                position: ind,
            })?;

            match chars.peek() {
                Some(next) if item.can_insert(*next) => pending = Some(item),
                _ => {
                    let token = item.into_token()?;
                    if !token.is_neg() {
                        wants_operand = token.is_op();
                    }
                    tokens.push(token);
                }
            }
        }

        ind += 1;
    }

    if tokens
        .last()
        .map_or(false, |tok| tok.is_op() || tok.is_neg())
    {
        Err(UnexpectedEOF)
    } else {
        Ok(tokens)
    }
}

pub fn lex(s: &str) -> Result<Vec<Token>, LexError> {
    lex_ind(s, 0, 0)
}
