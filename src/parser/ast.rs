use super::lex::*;
use super::CalcError;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug)]
pub enum Expression {
    /// Operands joined by operators of one precedence level, applied left
    /// to right.
    Chain {
        first: Box<Expression>,
        rest: Vec<(Operator, Expression)>,
    },
    Number(f64),
    Paren(Box<Expression>),
    Negation(Box<Expression>),
}

impl Expression {
    fn chain(first: Expression, rest: Vec<(Operator, Expression)>) -> Expression {
        if rest.is_empty() {
            first
        } else {
            Expression::Chain {
                first: first.into(),
                rest,
            }
        }
    }

    pub fn get_value(&self) -> Result<f64, CalcError> {
        use self::Expression::*;

        let value = match self {
            Chain { first, rest } => {
                let mut acc = first.get_value()?;
                for (op, operand) in rest {
                    let right = operand.get_value()?;
                    if *op == Operator::Div && right == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    acc = finite(op.apply(acc, right))?;
                }
                acc
            }
            Number(value) => *value,
            Paren(exp) => exp.get_value()?,
            Negation(exp) => -exp.get_value()?,
        };

        finite(value)
    }

    /// Sign flips cancel in pairs, so only the parity is kept.
    pub fn negate(self, neg: usize) -> Expression {
        if neg % 2 == 1 {
            Expression::Negation(self.into())
        } else {
            self
        }
    }
}

fn finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Incomplete expression")]
    UnexpectedEOF,
    #[error("Unexpected {0}")]
    UnexpectedToken(Cow<'static, str>),
}

/// Operands and the operators between them, always
/// `expressions.len() == operators.len() + 1` once built.
#[derive(Debug)]
struct ContextualizedTokens {
    expressions: Vec<Expression>,
    operators: Vec<Operator>,
}

impl ContextualizedTokens {
    fn from(arr: Vec<Token>) -> Result<ContextualizedTokens, ParseError> {
        let mut expressions = vec![];
        let mut operators = vec![];

        let mut negation_stack = 0;

        for token in arr.into_iter() {
            let wants_operand = expressions.len() == operators.len();

            match token {
                Token::Number(num) if wants_operand => {
                    expressions.push(Expression::Number(num).negate(negation_stack));
                    negation_stack = 0;
                }
                Token::Parentheses(inner) if wants_operand => {
                    expressions.push(Expression::Paren(ast_gen(inner)?.into()).negate(negation_stack));
                    negation_stack = 0;
                }
                Token::Negation if wants_operand => negation_stack += 1,
                Token::Op(op) if !wants_operand => operators.push(op),
                _ => return Err(ParseError::UnexpectedToken(token.get_descriptor())),
            }
        }

        Some(Self {
            expressions,
            operators,
        })
        .filter(|tokens| tokens.expressions.len() == tokens.operators.len() + 1)
        .ok_or(ParseError::UnexpectedEOF)
    }

    /// Collapses every run of `prec` operators into one chain, leaving the
    /// lower-precedence operators between the results. One pass.
    fn fold_level(self, prec: OperatorPrecedence) -> Result<Self, ParseError> {
        let mut operands = self.expressions.into_iter();
        let mut first = operands.next().ok_or(ParseError::UnexpectedEOF)?;
        let mut rest = vec![];

        let mut expressions = vec![];
        let mut operators = vec![];

        for (op, operand) in self.operators.into_iter().zip(operands) {
            if op.precedence() == prec {
                rest.push((op, operand));
            } else {
                let done = std::mem::replace(&mut first, operand);
                expressions.push(Expression::chain(done, std::mem::take(&mut rest)));
                operators.push(op);
            }
        }
        expressions.push(Expression::chain(first, rest));

        Ok(Self {
            expressions,
            operators,
        })
    }

    pub fn into_ast(mut self) -> Result<Expression, ParseError> {
        if self.expressions.len() != self.operators.len() + 1 {
            return Err(ParseError::UnexpectedEOF);
        }

        for prec in OperatorPrecedence::VALUES.iter().rev() {
            self = self.fold_level(*prec)?;
        }

        self.expressions
            .pop()
            .filter(|_| self.expressions.is_empty() && self.operators.is_empty())
            .ok_or(ParseError::UnexpectedEOF)
    }
}

pub fn ast_gen(tokens: Vec<Token>) -> Result<Expression, ParseError> {
    ContextualizedTokens::from(tokens)?.into_ast()
}
