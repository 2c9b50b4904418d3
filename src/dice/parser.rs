use super::expression::{Expression, Keep};
use crate::error::EvaluationError;

/// Deepest allowed nesting of parentheses and unary minus.
pub const MAX_NESTING: usize = 64;

/// Recursive-descent parser for roll expressions.
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := unary (('*' | '/') unary)*
/// unary      := '-' unary | primary
/// primary    := dice | number | "''" | '(' expression ')'
/// dice       := number? ('d' | 'D') number (('k' | 'l') number)?
/// ```
pub(super) struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            position: 0,
            depth: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<Expression, EvaluationError> {
        let expression = self.expression()?;
        self.skip_whitespace();
        match self.peek() {
            None => Ok(expression),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn expression(&mut self) -> Result<Expression, EvaluationError> {
        let mut left = self.term()?;
        loop {
            self.skip_whitespace();
            left = match self.peek() {
                Some('+') => {
                    self.position += 1;
                    Expression::Sum(Box::new(left), Box::new(self.term()?))
                }
                Some('-') => {
                    self.position += 1;
                    Expression::Subtract(Box::new(left), Box::new(self.term()?))
                }
                _ => return Ok(left),
            };
        }
    }

    fn term(&mut self) -> Result<Expression, EvaluationError> {
        let mut left = self.unary()?;
        loop {
            self.skip_whitespace();
            left = match self.peek() {
                Some('*') => {
                    self.position += 1;
                    Expression::Multiply(Box::new(left), Box::new(self.unary()?))
                }
                Some('/') => {
                    self.position += 1;
                    Expression::Divide(Box::new(left), Box::new(self.unary()?))
                }
                _ => return Ok(left),
            };
        }
    }

    fn unary(&mut self) -> Result<Expression, EvaluationError> {
        self.skip_whitespace();
        if self.peek() == Some('-') {
            self.position += 1;
            return Ok(Expression::Negate(Box::new(self.nested(Self::unary)?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expression, EvaluationError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.position += 1;
                let inner = self.nested(Self::expression)?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(inner)
            }
            Some('\'') => {
                self.expect('\'')?;
                self.expect('\'')?;
                Ok(Expression::Empty)
            }
            Some('d' | 'D') => self.dice(1),
            Some(c) if c.is_ascii_digit() => {
                let number = self.number()?;
                if matches!(self.peek(), Some('d' | 'D')) {
                    let count = self.dice_count(number)?;
                    self.dice(count)
                } else {
                    Ok(Expression::Number(number))
                }
            }
            Some(_) => Err(self.unexpected()),
            None => Err(EvaluationError::UnexpectedEnd(self.source.to_string())),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Expression, EvaluationError>,
    ) -> Result<Expression, EvaluationError> {
        if self.depth >= MAX_NESTING {
            return Err(EvaluationError::NestingTooDeep {
                expression: self.source.to_string(),
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses `dM[kN|lN]` after the dice count.
    fn dice(&mut self, count: u32) -> Result<Expression, EvaluationError> {
        self.position += 1;
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.unexpected());
        }
        let sides = self.number()?;
        let sides = self.dice_count(sides)?;
        let keep = match self.peek() {
            Some('k' | 'K') => {
                self.position += 1;
                Some(Keep::Highest(self.keep_count()?))
            }
            Some('l' | 'L') => {
                self.position += 1;
                Some(Keep::Lowest(self.keep_count()?))
            }
            _ => None,
        };
        Ok(Expression::Dice { count, sides, keep })
    }

    fn keep_count(&mut self) -> Result<u32, EvaluationError> {
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.unexpected());
        }
        let n = self.number()?;
        self.dice_count(n)
    }

    fn dice_count(&self, n: i64) -> Result<u32, EvaluationError> {
        u32::try_from(n).map_err(|_| EvaluationError::Overflow(self.source.to_string()))
    }

    fn number(&mut self) -> Result<i64, EvaluationError> {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
        }
        let digits: String = self.chars[start..self.position].iter().collect();
        digits
            .parse()
            .map_err(|_| EvaluationError::Overflow(self.source.to_string()))
    }

    fn expect(&mut self, expected: char) -> Result<(), EvaluationError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.position += 1;
                Ok(())
            }
            Some(_) => Err(self.unexpected()),
            None => Err(EvaluationError::UnexpectedEnd(self.source.to_string())),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn unexpected(&self) -> EvaluationError {
        match self.peek() {
            Some(c) => EvaluationError::UnexpectedToken {
                expression: self.source.to_string(),
                position: self.position,
                found: c.to_string(),
            },
            None => EvaluationError::UnexpectedEnd(self.source.to_string()),
        }
    }
}
