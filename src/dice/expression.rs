use crate::error::EvaluationError;
use std::fmt;

pub const MAX_DICE: u32 = 100;
pub const MAX_SIDES: u32 = 1000;

/// Which dice of a pool count towards its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keep {
    Highest(u32),
    Lowest(u32),
}

/// A parsed roll expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Number(i64),
    /// The `''` literal substituted for skipped placeholders. Counts as zero.
    Empty,
    Dice {
        count: u32,
        sides: u32,
        keep: Option<Keep>,
    },
    Negate(Box<Expression>),

    Sum(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Checks dice bounds and divisions by a literal zero without rolling.
    pub fn check(&self) -> Result<(), EvaluationError> {
        match self {
            Expression::Number(_) | Expression::Empty => Ok(()),
            Expression::Dice { count, sides, keep } => check_dice(*count, *sides, *keep),
            Expression::Negate(v) => v.check(),
            Expression::Divide(l, r) => {
                if r.is_literal_zero() {
                    return Err(EvaluationError::DivisionByZero(self.to_string()));
                }
                l.check()?;
                r.check()
            }
            Expression::Sum(l, r) | Expression::Subtract(l, r) | Expression::Multiply(l, r) => {
                l.check()?;
                r.check()
            }
        }
    }

    fn is_literal_zero(&self) -> bool {
        match self {
            Expression::Number(0) | Expression::Empty => true,
            Expression::Negate(v) => v.is_literal_zero(),
            _ => false,
        }
    }

    /// Binding strength, used to parenthesize only where needed.
    fn precedence(&self) -> u8 {
        match self {
            Expression::Sum(..) | Expression::Subtract(..) => 1,
            Expression::Multiply(..) | Expression::Divide(..) => 2,
            Expression::Negate(_) => 3,
            _ => 4,
        }
    }
}

pub(super) fn check_dice(
    count: u32,
    sides: u32,
    keep: Option<Keep>,
) -> Result<(), EvaluationError> {
    let notation = dice_notation(count, sides, keep);
    let out_of_bounds = |message: String| EvaluationError::DiceOutOfBounds {
        notation: notation.clone(),
        message,
    };
    if count == 0 || count > MAX_DICE {
        return Err(out_of_bounds(format!("between 1 and {} dice can be rolled", MAX_DICE)));
    }
    if sides == 0 || sides > MAX_SIDES {
        return Err(out_of_bounds(format!("a die has between 1 and {} sides", MAX_SIDES)));
    }
    if let Some(Keep::Highest(n) | Keep::Lowest(n)) = keep {
        if n == 0 || n > count {
            return Err(out_of_bounds(format!("can keep between 1 and {} dice", count)));
        }
    }
    Ok(())
}

pub(super) fn dice_notation(count: u32, sides: u32, keep: Option<Keep>) -> String {
    match keep {
        Some(Keep::Highest(n)) => format!("{}d{}k{}", count, sides, n),
        Some(Keep::Lowest(n)) => format!("{}d{}l{}", count, sides, n),
        None => format!("{}d{}", count, sides),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binary = |f: &mut fmt::Formatter<'_>, l: &Expression, op: &str, r: &Expression| {
            let own = self.precedence();
            if l.precedence() < own {
                write!(f, "({})", l)?;
            } else {
                write!(f, "{}", l)?;
            }
            write!(f, " {} ", op)?;
            // Right operands of equal precedence need parentheses: a - (b - c).
            if r.precedence() <= own {
                write!(f, "({})", r)
            } else {
                write!(f, "{}", r)
            }
        };
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Empty => write!(f, "''"),
            Expression::Dice { count, sides, keep } => {
                write!(f, "{}", dice_notation(*count, *sides, *keep))
            }
            Expression::Negate(v) if v.precedence() < self.precedence() => write!(f, "-({})", v),
            Expression::Negate(v) => write!(f, "-{}", v),
            Expression::Sum(l, r) => binary(f, l, "+", r),
            Expression::Subtract(l, r) => binary(f, l, "-", r),
            Expression::Multiply(l, r) => binary(f, l, "*", r),
            Expression::Divide(l, r) => binary(f, l, "/", r),
        }
    }
}
