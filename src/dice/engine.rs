use super::expression::{Expression, Keep, check_dice, dice_notation};
use crate::error::EvaluationError;
use rand::Rng;

/// Walks a parsed expression, rolling every dice pool it meets and recording
/// each pool's faces.
pub(super) struct DiceEngine<'a, R: Rng + ?Sized> {
    source: &'a str,
    rng: &'a mut R,
    rolls: Vec<String>,
}

impl<'a, R: Rng + ?Sized> DiceEngine<'a, R> {
    pub(super) fn new(source: &'a str, rng: &'a mut R) -> Self {
        Self {
            source,
            rng,
            rolls: Vec::new(),
        }
    }

    /// Returns the total and one line per rolled pool.
    pub(super) fn evaluate(
        mut self,
        expression: &Expression,
    ) -> Result<(i64, Vec<String>), EvaluationError> {
        let total = self.evaluate_recursive(expression)?;
        Ok((total, self.rolls))
    }

    fn evaluate_recursive(&mut self, expr: &Expression) -> Result<i64, EvaluationError> {
        match expr {
            Expression::Number(n) => Ok(*n),
            Expression::Empty => Ok(0),
            Expression::Dice { count, sides, keep } => self.roll_pool(*count, *sides, *keep),
            Expression::Negate(v) => {
                let v = self.evaluate_recursive(v)?;
                v.checked_neg().ok_or_else(|| self.overflow())
            }
            Expression::Sum(l, r) => self.eval_binary(l, r, i64::checked_add),
            Expression::Subtract(l, r) => self.eval_binary(l, r, i64::checked_sub),
            Expression::Multiply(l, r) => self.eval_binary(l, r, i64::checked_mul),
            Expression::Divide(l, r) => {
                let left = self.evaluate_recursive(l)?;
                let right = self.evaluate_recursive(r)?;
                if right == 0 {
                    return Err(EvaluationError::DivisionByZero(self.source.to_string()));
                }
                left.checked_div(right).ok_or_else(|| self.overflow())
            }
        }
    }

    fn eval_binary(
        &mut self,
        l: &Expression,
        r: &Expression,
        op: fn(i64, i64) -> Option<i64>,
    ) -> Result<i64, EvaluationError> {
        let left = self.evaluate_recursive(l)?;
        let right = self.evaluate_recursive(r)?;
        op(left, right).ok_or_else(|| self.overflow())
    }

    fn roll_pool(
        &mut self,
        count: u32,
        sides: u32,
        keep: Option<Keep>,
    ) -> Result<i64, EvaluationError> {
        check_dice(count, sides, keep)?;
        let faces: Vec<u32> = (0..count)
            .map(|_| self.rng.random_range(1..=sides))
            .collect();

        // Indices of the kept dice, in roll order.
        let mut order: Vec<usize> = (0..faces.len()).collect();
        let kept: Vec<usize> = match keep {
            Some(Keep::Highest(n)) => {
                order.sort_by(|a, b| faces[*b].cmp(&faces[*a]));
                order.truncate(n as usize);
                order.sort_unstable();
                order
            }
            Some(Keep::Lowest(n)) => {
                order.sort_by(|a, b| faces[*a].cmp(&faces[*b]));
                order.truncate(n as usize);
                order.sort_unstable();
                order
            }
            None => order,
        };

        let total: i64 = kept.iter().map(|i| i64::from(faces[*i])).sum();
        let shown: Vec<String> = faces
            .iter()
            .enumerate()
            .map(|(i, face)| {
                if kept.binary_search(&i).is_ok() {
                    face.to_string()
                } else {
                    format!("~{}~", face)
                }
            })
            .collect();
        self.rolls.push(format!(
            "{} [{}]",
            dice_notation(count, sides, keep),
            shown.join(", ")
        ));
        Ok(total)
    }

    fn overflow(&self) -> EvaluationError {
        EvaluationError::Overflow(self.source.to_string())
    }
}
