//! A reference roll engine: integers, `NdM` pools with optional keep-highest
//! (`kN`) and keep-lowest (`lN`), the four arithmetic operators, parentheses,
//! unary minus and the `''` literal.

use crate::backend::{RollEvaluator, RollResult};
use crate::error::EvaluationError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

mod cache;
mod engine;
mod expression;
mod parser;

pub use cache::ExpressionCache;
pub use expression::{Expression, Keep, MAX_DICE, MAX_SIDES};
pub use parser::MAX_NESTING;

use engine::DiceEngine;

const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Parses a roll expression without caching it.
pub fn parse(source: &str) -> Result<Expression, EvaluationError> {
    parser::Parser::new(source).parse()
}

pub struct DiceEvaluator {
    cache: Arc<ExpressionCache>,
    rng: Mutex<StdRng>,
}

impl DiceEvaluator {
    /// An evaluator with its own cache, seeded from the operating system.
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self::with_cache(Arc::new(ExpressionCache::new(capacity)))
    }

    pub fn with_cache(cache: Arc<ExpressionCache>) -> Self {
        Self {
            cache,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Replaces the random source, e.g. with a seeded one for reproducible rolls.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn cache(&self) -> &Arc<ExpressionCache> {
        &self.cache
    }

    /// Rolls `source` with the given random source.
    pub fn roll_with<R: Rng + ?Sized>(
        &self,
        source: &str,
        rng: &mut R,
    ) -> Result<RollResult, EvaluationError> {
        let expression = self.cache.get_or_parse(source)?;
        let (total, rolls) = DiceEngine::new(source, rng).evaluate(&expression)?;
        let details = if rolls.is_empty() {
            format!("{} = {}", expression, total)
        } else {
            format!("{}: {} = {}", expression, rolls.join("; "), total)
        };
        Ok(RollResult { total, details })
    }
}

impl Default for DiceEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RollEvaluator for DiceEvaluator {
    fn validate(&self, expression: &str) -> Option<String> {
        self.cache
            .get_or_parse(expression)
            .and_then(|parsed| parsed.check())
            .err()
            .map(|e| e.to_string())
    }

    fn roll(&self, expression: &str) -> Result<RollResult, EvaluationError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.roll_with(expression, &mut *rng)
    }
}
