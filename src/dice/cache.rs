use super::expression::Expression;
use super::parser::Parser;
use crate::error::EvaluationError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// Parsed expressions keyed by their source text, least recently used first
/// out. One cache may be shared by several evaluators.
pub struct ExpressionCache {
    entries: Mutex<LruCache<String, Arc<Expression>>>,
}

impl ExpressionCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the cached parse of `source`, parsing it on a miss. Parse
    /// failures are not cached.
    pub fn get_or_parse(&self, source: &str) -> Result<Arc<Expression>, EvaluationError> {
        if let Some(hit) = self.lock().get(source) {
            return Ok(Arc::clone(hit));
        }
        let parsed = Arc::new(Parser::new(source).parse()?);
        self.lock().put(source.to_string(), Arc::clone(&parsed));
        Ok(parsed)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.lock().cap()
    }

    // A panic while holding the lock can not leave the LRU half-updated in a
    // way that matters here, so a poisoned lock is still used.
    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, Arc<Expression>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
