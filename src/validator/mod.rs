//! Configuration-time exploration of the selection tree.
//!
//! Exhausting every path is exponential in the number of placeholders, so each
//! node only follows its corner-case options (see [`corner`]). Every visited
//! node checks the ids of all buttons it would render and every complete leaf
//! is checked by the roll engine. Sibling branches run on the rayon pool; the
//! reported failure is always the first one in option order.

use crate::backend::RollEvaluator;
use crate::codec::{self, RESERVED_CHARACTERS};
use crate::compiler::{CompiledFlow, FlowCompiler};
use crate::config::{Config, Limits};
use crate::error::ConfigError;
use crate::flow::{FlowState, FlowStatus};
use itertools::Itertools;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, trace};

mod corner;

use corner::corner_cases;

/// Checks `config` with the default limits.
pub fn validate_config(config: &Config, evaluator: &dyn RollEvaluator) -> Result<(), ConfigError> {
    Validator::new(Limits::default()).validate(config, evaluator)
}

pub struct Validator {
    limits: Limits,
}

impl Validator {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Runs every configuration check and the bounded search. Validation is
    /// deterministic: the same configuration always yields the same result.
    pub fn validate(
        &self,
        config: &Config,
        evaluator: &dyn RollEvaluator,
    ) -> Result<(), ConfigError> {
        let started = Instant::now();

        if let Some((position, c)) = config
            .template
            .char_indices()
            .find(|(_, c)| RESERVED_CHARACTERS.contains(c))
        {
            return Err(ConfigError::MalformedTemplate {
                position,
                reason: format!("reserved character {:?} is not allowed", c),
            });
        }

        let flow = FlowCompiler::compile_with(&config.template, &self.limits)?;
        if flow.is_empty() {
            return Err(ConfigError::MalformedTemplate {
                position: 0,
                reason: "template has no placeholders".to_string(),
            });
        }

        if self.exceeds_depth(&flow) {
            return Err(ConfigError::TooManyPlaceholders {
                max: self.limits.max_placeholders,
            });
        }
        let paths = self.path_count(&flow);
        if paths > self.limits.max_explored_paths {
            return Err(ConfigError::TooManyPaths {
                paths,
                limit: self.limits.max_explored_paths,
            });
        }

        let search = Search {
            flow: &flow,
            config,
            evaluator,
            limits: &self.limits,
        };
        let result = search.visit(&FlowState::default());
        debug!(
            "Validated '{}' over at most {} paths in {:?}: {}",
            config.template,
            paths,
            started.elapsed(),
            if result.is_ok() { "valid" } else { "invalid" }
        );
        result
    }

    /// Whether a path through explored options can need more selections than
    /// allowed. Only a direct roll ends a path early.
    fn exceeds_depth(&self, flow: &CompiledFlow) -> bool {
        let max = self.limits.max_placeholders;
        flow.len() > max
            && flow
                .parameters
                .iter()
                .take(max)
                .all(|p| corner_cases(&p.options).iter().any(|o| !o.direct_roll))
    }

    /// Upper bound of the leaves the search can reach. Placeholders past the
    /// depth bound are never expanded, so they do not count.
    fn path_count(&self, flow: &CompiledFlow) -> usize {
        flow.parameters
            .iter()
            .take(self.limits.max_placeholders)
            .map(|p| corner_cases(&p.options).len())
            .fold(1usize, |acc, n| acc.saturating_mul(n))
    }
}

struct Search<'a> {
    flow: &'a CompiledFlow,
    config: &'a Config,
    evaluator: &'a dyn RollEvaluator,
    limits: &'a Limits,
}

impl Search<'_> {
    fn visit(&self, state: &FlowState) -> Result<(), ConfigError> {
        if self.flow.status(state) == FlowStatus::Complete {
            return self.check_expression(state);
        }
        let Some(parameter) = self.flow.next_parameter(state) else {
            return Ok(());
        };
        if state.selections.len() >= self.limits.max_placeholders {
            return Err(ConfigError::TooManyPlaceholders {
                max: self.limits.max_placeholders,
            });
        }

        if let Some(value) = parameter.options.iter().map(|o| &o.value).duplicates().next() {
            return Err(ConfigError::DuplicateOption {
                placeholder: parameter.placeholder.expression.clone(),
                value: value.clone(),
            });
        }
        self.check_identifiers(state)?;

        let branches = corner_cases(&parameter.options);
        trace!(
            "Exploring {} of {} options for {} after {:?}",
            branches.len(),
            parameter.options.len(),
            parameter.placeholder.expression,
            state.selections
        );
        let failure = branches.par_iter().find_map_first(|option| {
            let next = match self.flow.advance(state, &option.id) {
                Ok(next) => next,
                Err(e) => {
                    return Some(ConfigError::MalformedTemplate {
                        position: parameter.placeholder.start,
                        reason: e.to_string(),
                    });
                }
            };
            self.visit(&next).err()
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn check_identifiers(&self, state: &FlowState) -> Result<(), ConfigError> {
        let limit = self.limits.max_identifier_length;
        for button in self.flow.buttons(state, self.config.answer_target) {
            let length = codec::identifier_length(&button.id);
            if length > limit {
                return Err(ConfigError::IdentifierTooLong {
                    wire_id: button.id,
                    length,
                    limit,
                    overage: length - limit,
                });
            }
        }
        Ok(())
    }

    fn check_expression(&self, state: &FlowState) -> Result<(), ConfigError> {
        let Some(request) = self.flow.roll_request(state, self.config.answer_format) else {
            return Ok(());
        };
        match self.evaluator.validate(&request.expression) {
            Some(message) => Err(ConfigError::ExpressionInvalid {
                expression: request.expression,
                message,
            }),
            None => Ok(()),
        }
    }
}
