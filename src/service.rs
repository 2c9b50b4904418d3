use crate::backend::{RollEvaluator, RollResult};
use crate::codec;
use crate::config::{Config, Limits, RollEngine};
use crate::dice::DiceEvaluator;
use crate::error::{CodecError, ConfigError, ServiceError};
use crate::flow::{ClickOutcome, FlowState, ParameterFlow, Prompt};
use crate::store::{ConfigId, Persistence};
use crate::validator::Validator;
use ahash::AHashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// A finished roll, ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollAnswer {
    /// Channel to post to. `None` answers in the channel of the message.
    pub target: Option<u64>,
    pub user: String,
    pub expression: String,
    pub label: Option<String>,
    pub result: RollResult,
}

/// Everything the platform adapter needs after a click: the prompt that
/// replaces the message, and the roll to post if the click completed the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickResponse {
    pub outcome: ClickOutcome,
    pub prompt: Prompt,
    pub answer: Option<RollAnswer>,
}

/// Ties configuration, persistence and roll engines together.
pub struct ParameterService {
    store: Arc<dyn Persistence>,
    engines: AHashMap<RollEngine, Arc<dyn RollEvaluator>>,
    limits: Limits,
}

pub struct ServiceBuilder {
    store: Arc<dyn Persistence>,
    engines: AHashMap<RollEngine, Arc<dyn RollEvaluator>>,
    limits: Limits,
}

impl ServiceBuilder {
    /// A builder with the dice evaluator registered as the standard engine.
    pub fn new(store: Arc<dyn Persistence>) -> Self {
        let mut engines: AHashMap<RollEngine, Arc<dyn RollEvaluator>> = AHashMap::new();
        engines.insert(RollEngine::Standard, Arc::new(DiceEvaluator::new()));
        Self {
            store,
            engines,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Registers `evaluator` for `engine`, replacing any earlier registration.
    pub fn with_engine(mut self, engine: RollEngine, evaluator: Arc<dyn RollEvaluator>) -> Self {
        self.engines.insert(engine, evaluator);
        self
    }

    pub fn build(self) -> ParameterService {
        ParameterService {
            store: self.store,
            engines: self.engines,
            limits: self.limits,
        }
    }
}

impl ParameterService {
    pub fn builder(store: Arc<dyn Persistence>) -> ServiceBuilder {
        ServiceBuilder::new(store)
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Validates and persists `config`, returning its id and the initial
    /// prompt. Nothing is persisted if validation fails.
    pub fn configure(&self, config: Config) -> Result<(ConfigId, Prompt), ServiceError> {
        let engine = self.engine(&config)?;
        Validator::new(self.limits.clone()).validate(&config, engine.as_ref())?;

        let flow = ParameterFlow::new(config, &self.limits)?;
        let id = Uuid::new_v4();
        self.store.save_config(id, &flow.config)?;
        debug!("Stored configuration {} for '{}'", id, flow.config.template);
        Ok((id, flow.render_prompt(&FlowState::default())))
    }

    /// Handles a click of `user` on the button `wire_id` of message
    /// `message_id`.
    ///
    /// The selections are taken from the button id and must replay through
    /// the offered options, the lock owner comes from the persisted flow state. Saving the new state is best effort: a failure is
    /// logged and the click still succeeds.
    pub fn handle_click(
        &self,
        config_id: ConfigId,
        message_id: u64,
        wire_id: &str,
        user: &str,
    ) -> Result<ClickResponse, ServiceError> {
        let config = self
            .store
            .load_config(config_id)?
            .ok_or(ServiceError::ConfigNotFound(config_id))?;
        let wire = codec::decode(wire_id)?;
        if wire.command != self.limits.command_name {
            return Err(CodecError::CommandMismatch {
                expected: self.limits.command_name.clone(),
                found: wire.command,
            }
            .into());
        }

        let locked_user_name = match self.store.load_flow_state(message_id) {
            Ok(state) => state.and_then(|s| s.locked_user_name),
            Err(e) => {
                warn!("Could not load flow state of message {}: {}", message_id, e);
                None
            }
        };
        let state = FlowState {
            selections: wire.selections,
            locked_user_name,
        };

        let flow = ParameterFlow::new(config, &self.limits)?;
        let outcome = flow.on_click(&state, &wire.click_value, user);
        let (prompt, answer) = match &outcome {
            ClickOutcome::Continue(next) => {
                self.persist(message_id, Some(next));
                (flow.render_prompt(next), None)
            }
            ClickOutcome::Cleared(next) => {
                self.persist(message_id, None);
                (flow.render_prompt(next), None)
            }
            ClickOutcome::Complete { roll, .. } => {
                let result = self.engine(&flow.config)?.roll(&roll.expression)?;
                self.persist(message_id, None);
                let answer = RollAnswer {
                    target: wire.routing_target.or(flow.config.answer_target),
                    user: user.to_string(),
                    expression: roll.expression.clone(),
                    label: roll.label.clone(),
                    result,
                };
                (flow.render_prompt(&FlowState::default()), Some(answer))
            }
            ClickOutcome::Ignored { state, .. } => {
                let shown = match flow.compiled.check_selections(&state.selections) {
                    Ok(()) => flow.render_prompt(state),
                    Err(_) => flow.render_prompt(&FlowState::default()),
                };
                (shown, None)
            }
        };

        Ok(ClickResponse {
            outcome,
            prompt,
            answer,
        })
    }

    fn engine(&self, config: &Config) -> Result<Arc<dyn RollEvaluator>, ConfigError> {
        self.engines
            .get(&config.roll_engine)
            .cloned()
            .ok_or(ConfigError::UnknownEngine(config.roll_engine))
    }

    fn persist(&self, message_id: u64, state: Option<&FlowState>) {
        let result = match state {
            Some(state) => self.store.save_flow_state(message_id, state),
            None => self.store.delete_flow_state(message_id),
        };
        if let Err(e) = result {
            warn!("Could not persist flow state of message {}: {}", message_id, e);
        }
    }
}
