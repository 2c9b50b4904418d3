//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the sentaku crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use sentaku::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let service = ParameterService::builder(std::sync::Arc::new(MemoryStore::new())).build();
//! let (config_id, prompt) = service.configure(Config::new("{Dice:4@D4/6@D6/8@D8}"))?;
//!
//! let clicked = prompt.buttons().next().map(|b| b.id.clone()).unwrap_or_default();
//! let response = service.handle_click(config_id, 1, &clicked, "alice")?;
//! println!("{:?}", response.answer);
//! # Ok(())
//! # }
//! ```

// Configuration
pub use crate::config::{AnswerFormat, Config, Limits, RollEngine};

// Compilation and the selection flow
pub use crate::compiler::{CompiledFlow, FlowCompiler, Parameter, ParameterOption};
pub use crate::flow::{ClickOutcome, FlowState, FlowStatus, ParameterFlow, Prompt, RollRequest};
pub use crate::template::{Placeholder, Template};

// Validation and rolling
pub use crate::backend::{RollEvaluator, RollResult};
pub use crate::dice::DiceEvaluator;
pub use crate::validator::{Validator, validate_config};

// Persistence and the service facade
pub use crate::service::{ClickResponse, ParameterService, RollAnswer};
pub use crate::store::{ConfigId, FileStore, MemoryStore, Persistence};

// Error types
pub use crate::error::{ClickError, CodecError, ConfigError, ServiceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
