//! # Sentaku - Staged Parameter Selection for Roll Expressions
//!
//! **Sentaku** turns a templated roll expression such as
//! `1d20 + {Modifier:-2<=>5} + {Bonus:0@None/2@Bless/!1d4@Guidance}` into a
//! button-driven selection flow. Each placeholder is asked for in turn, one
//! button per option, and once every placeholder is resolved the filled
//! expression is handed to a roll engine.
//!
//! ## Core Workflow
//!
//! 1.  **Configure**: A `Config` carries the template and how the answer is
//!     shown. `validate_config` explores the selection tree before anything is
//!     persisted, so a configuration that could produce an oversized button id
//!     or an expression the engine rejects is refused up front.
//! 2.  **Render**: `render_prompt` produces the message text and its button
//!     rows for a `FlowState`. Every button id encodes the selections made so
//!     far, so a click can be handled without looking the message up.
//! 3.  **Click**: `on_click` applies a click and returns the next state, or the
//!     finished `RollRequest`.
//!
//! `ParameterService` wires these steps to a `Persistence` backend and a set of
//! roll engines.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sentaku::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = Config::new("1d20 + {Modifier:-2<=>5}");
//!     validate_config(&config, &DiceEvaluator::new())?;
//!
//!     let flow = ParameterFlow::new(config, &Limits::default())?;
//!     let prompt = flow.render_prompt(&FlowState::default());
//!     println!("{}", prompt.text);
//!
//!     if let ClickOutcome::Complete { roll, .. } =
//!         flow.on_click(&FlowState::default(), "id6", "alice")
//!     {
//!         println!("Rolling {}", roll.expression);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod codec;
pub mod compiler;
pub mod config;
pub mod dice;
pub mod error;
pub mod flow;
pub mod prelude;
pub mod service;
pub mod store;
pub mod template;
pub mod validator;
