use serde::{Deserialize, Serialize};

/// Which evaluator rolls the filled expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RollEngine {
    #[default]
    Standard,
    Legacy,
}

/// How much of the roll is shown in the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnswerFormat {
    /// Expression, label and every die.
    Full,
    #[default]
    WithoutExpression,
    Compact,
    Minimal,
}

/// Dice image set used when the answer is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiceImage {
    None,
    #[default]
    Polyhedral3d,
    PolyhedralAlies,
    Fate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub image: DiceImage,
    pub color: Option<String>,
}

/// A configured button message. Immutable once persisted; configuring again
/// creates a new `Config` under a new id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub template: String,
    /// Channel the roll answer is routed to. `None` answers in place.
    pub answer_target: Option<u64>,
    pub locale: String,
    pub roll_engine: RollEngine,
    pub answer_format: AnswerFormat,
    pub display_style: DisplayStyle,
}

impl Config {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            answer_target: None,
            locale: "en".to_string(),
            roll_engine: RollEngine::default(),
            answer_format: AnswerFormat::default(),
            display_style: DisplayStyle::default(),
        }
    }

    pub fn with_answer_target(mut self, channel_id: u64) -> Self {
        self.answer_target = Some(channel_id);
        self
    }

    pub fn with_answer_format(mut self, format: AnswerFormat) -> Self {
        self.answer_format = format;
        self
    }

    pub fn with_roll_engine(mut self, engine: RollEngine) -> Self {
        self.roll_engine = engine;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}
