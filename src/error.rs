use thiserror::Error;

/// Errors raised while a configuration is checked, before anything is persisted
/// or rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Template is malformed at position {position}: {reason}")]
    MalformedTemplate { position: usize, reason: String },

    #[error("Placeholder '{placeholder}' does not offer a single option")]
    EmptyOptionSet { placeholder: String },

    #[error("Placeholder '{placeholder}' offers the value '{value}' more than once")]
    DuplicateOption { placeholder: String, value: String },

    #[error(
        "Button id '{wire_id}' is {length} characters long, {overage} more than the limit of {limit}"
    )]
    IdentifierTooLong {
        wire_id: String,
        length: usize,
        limit: usize,
        overage: usize,
    },

    #[error("A selection path needs more than {max} placeholders")]
    TooManyPlaceholders { max: usize },

    #[error("Expression '{expression}' is invalid: {message}")]
    ExpressionInvalid { expression: String, message: String },

    #[error("The template expands to {paths} selection paths, more than the limit of {limit}")]
    TooManyPaths { paths: usize, limit: usize },

    #[error("No roll engine is registered for '{0:?}'")]
    UnknownEngine(crate::config::RollEngine),
}

/// Errors raised while handling a single button click. These never change the
/// flow state; the click is ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClickError {
    #[error("Option '{option_id}' is not offered for placeholder '{placeholder}'")]
    UnknownOption {
        option_id: String,
        placeholder: String,
    },

    #[error("The selection is locked for '{owner}', ignoring the click of '{user}'")]
    LockedByOtherUser { owner: String, user: String },

    #[error("The flow is already complete")]
    AlreadyComplete,
}

/// Errors raised while decoding a button id received from the platform.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Button id '{wire_id}' has {found} fields, expected 3 or 4")]
    FieldCount { wire_id: String, found: usize },

    #[error("Button id routing target '{0}' is not a numeric id")]
    InvalidRoutingTarget(String),

    #[error("Button id belongs to command '{found}', expected '{expected}'")]
    CommandMismatch { expected: String, found: String },
}

/// Errors raised by the roll evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Unexpected '{found}' at position {position} in '{expression}'")]
    UnexpectedToken {
        expression: String,
        position: usize,
        found: String,
    },

    #[error("Unexpected end of expression '{0}'")]
    UnexpectedEnd(String),

    #[error("Dice '{notation}' are out of bounds: {message}")]
    DiceOutOfBounds { notation: String, message: String },

    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    #[error("Arithmetic overflow in '{0}'")]
    Overflow(String),

    #[error("Expression '{expression}' nests deeper than {limit} levels")]
    NestingTooDeep { expression: String, limit: usize },
}

/// Errors raised by a persistence backend.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Store lock was poisoned")]
    Poisoned,
}

/// Errors surfaced by the `ParameterService` facade.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("No configuration stored under id '{0}'")]
    ConfigNotFound(uuid::Uuid),
}
