use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tokenc operations
#[derive(Error, Diagnostic, Debug)]
pub enum TokenError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tokenc::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tokenc::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tokenc::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(tokenc::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Duplicate token path: {path}")]
    #[diagnostic(
        code(tokenc::duplicate_key),
        help("Two declarations flatten to the same dotted path; rename one of them")
    )]
    DuplicateKey { path: String },

    #[error("Unresolved alias at {path}: custom property {property} is not defined")]
    #[diagnostic(
        code(tokenc::unresolved_alias),
        help("Define the property in the property table or give the reference a fallback: var(--name, value)")
    )]
    UnresolvedAlias { path: String, property: String },

    #[error("Cyclic alias at {path}: {chain}")]
    #[diagnostic(
        code(tokenc::cyclic_alias),
        help("Break the cycle so the chain ends in a literal value")
    )]
    CyclicAlias { path: String, chain: String },

    #[error("Animation '{animation}' references undefined keyframes '{keyframes}'")]
    #[diagnostic(
        code(tokenc::missing_keyframe),
        help("Declare the keyframes under theme.keyframes or fix the animation name")
    )]
    MissingKeyframe { animation: String, keyframes: String },

    #[error("Malformed phase '{phase}' in keyframes '{keyframes}': {reason}")]
    #[diagnostic(
        code(tokenc::malformed_phase),
        help("Phases are `from`, `to` or percentages between 0% and 100%, in ascending order")
    )]
    MalformedPhase {
        keyframes: String,
        phase: String,
        reason: String,
    },

    #[error("Unknown token path: {path}")]
    #[diagnostic(code(tokenc::unknown_token))]
    UnknownToken {
        path: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(tokenc::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(tokenc::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TokenError>;

impl TokenError {
    /// Shorthand for a parse error without help text.
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        TokenError::Parse {
            message: message.into(),
            help: None,
        }
    }
}
