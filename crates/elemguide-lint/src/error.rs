//! Error types for extraction, rule registration and rule execution.

use thiserror::Error;

/// A definition could not be turned into a [`crate::ComponentDescriptor`].
///
/// Fatal for that one component only; the rest of a run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("MalformedDefinition: {tag}: {reason}")]
    MalformedDefinition {
        /// Tag name as written, or a placeholder when it is missing.
        tag: String,
        /// What made the definition unusable.
        reason: String,
        /// File the definition was read from.
        origin: Option<String>,
    },
}

impl ExtractError {
    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        ExtractError::MalformedDefinition {
            tag: tag.into(),
            reason: reason.into(),
            origin: None,
        }
    }

    /// Attaches the file the definition came from.
    pub fn with_origin(self, origin: Option<String>) -> Self {
        match self {
            ExtractError::MalformedDefinition { tag, reason, .. } => {
                ExtractError::MalformedDefinition {
                    tag,
                    reason,
                    origin,
                }
            }
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ExtractError::MalformedDefinition { tag, .. } => tag,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            ExtractError::MalformedDefinition { reason, .. } => reason,
        }
    }

    pub fn origin(&self) -> Option<&str> {
        match self {
            ExtractError::MalformedDefinition { origin, .. } => origin.as_deref(),
        }
    }
}

/// A source document could not be parsed at all.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported source file: {0}")]
    Unsupported(String),
}

/// Errors raised while building a rule registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("DuplicateRuleId: rule '{0}' is already registered")]
    DuplicateRuleId(String),

    #[error("unknown rule id '{0}'")]
    UnknownRuleId(String),
}

/// A rule predicate failed to produce a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RuleError(pub String);

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        RuleError(message.into())
    }
}
