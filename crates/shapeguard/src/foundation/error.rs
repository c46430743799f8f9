//! Error types
//!
//! Validation failures are never errors: they surface as a `false` verdict
//! plus [`Rejection`](super::Rejection)s. The types here cover construction
//! misuse ([`ConfigError`]) and assertion helpers ([`AssertionError`]).

use super::rejection::Rejections;

/// Programmer misuse detected while building a validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A depth option was negative.
    #[error("invalid recursion `{option}`: [{value}] must not be negative")]
    NegativeDepth { option: &'static str, value: i64 },

    /// `maxDepth` and `skipDepth` were both set.
    #[error("recursion `maxDepth` cannot be combined with `skipDepth`")]
    ConflictingDepthLimits,

    /// An unknown strictness name.
    #[error("invalid strictness `{0}`")]
    InvalidStrictness(String),

    /// Options could not be deserialized.
    #[error("invalid options: {0}")]
    Options(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Options(error.to_string())
    }
}

/// Raised by assertions built from a validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value {value} is not of type {expected}\n{rejections}")]
pub struct AssertionError {
    /// Rendered form of the rejected value.
    pub value: String,
    /// Descriptor of the asserting validator.
    pub expected: String,
    /// Every rejection collected while validating.
    pub rejections: Rejections,
}

impl AssertionError {
    /// Number of collected rejections.
    pub fn rejection_count(&self) -> usize {
        self.rejections.len()
    }
}
