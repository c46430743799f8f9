//! Transformation protocol
//!
//! A [`Transformation`] asks a validator tree to rebuild itself with some
//! property changed. Every combinator forwards the transformation to the
//! children it owns and rebuilds itself from the results; combinators that
//! recognize the transformation also apply it to themselves.
//!
//! The set of transformations is closed:
//!
//! - [`Strictness`]: toggles whether object/tuple validators reject unknown keys
//! - [`DepthLimit`]: rebinds the depth policy of recursive validators

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Deserialize;

use super::error::ConfigError;

/// A bulk rewrite applied to a whole validator tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// Rewrites object/tuple strictness.
    Strictness(Strictness),
    /// Rewrites recursive depth limiting.
    DepthLimit(DepthLimit),
}

// ============================================================================
// STRICTNESS
// ============================================================================

/// Requested strictness of object and tuple validators.
///
/// The plain variants are ignored by locked validators. The `*Locked`
/// variants set and lock unlocked validators. The `*Unlocked` variants always
/// apply and leave the validator unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "StrictnessRepr")]
pub enum Strictness {
    Strict,
    StrictLocked,
    StrictUnlocked,
    #[default]
    Unstrict,
    UnstrictLocked,
    UnstrictUnlocked,
}

impl Strictness {
    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::StrictLocked => "strict-locked",
            Self::StrictUnlocked => "strict-unlocked",
            Self::Unstrict => "unstrict",
            Self::UnstrictLocked => "unstrict-locked",
            Self::UnstrictUnlocked => "unstrict-unlocked",
        }
    }

    pub fn is_strict(self) -> bool {
        matches!(
            self,
            Self::Strict | Self::StrictLocked | Self::StrictUnlocked
        )
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Self::StrictLocked | Self::UnstrictLocked)
    }

    fn is_unlocking(self) -> bool {
        matches!(self, Self::StrictUnlocked | Self::UnstrictUnlocked)
    }

    /// Resolves this request against the current state of a validator.
    pub fn apply(self, current: StrictState) -> StrictState {
        if self.is_unlocking() || !current.locked {
            StrictState::from(self)
        } else {
            current
        }
    }
}

impl From<bool> for Strictness {
    fn from(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Unstrict }
    }
}

impl FromStr for Strictness {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "strict-locked" => Ok(Self::StrictLocked),
            "strict-unlocked" => Ok(Self::StrictUnlocked),
            "unstrict" => Ok(Self::Unstrict),
            "unstrict-locked" => Ok(Self::UnstrictLocked),
            "unstrict-unlocked" => Ok(Self::UnstrictUnlocked),
            other => Err(ConfigError::InvalidStrictness(other.to_owned())),
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrictnessRepr {
    Flag(bool),
    Name(String),
}

impl TryFrom<StrictnessRepr> for Strictness {
    type Error = ConfigError;

    fn try_from(repr: StrictnessRepr) -> Result<Self, Self::Error> {
        match repr {
            StrictnessRepr::Flag(strict) => Ok(Self::from(strict)),
            StrictnessRepr::Name(name) => name.parse(),
        }
    }
}

/// Resolved strictness of one object/tuple validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrictState {
    pub strict: bool,
    pub locked: bool,
}

impl From<Strictness> for StrictState {
    fn from(strictness: Strictness) -> Self {
        Self {
            strict: strictness.is_strict(),
            locked: strictness.is_locked(),
        }
    }
}

impl StrictState {
    /// The same strictness, locked.
    pub fn locked(self) -> Self {
        Self {
            locked: true,
            ..self
        }
    }

    /// The same strictness, unlocked.
    pub fn unlocked(self) -> Self {
        Self {
            locked: false,
            ..self
        }
    }
}

// ============================================================================
// DEPTH LIMIT
// ============================================================================

/// Depth policy of a recursive validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthLimit {
    /// Recurse without bound.
    #[default]
    Unlimited,
    /// Reject once the shared depth reaches the limit.
    Max(NonZeroUsize),
    /// Accept without descending once the shared depth reaches the limit.
    Skip(NonZeroUsize),
}

impl DepthLimit {
    /// A rejecting limit. Zero means no limit.
    pub fn max(depth: usize) -> Self {
        NonZeroUsize::new(depth).map_or(Self::Unlimited, Self::Max)
    }

    /// A pruning limit. Zero means no limit.
    pub fn skip(depth: usize) -> Self {
        NonZeroUsize::new(depth).map_or(Self::Unlimited, Self::Skip)
    }
}

/// Deserializable recursion options.
///
/// ```rust
/// use shapeguard::foundation::{DepthLimit, RecursionOptions};
///
/// let options: RecursionOptions = serde_json::from_str(r#"{ "maxDepth": 4 }"#).unwrap();
/// assert_eq!(options.limit().unwrap(), DepthLimit::max(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecursionOptions {
    /// Reject once this depth is reached.
    pub max_depth: Option<i64>,
    /// Accept without descending once this depth is reached.
    pub skip_depth: Option<i64>,
}

impl RecursionOptions {
    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the options into a [`DepthLimit`].
    pub fn limit(&self) -> Result<DepthLimit, ConfigError> {
        let max = checked_depth("maxDepth", self.max_depth)?;
        let skip = checked_depth("skipDepth", self.skip_depth)?;

        match (max, skip) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingDepthLimits),
            (Some(depth), None) => Ok(DepthLimit::max(depth)),
            (None, Some(depth)) => Ok(DepthLimit::skip(depth)),
            (None, None) => Ok(DepthLimit::Unlimited),
        }
    }
}

impl TryFrom<RecursionOptions> for DepthLimit {
    type Error = ConfigError;

    fn try_from(options: RecursionOptions) -> Result<Self, Self::Error> {
        options.limit()
    }
}

fn checked_depth(option: &'static str, value: Option<i64>) -> Result<Option<usize>, ConfigError> {
    match value {
        None => Ok(None),
        Some(value) if value < 0 => Err(ConfigError::NegativeDepth { option, value }),
        Some(value) => Ok(Some(usize::try_from(value).unwrap_or(usize::MAX))),
    }
}

/// Deserializable object validator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectOptions {
    #[serde(default)]
    pub strict: Strictness,
}

impl ObjectOptions {
    pub fn strict() -> Self {
        Self {
            strict: Strictness::Strict,
        }
    }

    pub fn unstrict() -> Self {
        Self {
            strict: Strictness::Unstrict,
        }
    }
}

impl From<Strictness> for ObjectOptions {
    fn from(strict: Strictness) -> Self {
        Self { strict }
    }
}

impl From<bool> for ObjectOptions {
    fn from(strict: bool) -> Self {
        Self {
            strict: strict.into(),
        }
    }
}
