//! Rejections and rejection sinks
//!
//! A [`Rejection`] explains one validation failure. Validators report
//! rejections to a [`RejectionSink`]: zero times on success, at least once
//! on failure. Paths are appended while the call stack unwinds, so they read
//! from the innermost failing property outwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Path of a rejection, innermost key first.
pub type Path = SmallVec<[PathKey; 4]>;

// ============================================================================
// PATH KEY
// ============================================================================

/// One segment of a rejection path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathKey {
    /// Array position, or an integer-like object key.
    Index(usize),
    /// Object key.
    Key(String),
}

impl PathKey {
    /// Converts an object key, turning canonical non-negative integers into
    /// [`PathKey::Index`].
    pub fn from_key(key: &str) -> Self {
        let canonical = key == "0" || (!key.starts_with('0') && !key.starts_with('+'));
        match key.parse::<usize>() {
            Ok(index) if canonical => Self::Index(index),
            _ => Self::Key(key.to_owned()),
        }
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathKey {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

// ============================================================================
// REJECTION
// ============================================================================

/// A structured explanation of one validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// Failing property path, innermost first.
    pub path: Path,
    /// Human-readable explanation.
    pub reason: String,
    /// Descriptor of the validator that produced the rejection.
    pub property_type: String,
}

impl Rejection {
    /// Creates a rejection with an empty path.
    pub fn new(reason: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            path: Path::new(),
            reason: reason.into(),
            property_type: property_type.into(),
        }
    }

    /// Appends an outer path segment.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, key: impl Into<PathKey>) -> Self {
        self.path.push(key.into());
        self
    }

    /// Renders the path outermost-first, e.g. `items.2.name`.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .rev()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} (expected {})", self.reason, self.property_type)
        } else {
            write!(
                f,
                "{}: {} (expected {})",
                self.dotted_path(),
                self.reason,
                self.property_type
            )
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Write-only receiver of rejections.
pub trait RejectionSink {
    /// Receives one rejection.
    fn reject(&mut self, rejection: Rejection);

    /// `false` when rejections are discarded, letting validators skip
    /// building reasons. Never affects a verdict.
    fn is_collecting(&self) -> bool {
        true
    }
}

impl<F> RejectionSink for F
where
    F: FnMut(Rejection),
{
    fn reject(&mut self, rejection: Rejection) {
        self(rejection);
    }
}

/// Sink used when the caller did not ask for rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl RejectionSink for Discard {
    fn reject(&mut self, _rejection: Rejection) {}

    fn is_collecting(&self) -> bool {
        false
    }
}

/// Ordered, append-only collection of rejections.
///
/// Rejections are appended through [`RejectionSink::reject`] and read back in
/// insertion order. No other mutation is exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rejections {
    items: Vec<Rejection>,
}

impl Rejections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rejection> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Rejection] {
        &self.items
    }

    pub fn first(&self) -> Option<&Rejection> {
        self.items.first()
    }

    pub fn into_vec(self) -> Vec<Rejection> {
        self.items
    }

    /// Re-emits every collected rejection, in order, to another sink.
    pub(crate) fn flush_into(self, sink: &mut dyn RejectionSink) {
        for rejection in self.items {
            sink.reject(rejection);
        }
    }

    /// Stable-sorts by descending path length, deepest failures first.
    pub(crate) fn sort_deepest_first(&mut self) {
        self.items.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
    }
}

impl RejectionSink for Rejections {
    fn reject(&mut self, rejection: Rejection) {
        self.items.push(rejection);
    }
}

impl IntoIterator for Rejections {
    type Item = Rejection;
    type IntoIter = std::vec::IntoIter<Rejection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rejections {
    type Item = &'a Rejection;
    type IntoIter = std::slice::Iter<'a, Rejection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Rejections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rejection) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rejection}")?;
        }
        Ok(())
    }
}

/// Forwards rejections after appending a path segment.
pub(crate) struct PathSink<'a> {
    inner: &'a mut dyn RejectionSink,
    key: PathKey,
}

impl<'a> PathSink<'a> {
    pub(crate) fn new(inner: &'a mut dyn RejectionSink, key: impl Into<PathKey>) -> Self {
        Self {
            inner,
            key: key.into(),
        }
    }
}

impl RejectionSink for PathSink<'_> {
    fn reject(&mut self, rejection: Rejection) {
        self.inner.reject(rejection.at(self.key.clone()));
    }

    fn is_collecting(&self) -> bool {
        self.inner.is_collecting()
    }
}

/// Forwards rejections through a rewrite function.
pub(crate) struct MapSink<'a, F> {
    inner: &'a mut dyn RejectionSink,
    map: F,
}

impl<'a, F> MapSink<'a, F>
where
    F: FnMut(Rejection) -> Rejection,
{
    pub(crate) fn new(inner: &'a mut dyn RejectionSink, map: F) -> Self {
        Self { inner, map }
    }
}

impl<F> RejectionSink for MapSink<'_, F>
where
    F: FnMut(Rejection) -> Rejection,
{
    fn reject(&mut self, rejection: Rejection) {
        let mapped = (self.map)(rejection);
        self.inner.reject(mapped);
    }

    fn is_collecting(&self) -> bool {
        self.inner.is_collecting()
    }
}

/// Records whether anything was reported while forwarding.
pub(crate) struct TrackingSink<'a> {
    inner: &'a mut dyn RejectionSink,
    pub(crate) reported: bool,
}

impl<'a> TrackingSink<'a> {
    pub(crate) fn new(inner: &'a mut dyn RejectionSink) -> Self {
        Self {
            inner,
            reported: false,
        }
    }
}

impl RejectionSink for TrackingSink<'_> {
    fn reject(&mut self, rejection: Rejection) {
        self.reported = true;
        self.inner.reject(rejection);
    }

    fn is_collecting(&self) -> bool {
        self.inner.is_collecting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_sink_appends_outer_keys() {
        let mut collected = Rejections::new();
        {
            let mut outer = PathSink::new(&mut collected, "outer");
            let mut inner = PathSink::new(&mut outer, 3_usize);
            inner.reject(Rejection::new("bad", "string"));
        }
        let rejection = collected.first().unwrap();
        assert_eq!(
            rejection.path.as_slice(),
            [PathKey::Index(3), PathKey::from("outer")]
        );
        assert_eq!(rejection.dotted_path(), "outer.3");
    }

    #[test]
    fn closures_are_sinks() {
        let mut count = 0;
        let mut sink = |_: Rejection| count += 1;
        sink.reject(Rejection::new("a", "b"));
        sink.reject(Rejection::new("a", "b"));
        assert_eq!(count, 2);
    }

    #[test]
    fn discard_is_not_collecting() {
        assert!(!Discard.is_collecting());
        let mut tracking_target = Discard;
        let tracking = TrackingSink::new(&mut tracking_target);
        assert!(!tracking.is_collecting());
    }

    #[test]
    fn from_key_only_converts_canonical_integers() {
        assert_eq!(PathKey::from_key("0"), PathKey::Index(0));
        assert_eq!(PathKey::from_key("12"), PathKey::Index(12));
        assert_eq!(PathKey::from_key("012"), PathKey::from("012"));
        assert_eq!(PathKey::from_key("-1"), PathKey::from("-1"));
        assert_eq!(PathKey::from_key("+1"), PathKey::from("+1"));
        assert_eq!(PathKey::from_key("key"), PathKey::from("key"));
    }

    #[test]
    fn sort_deepest_first_is_stable() {
        let mut rejections = Rejections::new();
        rejections.reject(Rejection::new("shallow-1", "t"));
        rejections.reject(Rejection::new("deep", "t").at(1_usize).at(2_usize));
        rejections.reject(Rejection::new("shallow-2", "t"));
        rejections.sort_deepest_first();
        let reasons: Vec<&str> = rejections.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(reasons, ["deep", "shallow-1", "shallow-2"]);
    }

    #[test]
    fn serializes_with_untagged_path() {
        let rejection = Rejection::new("bad", "number").at(2_usize).at("items");
        let json = serde_json::to_value(&rejection).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "path": [2, "items"], "reason": "bad", "propertyType": "number" })
        );
    }
}
