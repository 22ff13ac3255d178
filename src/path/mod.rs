//! Nested path assignment.
//!
//! - [`Path`] - Non-empty list of segments; the first one names a buffer key
//! - [`PathValue`] - Values that can hold nested structure
//!
//! With the `json` feature (default), [`serde_json::Value`] implements
//! [`PathValue`] using objects and arrays as the nested structure.

use std::fmt;

use crate::error::Error;

#[cfg(feature = "json")]
mod json;

/// A dot-delimited or pre-split path into nested structure.
///
/// The first segment is the root key; the remaining segments are walked
/// into the value stored under it.
///
/// # Example
///
/// ```
/// use chunkbuf::Path;
///
/// let path = Path::from("a.aa.aaa");
/// assert_eq!(path.root(), "a");
/// assert_eq!(path.rest(), ["aa", "aaa"]);
///
/// let path = Path::new(["user", "name"])?;
/// assert_eq!(path.to_string(), "user.name");
/// assert_eq!(Path::from(["user", "name"]), path);
///
/// assert!(Path::new(Vec::<String>::new()).is_err());
/// # Ok::<(), chunkbuf::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Builds a path from already split segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] if `segments` is empty.
    pub fn new<I, S>(segments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(Self { segments })
    }

    /// Splits a dot-delimited path.
    ///
    /// Empty segments are kept, so `""` is a path with one empty root segment.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_owned).collect(),
        }
    }

    /// Returns the root segment.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Returns the segments below the root.
    pub fn rest(&self) -> &[String] {
        &self.segments[1..]
    }

    /// Returns all segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a path has at least its root segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Splits into (root, rest).
    pub(crate) fn into_root(mut self) -> (String, Vec<String>) {
        let rest = self.segments.split_off(1);
        let root = self.segments.pop().unwrap_or_default();
        (root, rest)
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

/// Pre-split segments; an empty list is read as a single empty root segment,
/// matching `Path::parse("")`.
impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Self::from(&segments[..])
    }
}

/// Pre-split segments; an empty slice is read as a single empty root segment,
/// matching `Path::parse("")`.
impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied()).unwrap_or_else(|_| Self::parse(""))
    }
}

impl TryFrom<Vec<String>> for Path {
    type Error = Error;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// A value that can hold nested, string-keyed structure.
///
/// Implementors decide what "nested structure" means (a JSON object, a map
/// type, ...). Anything that is not such a structure gets replaced when a
/// path walks through it.
pub trait PathValue: Sized {
    /// Returns an empty nested structure.
    fn empty() -> Self;

    /// Stores `value` at `segments` below `self` and returns the result.
    ///
    /// With no segments, `value` replaces `self`. Otherwise `self` is turned
    /// into a nested structure if it is not one, and each segment's slot is
    /// created (or overwritten, if it holds a non-structure) on the way down.
    fn assign(self, segments: &[String], value: Self) -> Self;
}
