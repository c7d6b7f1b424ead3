//! Issue paths
//!
//! A [`Path`] is the ordered list of accessors leading from the root input to
//! the offending value. Object fields contribute [`PathSegment::Key`], array,
//! tuple and set positions contribute [`PathSegment::Index`].

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single accessor step inside a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position inside an array, tuple, set or map entry list.
    Index(usize),
    /// Field name inside an object or record.
    Key(String),
}

impl PathSegment {
    /// Returns the key if this segment names an object field.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the index if this segment addresses a sequence position.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(_) => None,
        }
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

/// Ordered accessor list from the root value to an offending value.
///
/// Most issues sit a handful of levels deep, so segments are stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: SmallVec<[PathSegment; 4]>,
}

impl Path {
    /// The empty (root) path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Removes the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut next = self.clone();
        next.push(segment);
        next
    }

    /// Returns a new path with all segments of `tail` appended.
    #[must_use]
    pub fn concat(&self, tail: &Path) -> Self {
        let mut next = self.clone();
        next.segments.extend(tail.segments.iter().cloned());
        next
    }

    /// First segment, if any.
    pub fn first(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    /// All segments in root-to-leaf order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Iterates segments in root-to-leaf order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    /// Renders the path with every segment joined by `.`, the way form
    /// libraries name nested fields (`coords.0`, `address.city`).
    pub fn dotted(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Identifier-like keys render bare; anything else is quoted in brackets.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Renders `user.friends[0]["display name"]`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if is_identifier(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}
