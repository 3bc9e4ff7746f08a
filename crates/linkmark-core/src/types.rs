//! Common type definitions and newtypes for Linkmark.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookmark tag.
///
/// Tags are plain names; two tags are equal when their names are equal.
///
/// # Example
///
/// ```
/// use linkmark_core::Tag;
///
/// let tag = Tag::new("rust");
/// assert_eq!(tag.name(), "rust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Creates a new Tag with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the tag name as a string slice.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns true if the name is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(s)
    }
}
