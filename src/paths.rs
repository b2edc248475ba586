//! Facilities for working with paths within schemas or validated instances.
use std::fmt::{self, Write};

/// A single step in a schema path or an instance path: either a property
/// name or an array index.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PathChunk {
    Name(String),
    Index(usize),
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Name(value)
    }
}

impl From<&str> for PathChunk {
    #[inline]
    fn from(value: &str) -> Self {
        PathChunk::Name(value.to_string())
    }
}

impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// An immutable, JSON-Pointer-shaped path. Extending a path never mutates
/// the original: `pushed` returns a new, longer `Path`, which is how the
/// dispatcher "restores" the parent path on the way back up a recursive
/// call without needing to pop anything.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Path(Vec<PathChunk>);

impl Path {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Path(Vec::new())
    }

    /// Return a new path with `chunk` appended, leaving `self` untouched.
    #[must_use]
    pub fn pushed(&self, chunk: impl Into<PathChunk>) -> Self {
        let mut chunks = self.0.clone();
        chunks.push(chunk.into());
        Path(chunks)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the path as a slash-joined JSON Pointer-like string, e.g.
    /// `/definitions/0/name`.
    #[must_use]
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for chunk in &self.0 {
            out.write_char('/').expect("writing to a String cannot fail");
            match chunk {
                PathChunk::Name(name) => {
                    for ch in name.chars() {
                        match ch {
                            '~' => out.push_str("~0"),
                            '/' => out.push_str("~1"),
                            _ => out.push(ch),
                        }
                    }
                }
                PathChunk::Index(idx) => {
                    write!(out, "{idx}").expect("writing to a String cannot fail");
                }
            }
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pointer())
    }
}
