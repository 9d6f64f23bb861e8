//! Validation paths for diagnostic messages.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// One step into a candidate value: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// The ordered sequence of keys and indices locating the current validation
/// position. Shared down the recursion and used only in diagnostic text.
///
/// Combinators that descend into children extend the path through a
/// [`PathScope`], which restores the entry length on every exit so sibling
/// checks never observe a stale segment.
#[derive(Debug, Default, Clone)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn truncate(&mut self, len: usize) {
        self.segments.truncate(len);
    }

    /// Open a scope that truncates back to the current length when dropped.
    pub fn scope(&mut self) -> PathScope<'_> {
        let depth = self.segments.len();
        PathScope { path: self, depth }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Drop guard over a borrowed [`Path`].
///
/// Whatever the scope pushed is removed again when it drops, on success,
/// failure, or panic alike.
pub struct PathScope<'a> {
    path: &'a mut Path,
    depth: usize,
}

impl PathScope<'_> {
    /// Replace whatever this scope pushed with a single key segment.
    pub fn set_key(&mut self, key: &str) {
        self.path.truncate(self.depth);
        self.path.push_key(key);
    }

    /// Replace whatever this scope pushed with a single index segment.
    pub fn set_index(&mut self, index: usize) {
        self.path.truncate(self.depth);
        self.path.push_index(index);
    }

    /// Truncate back to the entry length without closing the scope.
    pub fn reset(&mut self) {
        self.path.truncate(self.depth);
    }
}

impl Deref for PathScope<'_> {
    type Target = Path;

    fn deref(&self) -> &Path {
        self.path
    }
}

impl DerefMut for PathScope<'_> {
    fn deref_mut(&mut self) -> &mut Path {
        self.path
    }
}

impl Drop for PathScope<'_> {
    fn drop(&mut self) {
        self.path.truncate(self.depth);
    }
}
