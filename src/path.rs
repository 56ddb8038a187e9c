//! # Element Path Matching
//!
//! VOTable reuses element names at different nesting levels (`DESCRIPTION`
//! under `VOTABLE`, `RESOURCE`, `TABLE` or `FIELD`; `COOSYS` under `VOTABLE`
//! or `DEFINITIONS`). The parser keeps the chain of open element names from
//! the document root as an [`ElementPath`] and classifies elements by matching
//! it against slash-separated patterns.
//!
//! ## Pattern syntax
//!
//! - `a/b/c` matches exactly the path `[a, b, c]`.
//! - `*` skips zero or more path segments, scanning forward to the first
//!   occurrence of the next literal segment.
//! - A trailing `*` matches the remainder of the path unconditionally.
//!
//! ```
//! use votable::path::path_matches;
//!
//! let path = ["VOTABLE", "RESOURCE", "TABLE", "FIELD"];
//! assert!(path_matches("VOTABLE/*/FIELD", &path));
//! assert!(path_matches("VOTABLE/RESOURCE/*", &path));
//! assert!(!path_matches("VOTABLE/FIELD", &path));
//! ```

use std::fmt;

/// Wildcard segment
pub const WILDCARD: &str = "*";

/// One segment of a compiled [`PathPattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Wildcard,
}

/// A compiled slash-separated path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    has_wildcard: bool,
}

impl PathPattern {
    /// Compile a pattern such as `VOTABLE/DEFINITIONS/COOSYS` or `*/TABLE/*`
    pub fn new(pattern: &str) -> Self {
        let segments: Vec<Segment> = pattern
            .split('/')
            .map(|s| {
                if s == WILDCARD {
                    Segment::Wildcard
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        let has_wildcard = segments.contains(&Segment::Wildcard);

        Self {
            source: pattern.to_string(),
            segments,
            has_wildcard,
        }
    }

    /// The pattern text this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test the pattern against a path of element names
    pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> bool {
        if !self.has_wildcard {
            return self.segments.len() == path.len()
                && self
                    .segments
                    .iter()
                    .zip(path)
                    .all(|(seg, name)| matches!(seg, Segment::Literal(lit) if lit == name.as_ref()));
        }

        let mut pos = 0;
        let mut i = 0;
        while i < self.segments.len() {
            match &self.segments[i] {
                Segment::Wildcard => match self.segments.get(i + 1) {
                    None => return true,
                    Some(Segment::Wildcard) => i += 1,
                    Some(Segment::Literal(next)) => {
                        match path[pos..].iter().position(|name| name.as_ref() == next) {
                            Some(offset) => {
                                pos += offset + 1;
                                i += 2;
                            }
                            None => return false,
                        }
                    }
                },
                Segment::Literal(lit) => {
                    match path.get(pos) {
                        Some(name) if name.as_ref() == lit => {}
                        _ => return false,
                    }
                    pos += 1;
                    i += 1;
                }
            }
        }

        pos == path.len()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Match `pattern` against `path` without keeping the compiled pattern
pub fn path_matches<S: AsRef<str>>(pattern: &str, path: &[S]) -> bool {
    PathPattern::new(pattern).matches(path)
}

/// Stack of open element names, root first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementPath {
    names: Vec<String>,
}

impl ElementPath {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter an element
    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Leave the innermost element
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    /// Innermost open element
    pub fn current(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    /// Element immediately enclosing the innermost one
    pub fn parent(&self) -> Option<&str> {
        self.names
            .len()
            .checked_sub(2)
            .map(|i| self.names[i].as_str())
    }

    /// Whether any open element has this name
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Nesting depth
    pub fn depth(&self) -> usize {
        self.names.len()
    }

    /// Whether no element is open
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Open element names, root first
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Test a compiled pattern against this path
    pub fn matches(&self, pattern: &PathPattern) -> bool {
        pattern.matches(self.names.as_slice())
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: [&str; 5] = ["a", "b", "c", "d", "e"];

    #[test]
    fn test_exact_patterns() {
        assert!(path_matches("a/b/c/d/e", &PATH));
        assert!(!path_matches("a/b/c/d/f", &PATH));
        assert!(!path_matches("a/b/c/d/e/f", &PATH));
        assert!(!path_matches("a/b/c/d", &PATH));
        assert!(path_matches("a/b", &["a", "b"]));
    }

    #[test]
    fn test_wildcard_patterns() {
        assert!(path_matches("*/d/e", &PATH));
        assert!(path_matches("*/b/*/e", &PATH));
        assert!(!path_matches("*/b/a/*", &PATH));
        assert!(path_matches("a/b/*", &PATH));
        assert!(!path_matches("a/f/*", &PATH));
        assert!(path_matches("*/b/*/d/*", &PATH));
    }

    #[test]
    fn test_wildcard_edge_cases() {
        assert!(path_matches("*", &PATH));
        assert!(path_matches("*/*/e", &PATH));
        assert!(path_matches("a/b/c/d/e/*", &PATH));
        assert!(!path_matches("*/d", &PATH));
        assert!(!path_matches("*/x/*", &PATH));
        assert!(!path_matches("a/b/c/d/e/f/*", &PATH));
    }

    #[test]
    fn test_coosys_gating_patterns() {
        let root = PathPattern::new("VOTABLE/COOSYS");
        let definitions = PathPattern::new("VOTABLE/DEFINITIONS/COOSYS");

        assert!(root.matches(&["VOTABLE", "COOSYS"]));
        assert!(definitions.matches(&["VOTABLE", "DEFINITIONS", "COOSYS"]));
        assert!(!root.matches(&["VOTABLE", "RESOURCE", "TABLE", "FIELD", "COOSYS"]));
        assert!(!definitions.matches(&["VOTABLE", "RESOURCE", "TABLE", "FIELD", "COOSYS"]));
    }

    #[test]
    fn test_element_path_stack() {
        let mut path = ElementPath::new();
        assert!(path.is_empty());
        assert_eq!(path.parent(), None);

        path.push("VOTABLE");
        assert_eq!(path.current(), Some("VOTABLE"));
        assert_eq!(path.parent(), None);

        path.push("DESCRIPTION");
        assert_eq!(path.parent(), Some("VOTABLE"));
        assert_eq!(path.to_string(), "VOTABLE/DESCRIPTION");
        assert!(path.matches(&PathPattern::new("VOTABLE/*")));

        assert_eq!(path.pop().as_deref(), Some("DESCRIPTION"));
        assert_eq!(path.depth(), 1);
        assert!(path.contains("VOTABLE"));
    }
}
