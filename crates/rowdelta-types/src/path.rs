use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in a two-level ordered collection: section index outer,
/// row index inner.
///
/// The diff algorithm compares paths only for equality. The `Ord` impl
/// (section-major, row-minor) exists for consumers that need a
/// deterministic application order, such as the in-memory model view.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowPath {
    pub section: usize,
    pub row: usize,
}

impl RowPath {
    /// Create a path from a section index and a row index.
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Debug for RowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}

impl fmt::Display for RowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}

impl From<(usize, usize)> for RowPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self { section, row }
    }
}

/// The relocation of one element: it was previously found at `from` in the
/// old tree and is now found at `to` in the new tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowMove {
    pub from: RowPath,
    pub to: RowPath,
}

impl RowMove {
    /// Create a move from an old position to a new one.
    pub const fn new(from: RowPath, to: RowPath) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for RowMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_equality() {
        assert_eq!(RowPath::new(1, 2), RowPath::new(1, 2));
        assert_ne!(RowPath::new(1, 2), RowPath::new(2, 1));
    }

    #[test]
    fn path_ordering_is_section_major() {
        assert!(RowPath::new(0, 9) < RowPath::new(1, 0));
        assert!(RowPath::new(1, 0) < RowPath::new(1, 1));
    }

    #[test]
    fn path_from_tuple() {
        let path: RowPath = (2, 3).into();
        assert_eq!(path, RowPath::new(2, 3));
    }

    #[test]
    fn path_display() {
        assert_eq!(RowPath::new(0, 4).to_string(), "(0, 4)");
    }

    #[test]
    fn move_display() {
        let mv = RowMove::new(RowPath::new(0, 1), RowPath::new(1, 0));
        assert_eq!(mv.to_string(), "(0, 1) -> (1, 0)");
    }

    #[test]
    fn path_serde_roundtrip() {
        let path = RowPath::new(3, 7);
        let json = serde_json::to_string(&path).unwrap();
        let parsed: RowPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, path);
    }
}
