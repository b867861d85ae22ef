//! The unified cell: one cluster plus the style stamped onto it.

use crate::Style;

/// One terminal cell.
///
/// `cluster` is an extended grapheme cluster occupying one or two display
/// columns. The empty cluster marks a continuation cell: the right half of a
/// wide cluster, whose style mirrors the cluster to its left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub cluster: String,
    pub style: Style,
}

impl Cell {
    pub fn new(cluster: impl Into<String>, style: Style) -> Self {
        Self {
            cluster: cluster.into(),
            style,
        }
    }

    /// The blank cell: a space with the default rendition.
    pub fn blank() -> Self {
        Self {
            cluster: " ".to_string(),
            style: Style::default(),
        }
    }

    /// Continuation cell for the right half of a wide cluster.
    pub fn continuation(style: Style) -> Self {
        Self {
            cluster: String::new(),
            style,
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.cluster.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.cluster == " " && self.style.is_default()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
