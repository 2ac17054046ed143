use text_size::{TextRange, TextSize};

use crate::NodeKind;

/// Failure of a tree query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("offset {offset:?} is past the end of the text ({len:?})")]
    OutOfBounds { offset: TextSize, len: TextSize },
}

/// Immutable, externally owned syntax tree of one source text.
pub trait SyntaxTree {
    /// Handle to a node of this tree.
    type Node<'t>: SourceNode<'t>
    where
        Self: 't;

    /// Returns the leaf covering `offset`.
    ///
    /// `Ok(None)` means the offset falls between tokens (whitespace, or text
    /// outside any script block); offsets past the end of the text are an
    /// error.
    fn node_at(&self, offset: TextSize) -> Result<Option<Self::Node<'_>>, TreeError>;
}

/// Node handle tied to the lifetime of its tree.
pub trait SourceNode<'t>: Copy {
    /// Returns this node's classification.
    fn kind(self) -> NodeKind<'t>;

    /// Returns the source text covered by this node.
    fn text(self) -> &'t str;

    /// Returns the range of this node in the whole source text.
    fn range(self) -> TextRange;

    /// Returns the parent node, `None` for the root.
    fn parent(self) -> Option<Self>;

    /// Returns `true` when this node is the name slot of its parent: the
    /// declared variable, a property key, a field or method name, or the
    /// property of a member access. Values, objects and indices are not.
    fn is_name(self) -> bool;

    /// Iterates over parent nodes, starting from the immediate parent.
    fn ancestors(self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), |node| node.parent())
    }
}
