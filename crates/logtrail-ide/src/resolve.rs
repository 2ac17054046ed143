use logtrail_syntax::{SourceNode as _, SyntaxTree, TreeError};
use text_size::TextSize;

/// Returns the identifier at `offset`.
///
/// A caret sitting right after a name (before whitespace or punctuation)
/// still finds that name. Lookup failures are reported as `None`.
pub fn resolve<T: SyntaxTree>(tree: &T, offset: TextSize) -> Option<T::Node<'_>> {
    node_near(tree, offset).filter(|node| node.kind().is_identifier())
}

/// Returns the leaf at `offset`, falling back to the leaf just before it when
/// the offset hits whitespace or a non-identifier token.
pub fn node_near<T: SyntaxTree>(tree: &T, offset: TextSize) -> Option<T::Node<'_>> {
    match lookup(tree, offset) {
        Ok(node) => node,
        Err(error) => {
            tracing::debug!(%error, "node lookup failed");
            None
        }
    }
}

fn lookup<T: SyntaxTree>(tree: &T, offset: TextSize) -> Result<Option<T::Node<'_>>, TreeError> {
    let previous = offset.checked_sub(TextSize::new(1));

    let node = match tree.node_at(offset)? {
        Some(node) => Some(node),
        None => node_at(tree, previous)?,
    };

    match node {
        Some(node) if !node.kind().is_identifier() => node_at(tree, previous),
        node => Ok(node),
    }
}

fn node_at<T: SyntaxTree>(
    tree: &T,
    offset: Option<TextSize>,
) -> Result<Option<T::Node<'_>>, TreeError> {
    match offset {
        Some(offset) => tree.node_at(offset),
        None => Ok(None),
    }
}
