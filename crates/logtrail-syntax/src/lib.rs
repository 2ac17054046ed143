//! Read-only syntax trees for the sources logtrail edits.
//!
//! Consumers only see the [`SyntaxTree`] and [`SourceNode`] traits. The
//! tree-sitter backed [`SourceTree`] is the provider shipped with the crate;
//! it understands plain JavaScript files and the `<script>` blocks of Vue
//! single-file components.

mod file_kind;
mod node_kind;
mod source_tree;
mod tree;

/// Source file classifications a tree can be built for.
pub use file_kind::FileKind;
/// Closed classification of syntax nodes.
pub use node_kind::NodeKind;
/// Tree-sitter backed provider.
pub use source_tree::{SourceTree, SyntaxNode};
/// Provider interface.
pub use tree::{SourceNode, SyntaxTree, TreeError};
