//! Test helpers: cursor markers and a hand-built syntax tree.

use logtrail_syntax::{NodeKind, SourceNode, SyntaxTree, TreeError};
use text_size::{TextRange, TextSize};

pub(crate) const CURSOR_MARKER: &str = "$0";

/// Removes every `$0` marker from `text` and returns the marker offsets.
pub(crate) fn extract_cursors(text: &str) -> (Vec<TextSize>, String) {
    let mut offsets = Vec::new();
    let mut new_text = String::with_capacity(text.len());

    for (index, chunk) in text.split(CURSOR_MARKER).enumerate() {
        if index > 0 {
            offsets.push(TextSize::of(new_text.as_str()));
        }
        new_text.push_str(chunk);
    }

    assert!(!offsets.is_empty(), "Cursor marker not found");
    (offsets, new_text)
}

/// Tree whose nodes are added by hand, for shapes the parser never produces.
pub(crate) struct FakeTree {
    text: String,
    nodes: Vec<FakeData>,
}

struct FakeData {
    kind: NodeKind<'static>,
    range: TextRange,
    parent: Option<usize>,
    is_name: bool,
}

impl FakeTree {
    pub(crate) fn new(text: &str) -> Self {
        Self { text: text.to_owned(), nodes: Vec::new() }
    }

    pub(crate) fn add(
        &mut self,
        kind: NodeKind<'static>,
        range: TextRange,
        parent: Option<usize>,
    ) -> usize {
        self.nodes.push(FakeData { kind, range, parent, is_name: false });
        self.nodes.len() - 1
    }

    /// Makes `index` the name slot of its parent.
    pub(crate) fn mark_name(&mut self, index: usize) {
        self.nodes[index].is_name = true;
    }

    pub(crate) fn node(&self, index: usize) -> FakeNode<'_> {
        FakeNode { tree: self, index }
    }
}

impl SyntaxTree for FakeTree {
    type Node<'t> = FakeNode<'t>;

    fn node_at(&self, offset: TextSize) -> Result<Option<FakeNode<'_>>, TreeError> {
        let len = TextSize::of(self.text.as_str());
        if offset > len {
            return Err(TreeError::OutOfBounds { offset, len });
        }

        let index = (0..self.nodes.len())
            .filter(|&index| self.nodes[index].range.contains(offset))
            .min_by_key(|&index| self.nodes[index].range.len());
        Ok(index.map(|index| self.node(index)))
    }
}

#[derive(Clone, Copy)]
pub(crate) struct FakeNode<'t> {
    tree: &'t FakeTree,
    index: usize,
}

impl<'t> FakeNode<'t> {
    fn data(self) -> &'t FakeData {
        &self.tree.nodes[self.index]
    }
}

impl<'t> SourceNode<'t> for FakeNode<'t> {
    fn kind(self) -> NodeKind<'t> {
        self.data().kind
    }

    fn text(self) -> &'t str {
        &self.tree.text[self.data().range]
    }

    fn range(self) -> TextRange {
        self.data().range
    }

    fn parent(self) -> Option<Self> {
        Some(Self { index: self.data().parent?, ..self })
    }

    fn is_name(self) -> bool {
        self.data().is_name
    }
}
