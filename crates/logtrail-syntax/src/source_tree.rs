//! Tree-sitter backed [`SyntaxTree`] provider.

use std::fmt;

use text_size::{TextRange, TextSize};

use crate::{FileKind, NodeKind, SourceNode, SyntaxTree, TreeError};

/// Parsed JavaScript of one source file.
///
/// A JavaScript file is a single script block spanning the whole text; a Vue
/// component has one block per `<script>` element. Node ranges are always
/// reported relative to the whole text.
pub struct SourceTree {
    text: String,
    blocks: Vec<ScriptBlock>,
}

struct ScriptBlock {
    range: TextRange,
    tree: tree_sitter::Tree,
}

impl SourceTree {
    /// Parses `text` as a file of the given kind.
    ///
    /// Returns `None` if the parser could not be set up or gave up.
    pub fn parse(text: &str, kind: FileKind) -> Option<Self> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_javascript::LANGUAGE.into()).ok()?;

        let ranges = match kind {
            FileKind::JavaScript => vec![TextRange::up_to(TextSize::of(text))],
            FileKind::Vue => script_blocks(text),
        };

        let blocks = ranges
            .into_iter()
            .map(|range| Some(ScriptBlock { range, tree: parser.parse(&text[range], None)? }))
            .collect::<Option<Vec<_>>>()?;

        Some(Self { text: text.to_owned(), blocks })
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl SyntaxTree for SourceTree {
    type Node<'t> = SyntaxNode<'t>;

    fn node_at(&self, offset: TextSize) -> Result<Option<SyntaxNode<'_>>, TreeError> {
        let len = TextSize::of(self.text.as_str());
        if offset > len {
            return Err(TreeError::OutOfBounds { offset, len });
        }

        let Some(block) = self.blocks.iter().find(|block| block.range.contains(offset)) else {
            return Ok(None);
        };

        let local = usize::from(offset - block.range.start());
        let covers = |node: &tree_sitter::Node<'_>| node.start_byte() <= local && local < node.end_byte();

        let mut node = block.tree.root_node();
        if !covers(&node) {
            return Ok(None);
        }

        loop {
            if node.child_count() == 0 {
                return Ok(Some(SyntaxNode { node, base: block.range.start(), source: &self.text }));
            }

            let mut cursor = node.walk();
            let Some(child) = node.children(&mut cursor).find(covers) else {
                return Ok(None);
            };
            node = child;
        }
    }
}

impl fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceTree")
            .field("text_len", &self.text.len())
            .field("blocks", &self.blocks.iter().map(|block| block.range).collect::<Vec<_>>())
            .finish()
    }
}

/// Node handle tied to the lifetime of a [`SourceTree`].
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    node: tree_sitter::Node<'t>,
    base: TextSize,
    source: &'t str,
}

impl<'t> SyntaxNode<'t> {
    /// Returns the tree-sitter kind name, e.g. `variable_declarator`.
    #[inline]
    pub fn raw_kind(self) -> &'static str {
        self.node.kind()
    }

    fn field_text(self, field: &str) -> Option<&'t str> {
        let child = self.node.child_by_field_name(field)?;
        let text = Self { node: child, ..self }.text();
        Some(text.trim_matches(|c| c == '"' || c == '\''))
    }
}

impl<'t> SourceNode<'t> for SyntaxNode<'t> {
    fn kind(self) -> NodeKind<'t> {
        if !self.node.is_named() {
            return NodeKind::Other;
        }

        match self.node.kind() {
            "identifier"
            | "property_identifier"
            | "private_property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern" => NodeKind::Identifier,
            "member_expression" | "subscript_expression" => NodeKind::MemberExpression,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "lexical_declaration" | "variable_declaration" => NodeKind::VariableStatement,
            "pair" => NodeKind::Property(self.field_text("key")),
            "field_definition" => NodeKind::Property(self.field_text("property")),
            "method_definition" => NodeKind::FunctionProperty(self.field_text("name")),
            "function_declaration"
            | "function_expression"
            | "generator_function_declaration"
            | "generator_function" => NodeKind::Function(self.field_text("name")),
            "class_declaration" | "class" => NodeKind::Class(self.field_text("name")),
            _ => NodeKind::Other,
        }
    }

    #[inline]
    fn text(self) -> &'t str {
        &self.source[self.range()]
    }

    #[inline]
    fn range(self) -> TextRange {
        TextRange::new(
            self.base + TextSize::from(self.node.start_byte() as u32),
            self.base + TextSize::from(self.node.end_byte() as u32),
        )
    }

    #[inline]
    fn parent(self) -> Option<Self> {
        Some(Self { node: self.node.parent()?, ..self })
    }

    fn is_name(self) -> bool {
        let Some(parent) = self.node.parent() else {
            return false;
        };

        let field = match parent.kind() {
            "pair" => "key",
            "field_definition" | "member_expression" => "property",
            "method_definition" | "variable_declarator" => "name",
            _ => return false,
        };
        parent.child_by_field_name(field) == Some(self.node)
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.raw_kind(), self.range())
    }
}

/// Ranges of the contents of every `<script>` element.
fn script_blocks(text: &str) -> Vec<TextRange> {
    let mut blocks = Vec::new();
    let mut rest = 0;

    while let Some(open) = text[rest..].find("<script") {
        let open = rest + open;
        let Some(tag_len) = text[open..].find('>') else {
            break;
        };
        let start = open + tag_len + 1;
        if text[..start].ends_with("/>") {
            rest = start;
            continue;
        }

        let Some(len) = text[start..].find("</script") else {
            break;
        };
        let end = start + len;

        blocks.push(TextRange::new(TextSize::of(&text[..start]), TextSize::of(&text[..end])));
        rest = end;
    }

    blocks
}
