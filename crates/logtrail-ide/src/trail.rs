use logtrail_syntax::{NodeKind, SourceNode};
use text_size::TextSize;

use crate::{Buffer, Cursor, spaces_for};

const SEPARATOR: &str = " -> ";

/// What to log for one cursor, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTrail {
    /// Arguments of the generated call, e.g. `'Foo -> bar -> y', y`.
    pub label: String,
    /// Offset the statement is inserted at.
    pub anchor: TextSize,
    /// Indentation width of the inserted statement.
    pub indent: usize,
}

/// Builds the scope breadcrumb of `identifier` and finds where its log
/// statement goes.
///
/// By default the statement goes after the cursor's line, indented like the
/// selection. A declared name anchors after its declaration instead, and the
/// property of a member access logs the whole access. Returns `None` for
/// non-identifiers and for property, field or method keys.
pub fn build_trail<'t, N: SourceNode<'t>>(
    buffer: &Buffer,
    identifier: N,
    cursor: &Cursor,
) -> Option<ScopeTrail> {
    if !identifier.kind().is_identifier() || identifier.text().is_empty() {
        tracing::debug!(range = ?identifier.range(), "not an identifier");
        return None;
    }

    let mut element = identifier.text();
    let mut anchor = cursor.line_end;
    let mut indent = spaces_for(buffer, cursor.selection.start(), cursor.selection.end());

    let Some(parent) = identifier.parent() else {
        return Some(ScopeTrail { label: element.to_owned(), anchor, indent });
    };

    let is_name = identifier.is_name();
    if is_name && parent.kind() == NodeKind::MemberExpression {
        element = parent.text();
    }

    let mut scopes = Vec::new();
    for (depth, ancestor) in std::iter::once(parent).chain(parent.ancestors()).enumerate() {
        let kind = ancestor.kind();
        scopes.extend(kind.scope_name());

        if depth > 0 || !is_name {
            continue;
        }
        match kind {
            NodeKind::VariableDeclarator | NodeKind::VariableStatement => {
                let range = ancestor.range();
                anchor = range.end() + TextSize::new(1);
                indent = spaces_for(buffer, range.start(), range.end());
            }
            NodeKind::Property(_) | NodeKind::FunctionProperty(_) => {
                tracing::debug!(element, "identifier is a property key");
                return None;
            }
            _ => {}
        }
    }

    let mut breadcrumb = scopes.into_iter().rev().collect::<Vec<_>>();
    breadcrumb.push(element);

    let label = format!("'{}', {element}", breadcrumb.join(SEPARATOR));
    Some(ScopeTrail { label, anchor, indent })
}
