use logtrail_syntax::SyntaxTree;
use text_size::TextSize;

use crate::{Buffer, Config, Cursor, build_trail, resolve};

/// Statements collected from all cursors of one invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Terminated statements, in cursor order.
    pub statements: Vec<String>,
    /// Shared insertion offset, from the last cursor that produced a statement.
    pub anchor: TextSize,
    pub indent: usize,
}

/// Runs every cursor through resolution and trail building.
///
/// Cursors that yield nothing are skipped. Returns `None` when no cursor
/// produced a statement.
pub fn aggregate<T: SyntaxTree>(
    tree: &T,
    buffer: &Buffer,
    cursors: &[Cursor],
    config: &Config,
) -> Option<PendingEdit> {
    let mut edit: Option<PendingEdit> = None;

    for cursor in cursors {
        let Some(identifier) = resolve(tree, cursor.offset) else {
            tracing::debug!(offset = ?cursor.offset, "no identifier at cursor");
            continue;
        };
        let Some(trail) = build_trail(buffer, identifier, cursor) else {
            continue;
        };

        let edit = edit.get_or_insert_with(PendingEdit::default);
        edit.statements.push(config.statement(&trail.label));
        edit.anchor = trail.anchor;
        edit.indent = trail.indent;
    }

    edit
}
