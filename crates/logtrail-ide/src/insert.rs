use logtrail_syntax::{SourceNode as _, SyntaxTree};
use text_size::{TextRange, TextSize};

use crate::{Buffer, Config, Formatter, PendingEdit, node_near};

/// Inserts all statements of `edit` as one undoable step.
///
/// Every statement goes on its own line at the shared anchor, so later
/// statements land above earlier ones. `reparse` builds a tree of the edited
/// text; the node at the start of the first inserted statement is then handed
/// to `formatter` within the same step, or just that offset when no node is
/// found there. Formatter failures are logged and ignored.
pub fn apply<T, P>(
    buffer: &mut Buffer,
    edit: &PendingEdit,
    config: &Config,
    formatter: &dyn Formatter,
    reparse: P,
) where
    T: SyntaxTree,
    P: FnOnce(&str) -> Option<T>,
{
    let anchor = buffer.clamp(edit.anchor);
    let indent = " ".repeat(edit.indent);
    let statement_start =
        anchor + TextSize::of(config.line_terminator.as_str()) + TextSize::of(indent.as_str());

    buffer.transaction(|transaction| {
        for statement in &edit.statements {
            let line = format!("{}{indent}{statement}", config.line_terminator);
            transaction.insert(anchor, &line);
        }

        let range = match reparse(transaction.text()) {
            Some(tree) => node_range(&tree, statement_start),
            None => {
                tracing::debug!("edited text could not be reparsed");
                None
            }
        };
        let range = range.unwrap_or_else(|| TextRange::empty(statement_start));

        if let Err(error) = formatter.reformat(transaction, range) {
            tracing::warn!(%error, ?range, "reformatting the inserted code failed");
        }
    });
}

fn node_range<T: SyntaxTree>(tree: &T, offset: TextSize) -> Option<TextRange> {
    node_near(tree, offset).map(|node| node.range())
}
