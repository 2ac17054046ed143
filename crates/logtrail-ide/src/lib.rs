mod batch;
mod buffer;
mod config;
mod format;
mod indent;
mod insert;
mod resolve;
mod trail;

#[cfg(test)]
mod fixture;

pub use batch::{PendingEdit, aggregate};
pub use buffer::{Buffer, Cursor, Transaction};
pub use config::Config;
pub use format::{Formatter, Reindent};
pub use indent::spaces_for;
pub use insert::apply;
use logtrail_inputs::File;
use logtrail_syntax::{FileKind, SourceNode as _, SourceTree};
pub use resolve::{node_near, resolve};
use text_size::{TextRange, TextSize};
pub use trail::{ScopeTrail, build_trail};

/// Caret position as reported by an editor, before it is bound to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub offset: TextSize,
    pub selection: TextRange,
}

impl Caret {
    pub fn at(offset: TextSize) -> Self {
        Self { offset, selection: TextRange::empty(offset) }
    }
}

/// Single replacement turning one text into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: TextRange,
    pub insert: String,
}

impl Edit {
    /// Returns the smallest replacement of `before` that yields `after`.
    pub fn between(before: &str, after: &str) -> Self {
        let prefix = before
            .char_indices()
            .zip(after.chars())
            .find(|((_, old), new)| old != new)
            .map_or(before.len().min(after.len()), |((index, _), _)| index);

        let (old, new) = (&before[prefix..], &after[prefix..]);
        let suffix = old
            .chars()
            .rev()
            .zip(new.chars().rev())
            .take_while(|(old, new)| old == new)
            .map(|(old, _)| old.len_utf8())
            .sum::<usize>();

        let range = TextRange::new(
            TextSize::of(&before[..prefix]),
            TextSize::of(&before[..before.len() - suffix]),
        );
        Self { range, insert: after[prefix..after.len() - suffix].to_owned() }
    }
}

/// Parses `buffer`, collects a statement for every cursor and inserts them.
///
/// Returns `false`, leaving the buffer untouched, when no cursor sits on a
/// loggable identifier.
pub fn insert_console_log(
    buffer: &mut Buffer,
    kind: FileKind,
    cursors: &[Cursor],
    config: &Config,
) -> bool {
    let Some(tree) = SourceTree::parse(buffer.text(), kind) else {
        tracing::warn!(%kind, "parser gave up");
        return false;
    };
    let Some(edit) = aggregate(&tree, buffer, cursors, config) else {
        return false;
    };

    let formatter = Reindent::new(config.indent_unit.as_str());
    apply(buffer, &edit, config, &formatter, |text| SourceTree::parse(text, kind));
    true
}

/// What would be logged for one caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Range of the identifier under the caret.
    pub identifier: TextRange,
    pub trail: ScopeTrail,
    /// Generated statement, without indentation.
    pub statement: String,
}

/// Entry point for hosts: owns the file database and the settings.
#[derive(Default)]
pub struct Analysis {
    db: salsa::DatabaseImpl,
    config: Config,
}

impl Analysis {
    pub fn new(config: Config) -> Self {
        Self { db: salsa::DatabaseImpl::default(), config }
    }

    pub fn db(&self) -> &salsa::DatabaseImpl {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut salsa::DatabaseImpl {
        &mut self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Computes the edit inserting log statements for `carets` into `file`.
    ///
    /// `None` when the file kind is unsupported or no caret yields a
    /// statement.
    pub fn insert_log(&self, file: File, carets: &[Caret]) -> Option<Edit> {
        let kind = file.kind(&self.db)?;
        let text = file.text(&self.db);

        let mut buffer = Buffer::new(text);
        let cursors = bind(&buffer, carets);
        if !insert_console_log(&mut buffer, kind, &cursors, &self.config) {
            return None;
        }

        Some(Edit::between(text, buffer.text()))
    }

    /// Describes the statement each caret would produce, skipping carets that
    /// produce none.
    pub fn preview(&self, file: File, carets: &[Caret]) -> Vec<Preview> {
        let Some(kind) = file.kind(&self.db) else {
            return Vec::new();
        };
        let buffer = Buffer::new(file.text(&self.db));
        let Some(tree) = SourceTree::parse(buffer.text(), kind) else {
            return Vec::new();
        };

        bind(&buffer, carets)
            .iter()
            .filter_map(|cursor| {
                let identifier = resolve(&tree, cursor.offset)?;
                let trail = build_trail(&buffer, identifier, cursor)?;
                let statement = self.config.statement(&trail.label).trim_end().to_owned();
                Some(Preview { identifier: identifier.range(), trail, statement })
            })
            .collect()
    }
}

fn bind(buffer: &Buffer, carets: &[Caret]) -> Vec<Cursor> {
    carets.iter().map(|caret| Cursor::new(buffer, caret.offset, caret.selection)).collect()
}
