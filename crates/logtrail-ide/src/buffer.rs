//! In-memory text surface the pipeline reads from and edits.

use logtrail_inputs::{LineCol, LineIndex};
use text_size::{TextRange, TextSize};

/// Text of one document with line lookups and undoable transactions.
pub struct Buffer {
    text: String,
    line_index: LineIndex,
    undo_stack: Vec<String>,
}

impl Buffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self { text, line_index, undo_stack: Vec::new() }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the zero-based line containing `offset`, clamped to the text.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        self.line_index.line_col(offset.min(self.len())).line
    }

    /// Returns the range of `line` without its terminator.
    pub fn line_range(&self, line: u32) -> Option<TextRange> {
        let start = self.line_index.offset(LineCol { line, col: 0 })?;
        let rest = self.text.get(usize::from(start)..)?;
        let line = rest.find('\n').map_or(rest, |end| &rest[..end]);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Some(TextRange::at(start, TextSize::of(line)))
    }

    pub fn line_text(&self, line: u32) -> Option<&str> {
        self.slice(self.line_range(line)?)
    }

    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.text.get(usize::from(range.start())..usize::from(range.end()))
    }

    /// Runs `f` as one undoable step.
    ///
    /// Every change made through the transaction is reverted together by a
    /// single [`Buffer::undo`]. A transaction that changes nothing leaves no
    /// undo entry.
    pub fn transaction<R>(&mut self, f: impl FnOnce(&mut Transaction<'_>) -> R) -> R {
        let mut transaction = Transaction { buffer: self, snapshot: None };
        let result = f(&mut transaction);
        if let Some(snapshot) = transaction.snapshot {
            self.undo_stack.push(snapshot);
        }
        result
    }

    /// Reverts the last transaction. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        let Some(text) = self.undo_stack.pop() else {
            return false;
        };
        self.set_text(text);
        true
    }

    /// Clamps `offset` to the text and moves it forward to a char boundary.
    pub(crate) fn clamp(&self, offset: TextSize) -> TextSize {
        let mut offset = usize::from(offset.min(self.len()));
        while !self.text.is_char_boundary(offset) {
            offset += 1;
        }
        TextSize::from(offset as u32)
    }

    fn set_text(&mut self, text: String) {
        self.line_index = LineIndex::new(&text);
        self.text = text;
    }
}

/// Mutable access to a [`Buffer`] inside [`Buffer::transaction`].
pub struct Transaction<'b> {
    buffer: &'b mut Buffer,
    snapshot: Option<String>,
}

impl Transaction<'_> {
    #[inline]
    pub fn buffer(&self) -> &Buffer {
        self.buffer
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn insert(&mut self, offset: TextSize, text: &str) {
        self.replace(TextRange::empty(offset), text);
    }

    pub fn replace(&mut self, range: TextRange, text: &str) {
        let start = self.buffer.clamp(range.start());
        let end = self.buffer.clamp(range.end()).max(start);
        if start == end && text.is_empty() {
            return;
        }

        if self.snapshot.is_none() {
            self.snapshot = Some(self.buffer.text.clone());
        }

        let mut new_text = std::mem::take(&mut self.buffer.text);
        new_text.replace_range(usize::from(start)..usize::from(end), text);
        self.buffer.set_text(new_text);
    }
}

/// Position of one caret, with the line end and selection it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub offset: TextSize,
    /// End of the caret's line, without the terminator.
    pub line_end: TextSize,
    /// Selected range; empty when nothing is selected.
    pub selection: TextRange,
}

impl Cursor {
    pub fn new(buffer: &Buffer, offset: TextSize, selection: TextRange) -> Self {
        let offset = offset.min(buffer.len());
        let line_end = buffer.line_range(buffer.line_of(offset)).map_or(buffer.len(), TextRange::end);
        Self { offset, line_end, selection }
    }

    /// Caret without a selection.
    pub fn at(buffer: &Buffer, offset: TextSize) -> Self {
        Self::new(buffer, offset, TextRange::empty(offset))
    }
}
