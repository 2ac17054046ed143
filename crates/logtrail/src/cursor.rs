use std::str::FromStr;

use logtrail_ide::{Buffer, Caret};
use text_size::{TextRange, TextSize};

/// One-based `LINE:COL` position typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    line: u32,
    col: u32,
}

/// `LINE:COL` caret, or `LINE:COL-LINE:COL` selection with the caret at its
/// end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CursorArg {
    start: Position,
    end: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum CursorError {
    #[error("expected `LINE:COL` or `LINE:COL-LINE:COL`, got `{0}`")]
    Syntax(String),
    #[error("lines and columns start at 1")]
    Zero,
    #[error("line {0} is past the end of the file")]
    LineOutOfRange(u32),
}

impl FromStr for Position {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || CursorError::Syntax(s.to_owned());
        let (line, col) = s.split_once(':').ok_or_else(syntax)?;
        let line = line.trim().parse::<u32>().ok().ok_or_else(syntax)?;
        let col = col.trim().parse::<u32>().ok().ok_or_else(syntax)?;
        if line == 0 || col == 0 {
            return Err(CursorError::Zero);
        }
        Ok(Self { line, col })
    }
}

impl FromStr for CursorArg {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((start, end)) => Ok(Self { start: start.parse()?, end: Some(end.parse()?) }),
            None => Ok(Self { start: s.parse()?, end: None }),
        }
    }
}

impl Position {
    /// Byte offset in the text; columns past the end of the line are clamped.
    fn offset(self, buffer: &Buffer) -> Result<TextSize, CursorError> {
        let range =
            buffer.line_range(self.line - 1).ok_or(CursorError::LineOutOfRange(self.line))?;
        let col = TextSize::from(self.col - 1);
        Ok(range.start() + col.min(range.len()))
    }
}

impl CursorArg {
    pub(crate) fn to_caret(self, buffer: &Buffer) -> Result<Caret, CursorError> {
        let start = self.start.offset(buffer)?;
        let Some(end) = self.end else {
            return Ok(Caret::at(start));
        };

        let end = end.offset(buffer)?;
        Ok(Caret { offset: end, selection: TextRange::new(start.min(end), start.max(end)) })
    }
}
