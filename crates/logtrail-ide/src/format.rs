use anyhow::Context as _;
use text_size::{TextRange, TextSize};

use crate::{Buffer, Transaction};

/// Reformats a region of freshly inserted code.
pub trait Formatter {
    /// Edits the lines covering `range` through `transaction`.
    fn reformat(&self, transaction: &mut Transaction<'_>, range: TextRange) -> anyhow::Result<()>;
}

/// Line-based formatter that only touches whitespace.
///
/// The first line of the region is aligned with the previous non-blank line,
/// one level deeper when that line opens a bracket. Trailing whitespace is
/// removed from every line of the region.
#[derive(Debug, Clone)]
pub struct Reindent {
    indent_unit: String,
}

impl Reindent {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self { indent_unit: indent_unit.into() }
    }

    /// Indentation expected for the line following `line`'s nearest
    /// non-blank predecessor.
    fn indent_after(&self, buffer: &Buffer, line: u32) -> String {
        let previous = (0..line)
            .rev()
            .filter_map(|line| buffer.line_text(line))
            .find(|text| !text.trim().is_empty());

        let Some(previous) = previous else {
            return String::new();
        };

        let mut indent = leading_whitespace(previous).to_owned();
        if previous.trim_end().ends_with(['{', '(', '[']) {
            indent.push_str(&self.indent_unit);
        }
        indent
    }
}

impl Formatter for Reindent {
    fn reformat(&self, transaction: &mut Transaction<'_>, range: TextRange) -> anyhow::Result<()> {
        let buffer = transaction.buffer();
        let first = buffer.line_of(range.start());
        let last = buffer.line_of(range.end());

        let mut edits = Vec::new();
        for line in first..=last {
            let line_range =
                buffer.line_range(line).with_context(|| format!("line {line} is out of range"))?;
            let text = &buffer.text()[line_range];

            let trimmed = text.trim_end();
            if trimmed.len() != text.len() {
                let start = line_range.start() + TextSize::of(trimmed);
                edits.push((TextRange::new(start, line_range.end()), String::new()));
            }

            if line == first && !trimmed.is_empty() {
                let current = leading_whitespace(text);
                let expected = self.indent_after(buffer, line);
                if current != expected {
                    edits.push((TextRange::at(line_range.start(), TextSize::of(current)), expected));
                }
            }
        }

        edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start()));
        for (range, text) in edits {
            transaction.replace(range, &text);
        }

        Ok(())
    }
}

fn leading_whitespace(text: &str) -> &str {
    &text[..text.len() - text.trim_start().len()]
}
