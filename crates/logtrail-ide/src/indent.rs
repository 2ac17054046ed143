use text_size::{TextRange, TextSize};

use crate::Buffer;

/// Width of the leading whitespace of the line block spanned by `start..end`.
///
/// The block runs from the start of the first line to the end of the last
/// one. The whitespace run may cross line breaks, so a block starting on a
/// blank line also counts the next line's indentation. Returns 0 when the
/// lines cannot be looked up.
pub fn spaces_for(buffer: &Buffer, start: TextSize, end: TextSize) -> usize {
    let first = buffer.line_of(start.min(end));
    let last = buffer.line_of(start.max(end));

    let (Some(first), Some(last)) = (buffer.line_range(first), buffer.line_range(last)) else {
        return 0;
    };
    let Some(block) = buffer.slice(TextRange::new(first.start(), last.end())) else {
        return 0;
    };

    block.len() - block.trim_start_matches(is_whitespace).len()
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::spaces_for;
    use crate::Buffer;

    #[test]
    fn indentation_of_the_line() {
        let buffer = Buffer::new("if (ok) {\n    run();\n}\n");

        assert_eq!(spaces_for(&buffer, 14.into(), 17.into()), 4);
        assert_eq!(spaces_for(&buffer, 0.into(), 0.into()), 0);
    }

    #[test]
    fn idempotent() {
        let buffer = Buffer::new("  a;\n");
        let first = spaces_for(&buffer, 2.into(), 4.into());
        assert_eq!(first, spaces_for(&buffer, 2.into(), 4.into()));
        assert_eq!(first, 2);
    }

    #[test]
    fn reversed_and_out_of_range_offsets() {
        let buffer = Buffer::new("\t\tx = 1;");
        assert_eq!(spaces_for(&buffer, 5.into(), 2.into()), 2);
        assert_eq!(spaces_for(&buffer, 100.into(), TextSize::from(200)), 2);
    }

    #[test]
    fn blank_first_line_runs_into_the_next() {
        let buffer = Buffer::new("  \n    bar();\n");
        assert_eq!(spaces_for(&buffer, 0.into(), 8.into()), 7);
    }

    #[test]
    fn empty_buffer() {
        let buffer = Buffer::new("");
        assert_eq!(spaces_for(&buffer, 0.into(), 0.into()), 0);
    }
}
