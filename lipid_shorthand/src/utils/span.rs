//! Source location tracking for lipid names
//!
//! Lipid shorthand names are single-line, so a position is a byte offset plus a
//! 1-based character column. Spans are used by the tokenizer, the parser's error
//! reporting and the caret excerpts printed by the CLI.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a lipid name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Character column (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, column: u32) -> Self {
        Self { offset, column }
    }

    /// The starting position (offset 0, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            column: 1,
        }
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        Self {
            offset: self.offset + ch.len_utf8(),
            column: self.column + 1,
        }
    }

    /// Advance position by a string
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)
    }
}

/// A span of a lipid name from start (inclusive) to end (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a zero-width span, used for end of input
    pub fn empty_at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };

        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    /// Byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text for this span; empty when the span lies outside the input
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start.offset..self.end.offset).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.end.column > self.start.column + 1 {
            write!(f, "{}-{}", self.start.column, self.end.column - 1)
        } else {
            write!(f, "{}", self.start.column)
        }
    }
}

/// A value with its source location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Map the value while preserving the span
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Format an error message with a caret excerpt of the offending name
///
/// ```text
/// Error: unexpected '#'
///   --> column 8
///    |
///    | PE(18:0#16:1)
///    |        ^
/// ```
pub fn format_excerpt(source: &str, span: &Span, message: &str) -> String {
    let mut result = String::new();

    result.push_str(&format!("Error: {}\n", message));
    result.push_str(&format!("  --> column {}\n", span.start.column));
    result.push_str("   |\n");
    result.push_str(&format!("   | {}\n", source));

    let mut underline = String::from("   | ");
    for _ in 1..span.start.column {
        underline.push(' ');
    }
    let width = span.end.column.saturating_sub(span.start.column) as usize;
    for _ in 0..width.max(1) {
        underline.push('^');
    }

    result.push_str(&underline);
    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advances_by_characters() {
        let pos = Position::start().advance_str("PE(");
        assert_eq!(pos.offset, 3);
        assert_eq!(pos.column, 4);

        let pos = pos.advance('α');
        assert_eq!(pos.offset, 5);
        assert_eq!(pos.column, 5);
    }

    #[test]
    fn test_span_merge_and_slice() {
        let name = "PE(18:0/16:1)";
        let a = Span::new(Position::new(3, 4), Position::new(5, 6));
        let b = Span::new(Position::new(6, 7), Position::new(7, 8));
        let merged = a.merge(b);

        assert_eq!(merged.slice(name), "18:0");
        assert_eq!(merged.len(), 4);
        assert_eq!(merged.to_string(), "4-7");
    }

    #[test]
    fn test_slice_out_of_range_is_empty() {
        let span = Span::new(Position::new(10, 11), Position::new(12, 13));
        assert_eq!(span.slice("PC"), "");
    }

    #[test]
    fn test_format_excerpt_places_caret() {
        let span = Span::new(Position::new(7, 8), Position::new(8, 9));
        let excerpt = format_excerpt("PE(18:0#16:1)", &span, "unexpected '#'");

        assert!(excerpt.contains("--> column 8"));
        assert!(excerpt.ends_with("   |        ^\n"));
    }
}
