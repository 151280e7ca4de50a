use serde::{Deserialize, Serialize};

use std::ops::Range;

/// A line/column pair as reported by the template parser. Lines are
/// 1-based, columns are 0-based and count characters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: Position,
    pub end: Position,
}

impl SourceSpan {
    pub fn new(start: Position, end: Position) -> Self {
        SourceSpan { start, end }
    }

    /// Span for nodes that were not produced from source text.
    pub fn synthetic() -> Self {
        SourceSpan::default()
    }

    pub fn is_synthetic(self) -> bool {
        self == SourceSpan::default()
    }

    pub fn merge(self, other: SourceSpan) -> SourceSpan {
        if self.is_synthetic() {
            return other;
        }
        if other.is_synthetic() {
            return self;
        }
        SourceSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Converts the span into a byte range of `source`. Positions past the
    /// end of a line or of the source are clamped.
    pub fn to_range(self, source: &str) -> Range<usize> {
        let start = byte_offset(source, self.start);
        let end = byte_offset(source, self.end).max(start);
        start..end
    }
}

fn byte_offset(source: &str, position: Position) -> usize {
    if position.line == 0 {
        return 0;
    }
    let mut line = 1;
    let mut line_start = 0;
    for (index, ch) in source.char_indices() {
        if line == position.line {
            break;
        }
        if ch == '\n' {
            line += 1;
            line_start = index + 1;
        }
    }
    if line < position.line {
        return source.len();
    }
    let rest = &source[line_start..];
    let line_len = rest.find('\n').unwrap_or_else(|| rest.len());
    let column = rest[..line_len]
        .char_indices()
        .nth(position.column as usize)
        .map_or(line_len, |(index, _)| index);
    line_start + column
}
