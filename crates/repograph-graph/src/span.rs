use std::fmt;

use serde::{Deserialize, Serialize};

/// Line/column range of a declaration within its source file.
///
/// Lines are 1-indexed, columns are 0-indexed character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpan {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    /// Construct a span from start and end positions.
    pub fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");

        Self {
            start_line: start.0,
            start_column: start.1,
            end_line: end.0,
            end_column: end.1,
        }
    }

    /// A span covering a single line, used by line-oriented extractors.
    pub fn line(line: u32) -> Self {
        Self::new((line, 0), (line, 0))
    }

    /// Number of lines the span touches.
    pub fn line_count(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Check whether the span contains a line.
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_span() {
        let span = SourceSpan::line(12);
        assert_eq!(span.line_count(), 1);
        assert!(span.contains_line(12));
        assert!(!span.contains_line(13));
    }

    #[test]
    fn serializes_camel_case() {
        let span = SourceSpan::new((1, 0), (3, 1));
        let json = serde_json::to_value(span).unwrap();
        assert_eq!(json["startLine"], 1);
        assert_eq!(json["endColumn"], 1);
    }
}
