use repograph_graph::SourceSpan;

/// Byte offset to line/column translation for one source text.
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(newline_offsets(source));
        Self {
            source,
            line_starts,
        }
    }

    /// 1-indexed line and 0-indexed character column of `offset`.
    pub fn position(&self, offset: u32) -> (u32, u32) {
        let offset = (offset as usize).min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..offset)
            .map_or(offset - start, |s| s.chars().count());
        (line as u32 + 1, column as u32)
    }

    pub fn line(&self, offset: u32) -> u32 {
        self.position(offset).0
    }

    pub fn span(&self, start: u32, end: u32) -> SourceSpan {
        SourceSpan::new(self.position(start), self.position(end))
    }
}

fn newline_offsets(source: &str) -> impl Iterator<Item = usize> + '_ {
    source
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'\n')
        .map(|(idx, _)| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_line_one_based() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.position(0), (1, 0));
        assert_eq!(index.position(1), (1, 1));
        assert_eq!(index.position(3), (2, 0));
        assert_eq!(index.position(7), (4, 0));
    }

    #[test]
    fn columns_count_characters() {
        let index = LineIndex::new("é = f()");
        assert_eq!(index.position(4), (1, 3));
    }

    #[test]
    fn offsets_past_end_are_clamped() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.position(100), (2, 1));
    }
}
