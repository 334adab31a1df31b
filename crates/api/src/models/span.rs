use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into the original source text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Two spans overlap when they share at least one byte.
    /// Adjacent spans (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Zero-based line/column range; columns are byte offsets within the line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    pub fn contains(&self, line: usize, col: usize) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }
        if line == self.start_line && col < self.start_col {
            return false;
        }
        if line == self.end_line && col > self.end_col {
            return false;
        }
        true
    }
}

/// Where a declaration lives in the file, in both coordinate systems.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct SourceLocation {
    pub span: TextSpan,
    pub range: Range,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_spans_do_not_overlap() {
        let a = TextSpan::new(0, 4);
        let b = TextSpan::new(4, 8);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&TextSpan::new(3, 5)));
    }

    #[test]
    fn range_contains_is_inclusive_at_end() {
        let r = Range {
            start_line: 1,
            start_col: 4,
            end_line: 1,
            end_col: 10,
        };
        assert!(r.contains(1, 4));
        assert!(r.contains(1, 10));
        assert!(!r.contains(1, 3));
        assert!(!r.contains(2, 0));
    }
}
