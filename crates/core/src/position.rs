//! Byte offsets to LSP coordinates.
//!
//! LSP positions count characters in UTF-16 code units, while every span the
//! analysis produces is a byte offset into the UTF-8 source.

use lsp_types::{Position, Range, TextEdit};
use varscope_api::models::{RewriteEdit, TextSpan};

pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offsets past the end clamp to the end of the source.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let character = self
            .source
            .get(start..offset)
            .map(|prefix| prefix.encode_utf16().count())
            .unwrap_or(0);
        Position::new(line as u32, character as u32)
    }

    pub fn range(&self, span: TextSpan) -> Range {
        Range::new(self.position(span.start), self.position(span.end))
    }

    pub fn text_edit(&self, edit: &RewriteEdit) -> TextEdit {
        TextEdit::new(self.range(edit.span), edit.replacement.clone())
    }

    /// Inverse of [`LineIndex::position`]. A character past the end of the
    /// line lands on the line end; a line past the end of the file is `None`.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());
        let text = self.source[start..end].trim_end_matches('\r');

        let mut utf16 = 0;
        let mut bytes = 0;
        for c in text.chars() {
            if utf16 >= position.character as usize {
                break;
            }
            utf16 += c.len_utf16();
            bytes += c.len_utf8();
        }
        Some(start + bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_count_utf16_units() {
        let src = "String s = \"\u{1F600}\";\nvar x = 1;\n";
        let index = LineIndex::new(src);
        assert_eq!(index.line_count(), 3);

        let semi = src.find(';').unwrap();
        // The emoji is four bytes but two UTF-16 units.
        assert_eq!(index.position(semi), Position::new(0, 15));

        let var = src.find("var").unwrap();
        assert_eq!(index.position(var), Position::new(1, 0));
    }

    #[test]
    fn offset_inverts_position() {
        let src = "int \u{e9}t\u{e9} = 1;\nlong y = 2;";
        let index = LineIndex::new(src);
        for offset in src.char_indices().map(|(i, _)| i) {
            assert_eq!(index.offset(index.position(offset)), Some(offset));
        }
        assert_eq!(index.offset(Position::new(5, 0)), None);
        assert_eq!(index.offset(Position::new(0, 99)), src.find('\n'));
    }

    #[test]
    fn offset_past_line_end_stops_before_crlf() {
        let src = "int a = 1;\r\nint b = 2;\r\n";
        let index = LineIndex::new(src);
        assert_eq!(index.offset(Position::new(0, 99)), src.find('\r'));
        assert_eq!(index.offset(Position::new(1, 0)), src.find("int b"));
    }

    #[test]
    fn edits_become_text_edits() {
        let src = "class A {\n  String s = \"\";\n}";
        let index = LineIndex::new(src);
        let start = src.find("String").unwrap();
        let edit = RewriteEdit::new(TextSpan::new(start, start + 6), "var");
        let lsp = index.text_edit(&edit);
        assert_eq!(lsp.new_text, "var");
        assert_eq!(lsp.range.start, Position::new(1, 2));
        assert_eq!(lsp.range.end, Position::new(1, 8));
    }
}
