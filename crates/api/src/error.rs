use crate::models::span::TextSpan;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edits overlap: {}..{} and {}..{}", first.start, first.end, second.start, second.end)]
    Overlap { first: TextSpan, second: TextSpan },
    #[error("edit {start}..{end} is outside a source of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("edit {start}..{end} does not fall on a UTF-8 character boundary")]
    NotCharBoundary { start: usize, end: usize },
}

pub type EditResult<T> = std::result::Result<T, EditError>;
