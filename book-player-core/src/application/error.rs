use crate::domain::PageIndex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("Page {index} out of range (book has {count} pages)")]
    PageOutOfRange { index: PageIndex, count: usize },

    #[error("Book has no pages")]
    EmptyBook,
}

pub type Result<T> = std::result::Result<T, PlayerError>;
