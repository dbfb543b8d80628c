use thiserror::Error;

/// Caller mistakes rejected before any block is generated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("A playlist needs at least one block")]
    NoBlocks,

    #[error("Duration must not be negative (got {0} minutes)")]
    NegativeDuration(i64),

    #[error("Block index {index} is out of range for a playlist with {count} blocks")]
    BlockIndexOutOfRange { index: usize, count: usize },
}
