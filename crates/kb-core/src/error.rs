use crate::entity::{ItemId, LocationId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading content or manipulating a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The content document is not valid JSON for the content schema.
    #[error("invalid content: {0}")]
    Parse(#[from] serde_json::Error),

    /// The content file could not be read.
    #[error("cannot read content file: {0}")]
    Io(#[from] std::io::Error),

    /// The start location named by the content does not exist.
    #[error("start location \"{0}\" is not defined")]
    MissingStart(LocationId),

    /// The requested item does not exist in the world.
    #[error("item not found: {0}")]
    UnknownItem(ItemId),

    /// The requested location does not exist in the world.
    #[error("location not found: {0}")]
    UnknownLocation(LocationId),
}
