use bsfs_api::ApiError;
use bsfs_schema::EntityKind;
use thiserror::Error;

/// Failure to resolve or list a path.
///
/// The first two variants are decided from the path alone,
/// before any backend call.
/// None of them are retried or recovered from inside this crate.
#[derive(Debug, Error)]
pub enum BrowseError
{
    /// A segment is not a category reachable at its position,
    /// or the path is empty.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A segment in an entity position is not
    /// a well-formed identifier for that kind of entity.
    #[error("Invalid identifier {id:?} for {kind:?}")]
    InvalidIdentifier{kind: EntityKind, id: String},

    /// The path is well-formed but the backend has no such object,
    /// or refuses to show it.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Listing was requested on a leaf entity such as a file.
    #[error("Not listable: {0}")]
    NotListable(String),

    /// The backend could not be reached or answered nonsense.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[source] ApiError),
}

impl BrowseError
{
    /// Whether this error means that the path names nothing,
    /// for callers that do not distinguish why.
    pub fn is_not_found(&self) -> bool
    {
        matches!(self, Self::InvalidPath(_)
                     | Self::InvalidIdentifier{..}
                     | Self::ResourceNotFound(_))
    }
}

impl From<ApiError> for BrowseError
{
    fn from(err: ApiError) -> Self
    {
        if err.is_not_found() {
            Self::ResourceNotFound(err.to_string())
        } else {
            Self::BackendUnavailable(err)
        }
    }
}

/// Result type for browsing operations.
pub type Result<T> = std::result::Result<T, BrowseError>;
