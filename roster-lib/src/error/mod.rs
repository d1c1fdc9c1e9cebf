//! Error types

mod api;

pub use api::*;

/// Errors returned by the roster client and data source.
///
/// Filtering, sorting and pagination are total and never produce one of
/// these; only loading the user list can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The users endpoint could not be reached or answered badly.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Returns `true` if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
        }
    }
}
