//! Request layer errors.

use relsort_orm::SortError;

/// Error raised while turning a request into a sort.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
	#[error("Invalid filter parameter: {0}")]
	InvalidParameter(String),

	#[error("Sort error: {0}")]
	Sort(#[from] SortError),
}

/// Result alias for request layer operations.
pub type FilterResult<T> = Result<T, FilterError>;
