//! Sort resolution errors.

/// Error raised while resolving a sort column against model metadata.
///
/// Input-shape errors ([`MalformedColumnPath`](Self::MalformedColumnPath),
/// [`TooManyHops`](Self::TooManyHops)) come from untrusted request values and
/// are absorbed by the sorter. The remaining variants indicate a metadata or
/// programming mistake and are propagated to the caller.
///
/// # Examples
///
/// ```rust
/// use relsort_orm::SortError;
///
/// let err = SortError::UnknownRelation {
///     model: "Post".to_string(),
///     relation: "editor".to_string(),
/// };
/// assert!(!err.is_input_error());
/// assert_eq!(err.to_string(), "Relation `editor` is not defined on model `Post`");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
	/// The column path has an empty segment
	#[error("Malformed column path `{path}`: empty segment")]
	MalformedColumnPath { path: String },

	/// The column path has more relation hops than allowed
	#[error("Column path `{path}` has {hops} relation hops, the limit is {limit}")]
	TooManyHops {
		path: String,
		hops: usize,
		limit: usize,
	},

	/// No metadata is registered for the model
	#[error("Model `{model}` is not registered")]
	UnknownModel { model: String },

	/// The relation is not defined on the model
	#[error("Relation `{relation}` is not defined on model `{model}`")]
	UnknownRelation { model: String, relation: String },

	/// The relation can yield more than one row per parent row
	#[error("Relation `{relation}` of kind `{kind}` is not supported for sorting")]
	UnsupportedRelationKind { relation: String, kind: String },
}

impl SortError {
	/// Whether the error stems from the shape of request input.
	pub fn is_input_error(&self) -> bool {
		matches!(
			self,
			Self::MalformedColumnPath { .. } | Self::TooManyHops { .. }
		)
	}
}

/// Result alias for sort operations.
pub type SortResult<T> = Result<T, SortError>;
