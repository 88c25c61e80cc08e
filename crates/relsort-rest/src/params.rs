//! Extraction of sort parameters from a request.

use std::collections::HashMap;

use relsort_conf::SortSettings;
use relsort_orm::{DefaultSort, SortState, resolve_sort};
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// Raw sort parameters of a request.
///
/// Empty values are treated as absent.
///
/// # Examples
///
/// ```rust
/// use relsort_conf::SortSettings;
/// use relsort_rest::SortParams;
///
/// let params = SortParams::from_query_string("?page=2&sort=author.name&direction=DESC", &SortSettings::default())
///     .unwrap();
///
/// assert_eq!(params.sort.as_deref(), Some("author.name"));
/// assert_eq!(params.direction.as_deref(), Some("DESC"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
	/// Sort column path
	pub sort: Option<String>,
	/// Raw direction
	pub direction: Option<String>,
}

impl SortParams {
	/// Read the configured parameters from decoded query parameters.
	pub fn from_query(query_params: &HashMap<String, String>, settings: &SortSettings) -> Self {
		let get = |name: &str| {
			query_params
				.get(name)
				.filter(|value| !value.is_empty())
				.cloned()
		};
		Self {
			sort: get(&settings.sort_param),
			direction: get(&settings.direction_param),
		}
	}

	/// Read the configured parameters from a raw query string.
	///
	/// A leading `?` is ignored. When a parameter repeats, the last value wins.
	pub fn from_query_string(query: &str, settings: &SortSettings) -> FilterResult<Self> {
		let pairs: Vec<(String, String)> =
			serde_urlencoded::from_str(query.strip_prefix('?').unwrap_or(query))
				.map_err(|e| FilterError::InvalidParameter(e.to_string()))?;
		let query_params: HashMap<String, String> = pairs.into_iter().collect();
		Ok(Self::from_query(&query_params, settings))
	}

	/// Whether a sort column was supplied.
	pub fn has_sort(&self) -> bool {
		self.sort.is_some()
	}

	/// Resolve these parameters, falling back to `default`.
	pub fn resolve(&self, default: Option<&DefaultSort>, settings: &SortSettings) -> Option<SortState> {
		resolve_sort(
			self.sort.as_deref(),
			self.direction.as_deref(),
			default,
			settings.default_direction.into(),
		)
	}
}
