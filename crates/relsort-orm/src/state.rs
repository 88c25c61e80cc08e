//! Sort requests and the resolved sort state.
//!
//! A [`SortRequest`] is what the sorter consumes. A [`SortState`] is what
//! callers keep afterwards: the column and direction that were actually
//! requested, and whether they came from the request or from a default.

use std::collections::HashMap;
use std::fmt;

use relsort_conf::SortSettings;
use relsort_query::Order;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending
	#[default]
	Asc,
	/// Descending
	Desc,
}

impl SortDirection {
	/// Parse `asc` or `desc`, ignoring ASCII case.
	///
	/// # Examples
	///
	/// ```rust
	/// use relsort_orm::SortDirection;
	///
	/// assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
	/// assert_eq!(SortDirection::parse("descending"), None);
	/// ```
	pub fn parse(raw: &str) -> Option<Self> {
		if raw.eq_ignore_ascii_case("asc") {
			Some(Self::Asc)
		} else if raw.eq_ignore_ascii_case("desc") {
			Some(Self::Desc)
		} else {
			None
		}
	}

	/// Parse `raw`, falling back to `default` when it is absent or unrecognized.
	pub fn coerce(raw: Option<&str>, default: Self) -> Self {
		match raw {
			None => default,
			Some(value) => Self::parse(value).unwrap_or_else(|| {
				tracing::debug!(direction = value, fallback = %default, "unrecognized sort direction");
				default
			}),
		}
	}

	/// The opposite direction.
	pub fn toggle(self) -> Self {
		Order::from(self).reverse().into()
	}

	/// Lowercase name as used in query strings.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<SortDirection> for Order {
	fn from(direction: SortDirection) -> Self {
		match direction {
			SortDirection::Asc => Order::Asc,
			SortDirection::Desc => Order::Desc,
		}
	}
}

impl From<Order> for SortDirection {
	fn from(order: Order) -> Self {
		match order {
			Order::Asc => Self::Asc,
			Order::Desc => Self::Desc,
		}
	}
}

/// A single sort to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
	/// Column, possibly prefixed by relation hops (`author.profile.city`)
	pub column: String,
	/// Direction
	pub direction: SortDirection,
}

impl SortRequest {
	/// Create a request with an already parsed direction.
	pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			column: column.into(),
			direction,
		}
	}

	/// Create a request from raw values.
	///
	/// Returns `None` when `column` is absent or empty. An unrecognized
	/// direction falls back to `default_direction`.
	///
	/// # Examples
	///
	/// ```rust
	/// use relsort_orm::{SortDirection, SortRequest};
	///
	/// let req = SortRequest::from_raw(Some("name"), Some("sideways"), SortDirection::Asc).unwrap();
	/// assert_eq!(req.direction, SortDirection::Asc);
	/// assert!(SortRequest::from_raw(Some(""), None, SortDirection::Asc).is_none());
	/// ```
	pub fn from_raw(
		column: Option<&str>,
		direction: Option<&str>,
		default_direction: SortDirection,
	) -> Option<Self> {
		let column = column.filter(|c| !c.is_empty())?;
		Some(Self::new(
			column,
			SortDirection::coerce(direction, default_direction),
		))
	}
}

/// A model-level default sort, used when a request carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort {
	/// Column to sort by
	pub column: String,
	/// Raw direction; coerced like request input
	pub direction: Option<String>,
}

impl DefaultSort {
	/// Default sort on `column` with no explicit direction.
	pub fn new(column: impl Into<String>) -> Self {
		Self {
			column: column.into(),
			direction: None,
		}
	}

	/// Set the direction.
	pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
		self.direction = Some(direction.into());
		self
	}
}

/// Where a [`SortState`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortSource {
	/// Explicit request parameters
	Request,
	/// A configured default
	Default,
}

/// The current sort of a listing, as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
	/// Requested column path
	pub column: String,
	/// Resolved direction
	pub direction: SortDirection,
	/// Origin of the values
	pub source: SortSource,
}

impl SortState {
	/// Whether the state came from a configured default.
	pub fn is_default(&self) -> bool {
		self.source == SortSource::Default
	}

	/// Whether `column` is the sorted column.
	pub fn is_sorted_by(&self, column: &str) -> bool {
		self.column == column
	}

	/// The request to hand to a sorter.
	pub fn to_request(&self) -> SortRequest {
		SortRequest::new(self.column.clone(), self.direction)
	}

	/// Write the state into a request-scoped parameter map under the
	/// configured parameter names.
	pub fn merge_into(&self, params: &mut HashMap<String, String>, settings: &SortSettings) {
		params.insert(settings.sort_param.clone(), self.column.clone());
		params.insert(
			settings.direction_param.clone(),
			self.direction.as_str().to_string(),
		);
	}
}

/// Pick the sort to apply from request values or a default.
///
/// Request values win whenever a non-empty sort column is present. Otherwise
/// the default, if any, is used exactly as if it had been requested, and the
/// returned state is marked [`SortSource::Default`].
///
/// # Examples
///
/// ```rust
/// use relsort_orm::{DefaultSort, SortDirection, SortSource, resolve_sort};
///
/// let default = DefaultSort::new("created_at").with_direction("desc");
/// let state = resolve_sort(None, None, Some(&default), SortDirection::Asc).unwrap();
///
/// assert_eq!(state.column, "created_at");
/// assert_eq!(state.direction, SortDirection::Desc);
/// assert_eq!(state.source, SortSource::Default);
/// ```
pub fn resolve_sort(
	sort: Option<&str>,
	direction: Option<&str>,
	default: Option<&DefaultSort>,
	default_direction: SortDirection,
) -> Option<SortState> {
	if let Some(request) = SortRequest::from_raw(sort, direction, default_direction) {
		return Some(SortState {
			column: request.column,
			direction: request.direction,
			source: SortSource::Request,
		});
	}

	let default = default?;
	let request = SortRequest::from_raw(
		Some(default.column.as_str()),
		default.direction.as_deref(),
		default_direction,
	)?;
	tracing::debug!(column = %request.column, direction = %request.direction, "using default sort");
	Some(SortState {
		column: request.column,
		direction: request.direction,
		source: SortSource::Default,
	})
}
