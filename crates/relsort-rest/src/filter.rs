//! Ordering filter.
//!
//! [`OrderingFilter`] reads the sort parameters of a request, falls back to
//! a default sort, and applies the result to a query through a
//! [`RelationSorter`].

use std::collections::HashMap;

use relsort_conf::SortSettings;
use relsort_orm::{
	DefaultSort, MetadataProvider, RelationSorter, SortOutcome, SortState, Sortable,
};
use relsort_query::SelectStatement;

use crate::error::FilterResult;
use crate::params::SortParams;

/// Applies request sorting to queries of one model.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use relsort_orm::{DefaultSort, ModelMeta, ModelRegistry, SortDirection};
/// use relsort_query::Query;
/// use relsort_rest::OrderingFilter;
///
/// let registry = ModelRegistry::new()
///     .with_model(ModelMeta::new("Post", "posts").sortable(["title", "created_at"]));
/// let filter = OrderingFilter::new(&registry, "Post")
///     .with_default_sort(DefaultSort::new("created_at").with_direction("desc"));
///
/// let mut query = Query::select();
/// query.from("posts");
/// let state = filter.filter_query(&HashMap::new(), &mut query).unwrap().unwrap();
///
/// assert_eq!(state.column, "created_at");
/// assert_eq!(state.direction, SortDirection::Desc);
/// assert_eq!(query.orders().len(), 1);
/// ```
#[derive(Debug)]
pub struct OrderingFilter<'a, P: ?Sized> {
	provider: &'a P,
	model: String,
	settings: SortSettings,
	default_sort: Option<DefaultSort>,
}

impl<'a, P> OrderingFilter<'a, P>
where
	P: MetadataProvider + ?Sized,
{
	/// Create a filter for `model` with default settings.
	pub fn new(provider: &'a P, model: impl Into<String>) -> Self {
		Self {
			provider,
			model: model.into(),
			settings: SortSettings::default(),
			default_sort: None,
		}
	}

	/// Use `settings`.
	pub fn with_settings(mut self, settings: SortSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Sort applied when the request carries none. Overrides the model's own
	/// default sort.
	pub fn with_default_sort(mut self, default: DefaultSort) -> Self {
		self.default_sort = Some(default);
		self
	}

	/// Settings in use.
	pub fn settings(&self) -> &SortSettings {
		&self.settings
	}

	/// Default sort in effect: the filter's own, else the model's.
	pub fn effective_default(&self) -> Option<&DefaultSort> {
		self.default_sort.as_ref().or_else(|| {
			self.provider
				.model(&self.model)
				.and_then(|model| model.get_default_sort())
		})
	}

	/// Sort `query` according to decoded query parameters.
	///
	/// Returns the sort state the presentation layer should show, or `None`
	/// when neither the request nor a default names a column.
	pub fn filter_query(
		&self,
		query_params: &HashMap<String, String>,
		query: &mut SelectStatement,
	) -> FilterResult<Option<SortState>> {
		let params = SortParams::from_query(query_params, &self.settings);
		self.apply_params(&params, query)
			.map(|applied| applied.map(|(state, _)| state))
	}

	/// Sort `query` according to a raw query string.
	pub fn filter_query_string(
		&self,
		query_string: &str,
		query: &mut SelectStatement,
	) -> FilterResult<Option<SortState>> {
		let params = SortParams::from_query_string(query_string, &self.settings)?;
		self.apply_params(&params, query)
			.map(|applied| applied.map(|(state, _)| state))
	}

	/// Sort `query` and write a default sort back into `query_params`.
	///
	/// For callers that keep request parameters in a request-scoped map and
	/// expect a default sort to be visible there afterwards.
	pub fn filter_and_merge(
		&self,
		query_params: &mut HashMap<String, String>,
		query: &mut SelectStatement,
	) -> FilterResult<Option<SortState>> {
		let state = self.filter_query(query_params, query)?;
		if let Some(state) = state.as_ref().filter(|s| s.is_default()) {
			state.merge_into(query_params, &self.settings);
		}
		Ok(state)
	}

	/// Sort `query` according to already extracted parameters.
	///
	/// Returns the state together with the sorter's outcome.
	pub fn apply_params(
		&self,
		params: &SortParams,
		query: &mut SelectStatement,
	) -> FilterResult<Option<(SortState, SortOutcome)>> {
		let Some(state) = params.resolve(self.effective_default(), &self.settings) else {
			return Ok(None);
		};

		let sorter = RelationSorter::new(self.provider, self.model.as_str()).with_settings(&self.settings);
		let outcome = sorter.sort(query, &state.to_request())?;
		if !outcome.is_applied() {
			tracing::debug!(model = %self.model, column = %state.column, ?outcome, "request sort ignored");
		}
		Ok(Some((state, outcome)))
	}
}
