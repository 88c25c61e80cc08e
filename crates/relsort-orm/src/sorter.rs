//! Sort application.
//!
//! [`RelationSorter`] drives a sort through its states: the column path is
//! parsed, one join is staged per relation hop, the terminal column is
//! validated on the last related model, and only then are the staged joins
//! and the ORDER BY applied to the query.

pub use relsort_conf::DEFAULT_MAX_RELATION_DEPTH;
use relsort_conf::SortSettings;
use relsort_query::SelectStatement;

use crate::error::{SortError, SortResult};
use crate::join::plan_join;
use crate::metadata::MetadataProvider;
use crate::path::RelationPath;
use crate::plan::SortPlan;
use crate::state::{SortDirection, SortRequest};
use crate::validate::{OrderTarget, resolve_target};

/// Why a sort was dropped without touching the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// The terminal column is neither sortable nor a known alias
	InvalidColumn,
	/// The column path has an empty segment
	MalformedPath,
	/// The column path exceeds the hop limit
	TooManyHops,
}

/// Result of a sort.
#[derive(Debug, Clone, PartialEq)]
pub enum SortOutcome {
	/// ORDER BY appended
	Applied {
		/// What the query is now ordered by
		target: OrderTarget,
		/// Direction used
		direction: SortDirection,
		/// Joins added to the query
		joins: usize,
	},
	/// Query left unchanged
	Skipped(SkipReason),
}

impl SortOutcome {
	/// Whether an ORDER BY was appended.
	pub fn is_applied(&self) -> bool {
		matches!(self, Self::Applied { .. })
	}
}

/// Capability of applying a [`SortRequest`] to a query.
pub trait Sortable {
	/// Apply `request` to `query`.
	///
	/// Invalid request input is absorbed as [`SortOutcome::Skipped`].
	/// Metadata errors ([`SortError::UnknownRelation`],
	/// [`SortError::UnsupportedRelationKind`], [`SortError::UnknownModel`])
	/// are returned. In both cases the query is unchanged.
	fn sort(&self, query: &mut SelectStatement, request: &SortRequest) -> SortResult<SortOutcome>;
}

/// Sorts queries of one model, following relation hops through a
/// [`MetadataProvider`].
///
/// # Examples
///
/// ```rust
/// use relsort_orm::prelude::*;
/// use relsort_query::prelude::*;
///
/// let registry = ModelRegistry::new()
///     .with_model(
///         ModelMeta::new("Post", "posts")
///             .relation(RelationDescriptor::belongs_to("author", "User", "author_id")),
///     )
///     .with_model(ModelMeta::new("User", "users").sortable(["name"]));
///
/// let mut query = Query::select();
/// query.from("posts").column("title");
///
/// let sorter = RelationSorter::new(&registry, "Post");
/// let outcome = sorter
///     .sort(&mut query, &SortRequest::new("author.name", SortDirection::Desc))
///     .unwrap();
/// assert!(outcome.is_applied());
///
/// let (sql, _) = PostgresQueryBuilder::new().build_select(&query);
/// assert_eq!(
///     sql,
///     r#"SELECT "posts"."title" FROM "posts" LEFT JOIN "users" ON "posts"."author_id" = "users"."id" ORDER BY "users"."name" DESC"#
/// );
/// ```
#[derive(Debug)]
pub struct RelationSorter<'a, P: ?Sized> {
	provider: &'a P,
	model: String,
	max_relation_depth: usize,
}

impl<'a, P> RelationSorter<'a, P>
where
	P: MetadataProvider + ?Sized,
{
	/// Create a sorter for `model`.
	pub fn new(provider: &'a P, model: impl Into<String>) -> Self {
		Self {
			provider,
			model: model.into(),
			max_relation_depth: DEFAULT_MAX_RELATION_DEPTH,
		}
	}

	/// Set the hop limit.
	pub fn with_max_relation_depth(mut self, depth: usize) -> Self {
		self.max_relation_depth = depth;
		self
	}

	/// Take the hop limit from `settings`.
	pub fn with_settings(self, settings: &SortSettings) -> Self {
		self.with_max_relation_depth(settings.max_relation_depth)
	}

	/// Model this sorter applies to.
	pub fn model(&self) -> &str {
		&self.model
	}

	/// Compute the mutations `request` would make, without applying them.
	///
	/// Returns `Ok(Err(reason))` when the sort would be skipped.
	pub fn plan(
		&self,
		query: &SelectStatement,
		request: &SortRequest,
	) -> SortResult<Result<SortPlan, SkipReason>> {
		let path = match RelationPath::parse(&request.column, self.max_relation_depth) {
			Ok(path) => path,
			Err(err) if err.is_input_error() => {
				tracing::debug!(model = %self.model, column = %request.column, error = %err, "sort skipped");
				return Ok(Err(match err {
					SortError::TooManyHops { .. } => SkipReason::TooManyHops,
					_ => SkipReason::MalformedPath,
				}));
			}
			Err(err) => return Err(err),
		};

		let mut current = self
			.provider
			.model(&self.model)
			.ok_or_else(|| SortError::UnknownModel {
				model: self.model.clone(),
			})?;
		let mut plan = SortPlan::new(query, current.table());
		for hop in &path.hops {
			current = plan_join(self.provider, query, &mut plan, current.name(), hop)?;
		}

		let table = plan.current_name(query);
		match resolve_target(self.provider, current, &table, query, &path.column) {
			Some(target) => {
				plan.set_order(target, request.direction);
				Ok(Ok(plan))
			}
			None => {
				tracing::debug!(
					model = current.name(),
					column = %path.column,
					"sort skipped: column is not orderable"
				);
				Ok(Err(SkipReason::InvalidColumn))
			}
		}
	}
}

impl<P> Sortable for RelationSorter<'_, P>
where
	P: MetadataProvider + ?Sized,
{
	fn sort(&self, query: &mut SelectStatement, request: &SortRequest) -> SortResult<SortOutcome> {
		let plan = match self.plan(query, request)? {
			Ok(plan) => plan,
			Err(reason) => return Ok(SortOutcome::Skipped(reason)),
		};
		let Some((target, direction)) = plan.order().cloned() else {
			return Ok(SortOutcome::Skipped(SkipReason::InvalidColumn));
		};

		let joins = plan.apply(query);
		tracing::debug!(
			model = %self.model,
			column = %request.column,
			direction = %direction,
			joins,
			"sort applied"
		);
		Ok(SortOutcome::Applied {
			target,
			direction,
			joins,
		})
	}
}
