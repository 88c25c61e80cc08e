//! Terminal column validation.

use relsort_query::{ColumnRef, OrderKey, SelectStatement};
use serde::{Deserialize, Serialize};

use crate::metadata::{MetadataProvider, ModelMeta};

/// What a validated sort orders by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderTarget {
	/// A physical column, qualified by its table or alias
	Column {
		/// Table name or alias
		table: String,
		/// Column name
		column: String,
	},
	/// A computed select alias, ordered by bare name
	Alias(String),
}

impl OrderTarget {
	/// ORDER BY key for this target.
	pub fn to_order_key(&self) -> OrderKey {
		match self {
			Self::Column { table, column } => {
				OrderKey::Column(ColumnRef::table_column(table, column))
			}
			Self::Alias(alias) => OrderKey::Alias(alias.clone()),
		}
	}
}

/// Computed aliases declared by raw select expressions of `query`.
pub fn computed_aliases(query: &SelectStatement) -> Vec<&str> {
	query
		.selects()
		.iter()
		.filter_map(|select| select.computed_alias())
		.collect()
}

/// Resolve `column` on `model` into an order target.
///
/// `table` is the name `model`'s table is visible under in the query (its
/// alias when aliased). Checks, in order:
///
/// 1. the model's sortable allow-list if declared, else the schema;
/// 2. the model's alias allow-list if declared, else the computed aliases
///    of the query's select list.
///
/// Returns `None` when nothing matches.
pub fn resolve_target<P>(
	provider: &P,
	model: &ModelMeta,
	table: &str,
	query: &SelectStatement,
	column: &str,
) -> Option<OrderTarget>
where
	P: MetadataProvider + ?Sized,
{
	let column_exists = match model.get_sortable() {
		Some(allowed) => allowed.contains(column),
		None => provider.has_column(model.table(), column),
	};
	if column_exists {
		return Some(OrderTarget::Column {
			table: table.to_string(),
			column: column.to_string(),
		});
	}

	let alias_exists = match model.get_sortable_aliases() {
		Some(allowed) => allowed.contains(column),
		None => computed_aliases(query).contains(&column),
	};
	alias_exists.then(|| OrderTarget::Alias(column.to_string()))
}

/// Whether `column` can be ordered on `model`.
///
/// # Examples
///
/// ```rust
/// use relsort_orm::{ModelMeta, ModelRegistry, is_orderable};
/// use relsort_query::Query;
///
/// let registry = ModelRegistry::new();
/// let model = ModelMeta::new("Post", "posts").sortable(["title"]);
/// let mut query = Query::select();
/// query.from("posts").expr("COUNT(comments.id) AS comment_count");
///
/// assert!(is_orderable(&registry, &model, &query, "title"));
/// assert!(is_orderable(&registry, &model, &query, "comment_count"));
/// assert!(!is_orderable(&registry, &model, &query, "body"));
/// ```
pub fn is_orderable<P>(
	provider: &P,
	model: &ModelMeta,
	query: &SelectStatement,
	column: &str,
) -> bool
where
	P: MetadataProvider + ?Sized,
{
	resolve_target(provider, model, model.table(), query, column).is_some()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::metadata::{ModelRegistry, StaticSchema};
	use relsort_query::Query;
	use rstest::{fixture, rstest};

	#[fixture]
	fn registry() -> ModelRegistry {
		ModelRegistry::new().with_schema(StaticSchema::new().table("posts", ["id", "title", "body"]))
	}

	#[fixture]
	fn query() -> SelectStatement {
		let mut query = Query::select();
		query
			.from("posts")
			.column("id")
			.expr("COUNT(comments.id) AS \"comment_count\"");
		query
	}

	#[rstest]
	fn test_allow_list_is_authoritative(registry: ModelRegistry, query: SelectStatement) {
		let model = ModelMeta::new("Post", "posts").sortable(["title"]);

		assert!(is_orderable(&registry, &model, &query, "title"));
		// present in the schema but not allowed
		assert!(!is_orderable(&registry, &model, &query, "body"));
	}

	#[rstest]
	fn test_schema_fallback(registry: ModelRegistry, query: SelectStatement) {
		let model = ModelMeta::new("Post", "posts");

		assert_eq!(
			resolve_target(&registry, &model, "p", &query, "body"),
			Some(OrderTarget::Column {
				table: "p".into(),
				column: "body".into()
			})
		);
		assert!(!is_orderable(&registry, &model, &query, "password"));
	}

	#[rstest]
	fn test_computed_alias_scan(registry: ModelRegistry, query: SelectStatement) {
		let model = ModelMeta::new("Post", "posts");

		assert_eq!(
			resolve_target(&registry, &model, "posts", &query, "comment_count"),
			Some(OrderTarget::Alias("comment_count".into()))
		);
	}

	#[rstest]
	fn test_alias_allow_list_replaces_scan(registry: ModelRegistry, query: SelectStatement) {
		let model = ModelMeta::new("Post", "posts").sortable_aliases(["score"]);

		assert!(!is_orderable(&registry, &model, &query, "comment_count"));
		assert!(is_orderable(&registry, &model, &query, "score"));
	}

	#[rstest]
	fn test_plain_columns_are_not_aliases(registry: ModelRegistry, query: SelectStatement) {
		assert_eq!(computed_aliases(&query), vec!["comment_count"]);
		let model = ModelMeta::new("Post", "posts").sortable(Vec::<String>::new());
		assert!(!is_orderable(&registry, &model, &query, "id"));
	}
}
