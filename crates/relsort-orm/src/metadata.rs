//! Model metadata consumed by the sorter.
//!
//! A model is described by a [`ModelMeta`]: its table, its relations and
//! optional allow-lists of sortable columns and computed aliases. Metadata is
//! looked up through a [`MetadataProvider`]; [`ModelRegistry`] is the
//! in-memory implementation, backed by a pluggable [`SchemaInspector`] for
//! physical column checks.

use std::collections::{HashMap, HashSet};
use std::fmt;

use relsort_query::Condition;

use crate::state::DefaultSort;

/// Shape of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationKind {
	/// The related table holds the foreign key (one-to-one)
	HasOne,
	/// The parent table holds the foreign key (many-to-one)
	BelongsTo,
	/// Any relation that may yield several related rows, named by its kind
	Unsupported(String),
}

impl RelationKind {
	/// Kind name used in error messages.
	pub fn name(&self) -> &str {
		match self {
			Self::HasOne => "has_one",
			Self::BelongsTo => "belongs_to",
			Self::Unsupported(kind) => kind,
		}
	}
}

impl fmt::Display for RelationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Definition of a relation from one model to another.
///
/// The meaning of `foreign_key` and `other_key` depends on the kind:
///
/// | Kind | `foreign_key` lives on | `other_key` |
/// |------|------------------------|-------------|
/// | [`HasOne`](RelationKind::HasOne) | related table | parent's local key |
/// | [`BelongsTo`](RelationKind::BelongsTo) | parent table | related owner key |
///
/// # Examples
///
/// ```rust
/// use relsort_orm::{RelationDescriptor, RelationKind};
/// use relsort_query::Condition;
///
/// let author = RelationDescriptor::belongs_to("author", "User", "author_id")
///     .filter(Condition::eq("active", true));
///
/// assert_eq!(author.kind, RelationKind::BelongsTo);
/// assert_eq!(author.other_key, "id");
/// assert_eq!(author.predicates.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDescriptor {
	/// Relation name, used as a hop in column paths
	pub name: String,
	/// Relation shape
	pub kind: RelationKind,
	/// Name of the related model
	pub related_model: String,
	/// Foreign key column
	pub foreign_key: String,
	/// Local key (has-one) or owner key (belongs-to)
	pub other_key: String,
	/// Conditions scoping which related rows are eligible
	pub predicates: Vec<Condition>,
}

impl RelationDescriptor {
	fn with_kind(
		name: impl Into<String>,
		kind: RelationKind,
		related_model: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			kind,
			related_model: related_model.into(),
			foreign_key: foreign_key.into(),
			other_key: "id".to_string(),
			predicates: Vec::new(),
		}
	}

	/// A has-one relation whose foreign key lives on the related table.
	pub fn has_one(
		name: impl Into<String>,
		related_model: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		Self::with_kind(name, RelationKind::HasOne, related_model, foreign_key)
	}

	/// A belongs-to relation whose foreign key lives on the parent table.
	pub fn belongs_to(
		name: impl Into<String>,
		related_model: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		Self::with_kind(name, RelationKind::BelongsTo, related_model, foreign_key)
	}

	/// A relation that cannot be sorted across (has-many, many-to-many, ...).
	pub fn unsupported(
		name: impl Into<String>,
		kind: impl Into<String>,
		related_model: impl Into<String>,
	) -> Self {
		Self::with_kind(
			name,
			RelationKind::Unsupported(kind.into()),
			related_model,
			String::new(),
		)
	}

	/// Set the parent's local key of a has-one relation.
	pub fn local_key(mut self, key: impl Into<String>) -> Self {
		self.other_key = key.into();
		self
	}

	/// Set the related owner key of a belongs-to relation.
	pub fn owner_key(mut self, key: impl Into<String>) -> Self {
		self.other_key = key.into();
		self
	}

	/// Add a scoping condition.
	pub fn filter(mut self, condition: Condition) -> Self {
		self.predicates.push(condition);
		self
	}
}

/// Metadata of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMeta {
	name: String,
	table: String,
	relations: HashMap<String, RelationDescriptor>,
	sortable: Option<HashSet<String>>,
	sortable_aliases: Option<HashSet<String>>,
	default_sort: Option<DefaultSort>,
}

impl ModelMeta {
	/// Describe model `name` stored in `table`.
	pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			table: table.into(),
			relations: HashMap::new(),
			sortable: None,
			sortable_aliases: None,
			default_sort: None,
		}
	}

	/// Add a relation.
	pub fn relation(mut self, relation: RelationDescriptor) -> Self {
		self.relations.insert(relation.name.clone(), relation);
		self
	}

	/// Declare the sortable columns. Replaces schema introspection.
	pub fn sortable<I, S>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.sortable = Some(columns.into_iter().map(Into::into).collect());
		self
	}

	/// Declare the sortable computed aliases. Replaces select scanning.
	pub fn sortable_aliases<I, S>(mut self, aliases: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.sortable_aliases = Some(aliases.into_iter().map(Into::into).collect());
		self
	}

	/// Set the default sort.
	pub fn default_sort(mut self, default: DefaultSort) -> Self {
		self.default_sort = Some(default);
		self
	}

	/// Model name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Table name.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Relation by name.
	pub fn get_relation(&self, name: &str) -> Option<&RelationDescriptor> {
		self.relations.get(name)
	}

	/// Sortable column allow-list, if declared.
	pub fn get_sortable(&self) -> Option<&HashSet<String>> {
		self.sortable.as_ref()
	}

	/// Sortable alias allow-list, if declared.
	pub fn get_sortable_aliases(&self) -> Option<&HashSet<String>> {
		self.sortable_aliases.as_ref()
	}

	/// Default sort, if configured.
	pub fn get_default_sort(&self) -> Option<&DefaultSort> {
		self.default_sort.as_ref()
	}
}

/// Physical schema introspection.
pub trait SchemaInspector {
	/// Whether `table` has a column named `column`.
	fn has_column(&self, table: &str, column: &str) -> bool;
}

/// Inspector that knows no columns. Sorting then relies on allow-lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl SchemaInspector for NoSchema {
	fn has_column(&self, _table: &str, _column: &str) -> bool {
		false
	}
}

/// Inspector over a fixed set of table columns.
///
/// # Examples
///
/// ```rust
/// use relsort_orm::{SchemaInspector, StaticSchema};
///
/// let schema = StaticSchema::new().table("users", ["id", "name"]);
/// assert!(schema.has_column("users", "name"));
/// assert!(!schema.has_column("users", "password"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
	tables: HashMap<String, HashSet<String>>,
}

impl StaticSchema {
	/// Create an empty schema
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a table with its columns.
	pub fn table<I, S>(mut self, table: impl Into<String>, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tables
			.entry(table.into())
			.or_default()
			.extend(columns.into_iter().map(Into::into));
		self
	}
}

impl SchemaInspector for StaticSchema {
	fn has_column(&self, table: &str, column: &str) -> bool {
		self.tables
			.get(table)
			.is_some_and(|columns| columns.contains(column))
	}
}

/// Source of model metadata.
pub trait MetadataProvider {
	/// Metadata of the model named `name`.
	fn model(&self, name: &str) -> Option<&ModelMeta>;

	/// Whether `table` physically has `column`.
	fn has_column(&self, table: &str, column: &str) -> bool;
}

/// A Rust type that describes its own metadata.
///
/// # Examples
///
/// ```rust
/// use relsort_orm::{ModelRegistry, MetadataProvider, RelationDescriptor, SortableModel};
///
/// struct Post;
///
/// impl SortableModel for Post {
///     fn model_name() -> &'static str { "Post" }
///     fn table_name() -> &'static str { "posts" }
///     fn relations() -> Vec<RelationDescriptor> {
///         vec![RelationDescriptor::belongs_to("author", "User", "author_id")]
///     }
///     fn sortable_columns() -> Option<Vec<&'static str>> {
///         Some(vec!["title", "created_at"])
///     }
/// }
///
/// let registry = ModelRegistry::new().with_model_type::<Post>();
/// let meta = registry.model("Post").unwrap();
/// assert_eq!(meta.table(), "posts");
/// assert!(meta.get_relation("author").is_some());
/// ```
pub trait SortableModel {
	/// Model name used in relation definitions
	fn model_name() -> &'static str;

	/// Table name
	fn table_name() -> &'static str;

	/// Relations reachable from this model
	fn relations() -> Vec<RelationDescriptor> {
		Vec::new()
	}

	/// Sortable column allow-list; `None` defers to schema introspection
	fn sortable_columns() -> Option<Vec<&'static str>> {
		None
	}

	/// Sortable alias allow-list; `None` defers to select scanning
	fn sortable_aliases() -> Option<Vec<&'static str>> {
		None
	}

	/// Default sort applied when a request carries none
	fn default_sort() -> Option<DefaultSort> {
		None
	}

	/// Build the metadata of this model.
	fn meta() -> ModelMeta {
		let mut meta = Self::relations()
			.into_iter()
			.fold(ModelMeta::new(Self::model_name(), Self::table_name()), ModelMeta::relation);
		if let Some(columns) = Self::sortable_columns() {
			meta = meta.sortable(columns);
		}
		if let Some(aliases) = Self::sortable_aliases() {
			meta = meta.sortable_aliases(aliases);
		}
		if let Some(default) = Self::default_sort() {
			meta = meta.default_sort(default);
		}
		meta
	}
}

/// In-memory [`MetadataProvider`].
///
/// The registry is immutable once shared and may serve concurrent requests.
pub struct ModelRegistry {
	models: HashMap<String, ModelMeta>,
	schema: Box<dyn SchemaInspector + Send + Sync>,
}

impl ModelRegistry {
	/// Create an empty registry with no schema introspection.
	pub fn new() -> Self {
		Self {
			models: HashMap::new(),
			schema: Box::new(NoSchema),
		}
	}

	/// Use `schema` for physical column checks.
	pub fn with_schema<S>(mut self, schema: S) -> Self
	where
		S: SchemaInspector + Send + Sync + 'static,
	{
		self.schema = Box::new(schema);
		self
	}

	/// Add a model.
	pub fn with_model(mut self, meta: ModelMeta) -> Self {
		self.register(meta);
		self
	}

	/// Add a model described by a [`SortableModel`] type.
	pub fn with_model_type<M: SortableModel>(self) -> Self {
		self.with_model(M::meta())
	}

	/// Add or replace a model.
	pub fn register(&mut self, meta: ModelMeta) {
		if self.models.contains_key(meta.name()) {
			tracing::warn!(model = meta.name(), "replacing registered model metadata");
		}
		self.models.insert(meta.name().to_string(), meta);
	}

	/// Number of registered models
	pub fn len(&self) -> usize {
		self.models.len()
	}

	/// Whether no model is registered
	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}
}

impl Default for ModelRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ModelRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelRegistry")
			.field("models", &self.models.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

impl MetadataProvider for ModelRegistry {
	fn model(&self, name: &str) -> Option<&ModelMeta> {
		self.models.get(name)
	}

	fn has_column(&self, table: &str, column: &str) -> bool {
		self.schema.has_column(table, column)
	}
}
