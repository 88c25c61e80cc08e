//! # relsort-orm
//!
//! Relation-aware sort resolution for [`relsort_query`] statements.
//!
//! Given a query, the metadata of the model it lists, and a sort column that
//! may reach into related models (`author.profile.city`), this crate adds the
//! joins needed to reach the column and orders the query by it.
//!
//! ## Components
//!
//! - [`metadata`]: [`ModelMeta`], [`RelationDescriptor`], [`MetadataProvider`],
//!   [`ModelRegistry`] and the [`SchemaInspector`] seam
//! - [`path`]: splitting a column path into relation hops
//! - [`join`]: turning a relation hop into a LEFT JOIN
//! - [`validate`]: deciding whether the terminal column can be ordered on
//! - [`sorter`]: [`RelationSorter`], which ties the above together
//! - [`state`]: [`SortRequest`], [`SortState`] and default-sort resolution
//!
//! ## Behavior
//!
//! - Only has-one and belongs-to relations can be sorted across. Other
//!   relation kinds fail with [`SortError::UnsupportedRelationKind`].
//! - A relation pointing back at the source table aliases the source as
//!   `parent_<table>`.
//! - Relation predicates are placed in the ON clause, so parent rows without
//!   a related row are kept.
//! - Joins are staged and applied only once the terminal column validates.
//!   Invalid input leaves the query unchanged and is reported as
//!   [`SortOutcome::Skipped`].
//!
//! ## Example
//!
//! ```rust
//! use relsort_orm::prelude::*;
//! use relsort_query::prelude::*;
//!
//! let registry = ModelRegistry::new()
//!     .with_model(
//!         ModelMeta::new("Employee", "employees")
//!             .relation(RelationDescriptor::belongs_to("manager", "Employee", "manager_id"))
//!             .sortable(["name"]),
//!     );
//!
//! let mut query = Query::select();
//! query.from("employees");
//!
//! RelationSorter::new(&registry, "Employee")
//!     .sort(&mut query, &SortRequest::new("manager.name", SortDirection::Asc))
//!     .unwrap();
//!
//! let (sql, _) = SqliteQueryBuilder::new().build_select(&query);
//! assert_eq!(
//!     sql,
//!     r#"SELECT "parent_employees".* FROM "employees" AS "parent_employees" LEFT JOIN "employees" ON "parent_employees"."manager_id" = "employees"."id" ORDER BY "employees"."name" ASC"#
//! );
//! ```

pub mod error;
pub mod join;
pub mod metadata;
pub mod path;
pub mod plan;
pub mod sorter;
pub mod state;
pub mod validate;

pub use error::{SortError, SortResult};
pub use join::{JOIN_TYPE, JoinPlan, plan_join};
pub use metadata::{
	MetadataProvider, ModelMeta, ModelRegistry, NoSchema, RelationDescriptor, RelationKind,
	SchemaInspector, SortableModel, StaticSchema,
};
pub use path::{RelationPath, resolve};
pub use plan::SortPlan;
pub use sorter::{DEFAULT_MAX_RELATION_DEPTH, RelationSorter, SkipReason, SortOutcome, Sortable};
pub use state::{
	DefaultSort, SortDirection, SortRequest, SortSource, SortState, resolve_sort,
};
pub use validate::{OrderTarget, is_orderable, resolve_target};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::error::{SortError, SortResult};
	pub use crate::metadata::{
		MetadataProvider, ModelMeta, ModelRegistry, NoSchema, RelationDescriptor, RelationKind,
		SchemaInspector, SortableModel, StaticSchema,
	};
	pub use crate::sorter::{RelationSorter, SkipReason, SortOutcome, Sortable};
	pub use crate::state::{DefaultSort, SortDirection, SortRequest, SortSource, SortState};
	pub use crate::validate::OrderTarget;
}
