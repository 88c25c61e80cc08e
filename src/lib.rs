//! # relsort
//!
//! Relation-aware request sorting for SQL query builders.
//!
//! A listing request names a column to sort by, optionally through relation
//! hops (`author.profile.city`), and a direction. relsort validates the column
//! against the model's allow-lists or schema, adds the joins the path needs,
//! and orders the query. Invalid input never fails a request: it is ignored
//! and the query is left as it was.
//!
//! ## Crates
//!
//! - [`query`]: minimal SELECT builder and SQL rendering
//! - [`conf`]: parameter names, default direction, hop limit and link labels
//! - [`orm`]: model metadata, path resolution, join synthesis and the sorter
//! - [`rest`] (feature `rest`, default): request parameters, ordering filter
//!   and sort links
//!
//! ## Quick Example
//!
//! ```rust
//! use relsort::prelude::*;
//!
//! let registry = ModelRegistry::new()
//!     .with_model(
//!         ModelMeta::new("Post", "posts")
//!             .sortable(["title"])
//!             .relation(RelationDescriptor::belongs_to("author", "User", "author_id")),
//!     )
//!     .with_model(ModelMeta::new("User", "users").sortable(["name"]));
//!
//! let mut query = Query::select();
//! query.from("posts").columns(["id", "title"]);
//!
//! let sorter = RelationSorter::new(&registry, "Post");
//! sorter
//!     .sort(&mut query, &SortRequest::new("author.name", SortDirection::Asc))
//!     .unwrap();
//!
//! let (sql, _) = MySqlQueryBuilder::new().build_select(&query);
//! assert_eq!(
//!     sql,
//!     "SELECT `posts`.`id`, `posts`.`title` FROM `posts` LEFT JOIN `users` ON `posts`.`author_id` = `users`.`id` ORDER BY `users`.`name` ASC"
//! );
//! ```

pub use relsort_conf as conf;
pub use relsort_orm as orm;
pub use relsort_query as query;
#[cfg(feature = "rest")]
pub use relsort_rest as rest;

/// Prelude module for convenient imports
pub mod prelude {
	pub use relsort_conf::{SortLabels, SortSettings};
	pub use relsort_orm::prelude::*;
	pub use relsort_query::prelude::*;
	#[cfg(feature = "rest")]
	pub use relsort_rest::prelude::*;
}
