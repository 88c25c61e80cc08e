//! # relsort REST
//!
//! Request layer for relsort.
//!
//! - **Parameters**: [`SortParams`] reads the configured `sort` and
//!   `direction` parameters from a request
//! - **Filtering**: [`OrderingFilter`] applies the request sort, or a default
//!   sort, to a query
//! - **Links**: [`SortLink`] renders the column header link that toggles the
//!   sort
//!
//! ## Example
//!
//! ```rust
//! use relsort_conf::SortSettings;
//! use relsort_orm::{ModelMeta, ModelRegistry, RelationDescriptor};
//! use relsort_query::{PostgresQueryBuilder, Query, QueryBuilder};
//! use relsort_rest::{OrderingFilter, SortLink};
//!
//! let registry = ModelRegistry::new()
//!     .with_model(
//!         ModelMeta::new("Post", "posts")
//!             .relation(RelationDescriptor::belongs_to("author", "User", "author_id")),
//!     )
//!     .with_model(ModelMeta::new("User", "users").sortable(["name"]));
//!
//! let filter = OrderingFilter::new(&registry, "Post");
//! let mut query = Query::select();
//! query.from("posts").column("title");
//!
//! let state = filter
//!     .filter_query_string("sort=author.name&direction=desc", &mut query)
//!     .unwrap();
//!
//! let (sql, _) = PostgresQueryBuilder.build_select(&query);
//! assert_eq!(
//!     sql,
//!     r#"SELECT "posts"."title" FROM "posts" LEFT JOIN "users" ON "posts"."author_id" = "users"."id" ORDER BY "users"."name" DESC"#
//! );
//!
//! let link = SortLink::new("author.name")
//!     .with_title("Author")
//!     .with_base_url("/posts")
//!     .render(state.as_ref(), &SortSettings::default());
//! assert_eq!(link.href, "/posts?sort=author.name&direction=asc");
//! ```

pub mod error;
pub mod filter;
pub mod link;
pub mod params;

pub use error::{FilterError, FilterResult};
pub use filter::OrderingFilter;
pub use link::{IconType, RenderedLink, SortLink};
pub use params::SortParams;

/// Common imports for request handlers.
pub mod prelude {
	pub use crate::error::{FilterError, FilterResult};
	pub use crate::filter::OrderingFilter;
	pub use crate::link::{IconType, RenderedLink, SortLink};
	pub use crate::params::SortParams;
}
