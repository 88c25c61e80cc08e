//! # relsort-query
//!
//! A small mutable SELECT statement model with SQL rendering for
//! PostgreSQL, MySQL and SQLite.
//!
//! The statement model is deliberately narrow: source table, select list,
//! joins, WHERE conditions, ORDER BY, LIMIT and OFFSET. It supports the two
//! rewrites needed to add joins to a query that was built elsewhere:
//! qualifying bare column names and aliasing the source table.
//!
//! ## Architecture
//!
//! - [`value`]: Bound parameter values
//! - [`types`]: Table and column references, ordering, join kinds, operators
//! - [`expr`]: Conditions and select expressions
//! - [`query`]: [`SelectStatement`] and the [`Query`] entry point
//! - [`backend`]: [`PostgresQueryBuilder`], [`MySqlQueryBuilder`],
//!   [`SqliteQueryBuilder`]
//!
//! ## Quick Start
//!
//! ```rust
//! use relsort_query::prelude::*;
//!
//! let mut stmt = Query::select();
//! stmt.column("name")
//!     .column("email")
//!     .from("users")
//!     .and_where(Condition::eq("active", true))
//!     .order_by("name", Order::Asc)
//!     .limit(10);
//!
//! let builder = PostgresQueryBuilder::new();
//! let (sql, values) = builder.build_select(&stmt);
//! assert_eq!(
//!     sql,
//!     r#"SELECT "name", "email" FROM "users" WHERE "active" = $1 ORDER BY "name" ASC LIMIT $2"#
//! );
//! assert_eq!(values.len(), 2);
//! ```
//!
//! ## Backend Differences
//!
//! | Feature | PostgreSQL | MySQL | SQLite |
//! |---------|-----------|-------|--------|
//! | Identifier quoting | `"name"` | `` `name` `` | `"name"` |
//! | Placeholders | `$1, $2, ...` | `?, ?, ...` | `?, ?, ...` |

pub mod backend;
pub mod expr;
pub mod query;
pub mod types;
pub mod value;

pub use backend::{MySqlQueryBuilder, PostgresQueryBuilder, QueryBuilder, SqliteQueryBuilder};
pub use expr::{Condition, SelectExpr};
pub use query::{JoinExpr, OrderExpr, OrderKey, Query, SelectStatement};
pub use types::{
	BinOper, ColumnRef, IntoColumnRef, IntoTableRef, JoinType, Order, TableRef,
};
pub use value::{Value, Values};

/// Prelude module for convenient imports
///
/// ```rust
/// use relsort_query::prelude::*;
/// ```
pub mod prelude {
	pub use crate::backend::{
		MySqlQueryBuilder, PostgresQueryBuilder, QueryBuilder, SqliteQueryBuilder,
	};
	pub use crate::expr::{Condition, SelectExpr};
	pub use crate::query::{JoinExpr, OrderExpr, OrderKey, Query, SelectStatement};
	pub use crate::types::{
		BinOper, ColumnRef, IntoColumnRef, IntoTableRef, JoinType, Order, TableRef,
	};
	pub use crate::value::{Value, Values};
}
