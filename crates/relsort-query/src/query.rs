//! Query statement builders.

mod select;

pub use select::{JoinExpr, OrderExpr, OrderKey, SelectStatement};

/// Entry point for building statements.
///
/// # Examples
///
/// ```rust
/// use relsort_query::prelude::*;
///
/// let mut stmt = Query::select();
/// stmt.from("users").column("name").order_by("name", Order::Asc);
/// assert_eq!(stmt.source_name(), Some("users"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Query;

impl Query {
	/// Start a new SELECT statement.
	pub fn select() -> SelectStatement {
		SelectStatement::new()
	}
}
