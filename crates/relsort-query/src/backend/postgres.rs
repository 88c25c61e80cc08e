//! PostgreSQL query builder backend

use super::QueryBuilder;

/// PostgreSQL query builder
///
/// Identifiers are double-quoted and parameters use `$1, $2, ...`.
///
/// # Examples
///
/// ```rust
/// use relsort_query::prelude::*;
///
/// let mut stmt = Query::select();
/// stmt.from("users").column("name").order_by("name", Order::Desc);
///
/// let (sql, _) = PostgresQueryBuilder::new().build_select(&stmt);
/// assert_eq!(sql, r#"SELECT "name" FROM "users" ORDER BY "name" DESC"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresQueryBuilder;

impl PostgresQueryBuilder {
	/// Create a new PostgreSQL query builder
	pub fn new() -> Self {
		Self
	}

	/// Escape an identifier for PostgreSQL, doubling embedded quotes
	fn escape_iden(&self, ident: &str) -> String {
		format!("\"{}\"", ident.replace('"', "\"\""))
	}

	/// PostgreSQL uses numbered placeholders (`$1`, `$2`, ...)
	fn placeholder(&self, index: usize) -> String {
		format!("${}", index)
	}
}

impl QueryBuilder for PostgresQueryBuilder {
	fn escape_identifier(&self, ident: &str) -> String {
		self.escape_iden(ident)
	}

	fn format_placeholder(&self, index: usize) -> String {
		self.placeholder(index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{expr::Condition, query::Query};
	use rstest::rstest;

	#[rstest]
	fn test_escape_embedded_quote() {
		let builder = PostgresQueryBuilder::new();
		assert_eq!(builder.escape_identifier(r#"na"me"#), r#""na""me""#);
	}

	#[rstest]
	fn test_placeholders_are_numbered() {
		let mut stmt = Query::select();
		stmt.from("users")
			.and_where(Condition::eq("a", 1i32))
			.and_where(Condition::eq("b", 2i32));

		let (sql, values) = PostgresQueryBuilder::new().build_select(&stmt);
		assert_eq!(sql, r#"SELECT * FROM "users" WHERE "a" = $1 AND "b" = $2"#);
		assert_eq!(values.len(), 2);
	}
}
