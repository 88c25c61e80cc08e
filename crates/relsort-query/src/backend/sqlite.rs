//! SQLite query builder backend

use super::QueryBuilder;

/// SQLite query builder
///
/// Identifiers are double-quoted and parameters use `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteQueryBuilder;

impl SqliteQueryBuilder {
	/// Create a new SQLite query builder
	pub fn new() -> Self {
		Self
	}

	fn escape_iden(&self, ident: &str) -> String {
		format!("\"{}\"", ident.replace('"', "\"\""))
	}

	fn placeholder(&self, _index: usize) -> String {
		"?".to_string()
	}
}

impl QueryBuilder for SqliteQueryBuilder {
	fn escape_identifier(&self, ident: &str) -> String {
		self.escape_iden(ident)
	}

	fn format_placeholder(&self, index: usize) -> String {
		self.placeholder(index)
	}
}
