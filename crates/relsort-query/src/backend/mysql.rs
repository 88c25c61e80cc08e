//! MySQL query builder backend

use super::QueryBuilder;

/// MySQL query builder
///
/// Identifiers are backtick-quoted and parameters use `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlQueryBuilder;

impl MySqlQueryBuilder {
	/// Create a new MySQL query builder
	pub fn new() -> Self {
		Self
	}

	/// Escape an identifier for MySQL, doubling embedded backticks
	fn escape_iden(&self, ident: &str) -> String {
		format!("`{}`", ident.replace('`', "``"))
	}

	fn placeholder(&self, _index: usize) -> String {
		"?".to_string()
	}
}

impl QueryBuilder for MySqlQueryBuilder {
	fn escape_identifier(&self, ident: &str) -> String {
		self.escape_iden(ident)
	}

	fn format_placeholder(&self, index: usize) -> String {
		self.placeholder(index)
	}
}
