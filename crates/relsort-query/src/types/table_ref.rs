//! Table reference types for SQL queries.

/// Reference to a table in a SQL query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableRef {
	/// Simple table reference (e.g., `users`)
	Table(String),
	/// Table with alias (e.g., `users AS u`)
	TableAlias(String, String),
}

impl TableRef {
	/// Create a simple table reference.
	///
	/// # Example
	///
	/// ```rust
	/// use relsort_query::TableRef;
	///
	/// let table = TableRef::table("users");
	/// assert_eq!(table.visible_name(), "users");
	/// ```
	pub fn table(table: impl Into<String>) -> Self {
		Self::Table(table.into())
	}

	/// Create an aliased table reference.
	///
	/// # Example
	///
	/// ```rust
	/// use relsort_query::TableRef;
	///
	/// let table = TableRef::table_alias("users", "parent_users");
	/// assert_eq!(table.name(), "users");
	/// assert_eq!(table.visible_name(), "parent_users");
	/// ```
	pub fn table_alias(table: impl Into<String>, alias: impl Into<String>) -> Self {
		Self::TableAlias(table.into(), alias.into())
	}

	/// The underlying table name.
	pub fn name(&self) -> &str {
		match self {
			Self::Table(name) | Self::TableAlias(name, _) => name,
		}
	}

	/// The alias, if one is set.
	pub fn alias(&self) -> Option<&str> {
		match self {
			Self::Table(_) => None,
			Self::TableAlias(_, alias) => Some(alias),
		}
	}

	/// The name other clauses must use to reference this table.
	pub fn visible_name(&self) -> &str {
		self.alias().unwrap_or_else(|| self.name())
	}
}

/// Trait for types convertible into a [`TableRef`].
pub trait IntoTableRef {
	/// Convert into a table reference
	fn into_table_ref(self) -> TableRef;
}

impl IntoTableRef for TableRef {
	fn into_table_ref(self) -> TableRef {
		self
	}
}

impl IntoTableRef for &str {
	fn into_table_ref(self) -> TableRef {
		TableRef::Table(self.to_string())
	}
}

impl IntoTableRef for String {
	fn into_table_ref(self) -> TableRef {
		TableRef::Table(self)
	}
}

impl IntoTableRef for (&str, &str) {
	fn into_table_ref(self) -> TableRef {
		TableRef::table_alias(self.0, self.1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(TableRef::table("users"), "users", None, "users")]
	#[case(TableRef::table_alias("users", "u"), "users", Some("u"), "u")]
	fn test_table_ref_names(
		#[case] table: TableRef,
		#[case] name: &str,
		#[case] alias: Option<&str>,
		#[case] visible: &str,
	) {
		assert_eq!(table.name(), name);
		assert_eq!(table.alias(), alias);
		assert_eq!(table.visible_name(), visible);
	}

	#[rstest]
	fn test_tuple_into_alias() {
		let table = ("posts", "p").into_table_ref();
		assert_eq!(table, TableRef::TableAlias("posts".into(), "p".into()));
	}
}
