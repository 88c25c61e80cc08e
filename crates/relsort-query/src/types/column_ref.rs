//! Column reference types for SQL queries.

/// Reference to a column in a SQL query.
///
/// # Examples
///
/// ```rust
/// use relsort_query::ColumnRef;
///
/// assert_eq!(ColumnRef::parse("name"), ColumnRef::Column("name".into()));
/// assert_eq!(
///     ColumnRef::parse("users.name"),
///     ColumnRef::TableColumn("users".into(), "name".into())
/// );
/// assert_eq!(ColumnRef::parse("users.*"), ColumnRef::TableAsterisk("users".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
	/// Bare column reference (e.g., `name`)
	Column(String),
	/// Table-qualified column reference (e.g., `users.name`)
	TableColumn(String, String),
	/// Asterisk (`*`)
	Asterisk,
	/// Table-qualified asterisk (e.g., `users.*`)
	TableAsterisk(String),
}

impl ColumnRef {
	/// Create a bare column reference.
	pub fn column(column: impl Into<String>) -> Self {
		Self::Column(column.into())
	}

	/// Create a table-qualified column reference.
	pub fn table_column(table: impl Into<String>, column: impl Into<String>) -> Self {
		Self::TableColumn(table.into(), column.into())
	}

	/// Parse `column`, `table.column`, `*` or `table.*`.
	///
	/// Only the first `.` separates the table from the column.
	pub fn parse(s: &str) -> Self {
		match s.split_once('.') {
			Some((table, "*")) => Self::TableAsterisk(table.to_string()),
			Some((table, column)) => Self::TableColumn(table.to_string(), column.to_string()),
			None if s == "*" => Self::Asterisk,
			None => Self::Column(s.to_string()),
		}
	}

	/// Whether the reference names its table explicitly.
	pub fn is_qualified(&self) -> bool {
		matches!(self, Self::TableColumn(..) | Self::TableAsterisk(_))
	}

	/// The table part, if qualified.
	pub fn table(&self) -> Option<&str> {
		match self {
			Self::TableColumn(table, _) | Self::TableAsterisk(table) => Some(table),
			Self::Column(_) | Self::Asterisk => None,
		}
	}

	/// The column part; `None` for wildcards.
	pub fn column_name(&self) -> Option<&str> {
		match self {
			Self::Column(column) | Self::TableColumn(_, column) => Some(column),
			Self::Asterisk | Self::TableAsterisk(_) => None,
		}
	}

	/// Return this reference qualified against `table`.
	///
	/// Already-qualified references are returned unchanged.
	pub fn qualified(&self, table: &str) -> Self {
		match self {
			Self::Column(column) => Self::TableColumn(table.to_string(), column.clone()),
			Self::Asterisk => Self::TableAsterisk(table.to_string()),
			other => other.clone(),
		}
	}

	/// Return this reference with its table renamed from `from` to `to`.
	pub fn renamed_table(&self, from: &str, to: &str) -> Self {
		match self {
			Self::TableColumn(table, column) if table == from => {
				Self::TableColumn(to.to_string(), column.clone())
			}
			Self::TableAsterisk(table) if table == from => Self::TableAsterisk(to.to_string()),
			other => other.clone(),
		}
	}
}

impl std::fmt::Display for ColumnRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Column(column) => write!(f, "{column}"),
			Self::TableColumn(table, column) => write!(f, "{table}.{column}"),
			Self::Asterisk => write!(f, "*"),
			Self::TableAsterisk(table) => write!(f, "{table}.*"),
		}
	}
}

/// Trait for types convertible into a [`ColumnRef`].
pub trait IntoColumnRef {
	/// Convert into a column reference
	fn into_column_ref(self) -> ColumnRef;
}

impl IntoColumnRef for ColumnRef {
	fn into_column_ref(self) -> ColumnRef {
		self
	}
}

impl IntoColumnRef for &str {
	fn into_column_ref(self) -> ColumnRef {
		ColumnRef::parse(self)
	}
}

impl IntoColumnRef for String {
	fn into_column_ref(self) -> ColumnRef {
		ColumnRef::parse(&self)
	}
}

impl IntoColumnRef for (&str, &str) {
	fn into_column_ref(self) -> ColumnRef {
		ColumnRef::table_column(self.0, self.1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("id", ColumnRef::Column("id".into()))]
	#[case("*", ColumnRef::Asterisk)]
	#[case("users.id", ColumnRef::TableColumn("users".into(), "id".into()))]
	#[case("users.*", ColumnRef::TableAsterisk("users".into()))]
	fn test_parse(#[case] input: &str, #[case] expected: ColumnRef) {
		assert_eq!(ColumnRef::parse(input), expected);
		assert_eq!(expected.to_string(), input);
	}

	#[rstest]
	fn test_qualified_keeps_existing_table() {
		let col = ColumnRef::table_column("posts", "id");
		assert_eq!(col.qualified("users"), col);
		assert_eq!(
			ColumnRef::column("id").qualified("users"),
			ColumnRef::table_column("users", "id")
		);
		assert_eq!(
			ColumnRef::Asterisk.qualified("users"),
			ColumnRef::TableAsterisk("users".into())
		);
	}

	#[rstest]
	fn test_renamed_table_only_touches_matching() {
		let own = ColumnRef::table_column("users", "id");
		let other = ColumnRef::table_column("posts", "id");

		assert_eq!(
			own.renamed_table("users", "parent_users"),
			ColumnRef::table_column("parent_users", "id")
		);
		assert_eq!(other.renamed_table("users", "parent_users"), other);
	}
}
