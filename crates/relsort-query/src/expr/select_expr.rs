//! Select list entries and computed alias detection.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{ColumnRef, IntoColumnRef};

/// Matches a trailing `AS alias`, tolerating identifier quotes.
fn alias_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r#"(?i)\bas\s+[`"'\[]?([A-Za-z_][A-Za-z0-9_]*)[`"'\]]?\s*$"#)
			.expect("alias pattern is a valid regex")
	})
}

/// One entry of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectExpr {
	/// Column reference, rendered with escaped identifiers
	Column(ColumnRef),
	/// Raw SQL, rendered verbatim (e.g. `COUNT(comments.id) AS comment_count`)
	Raw(String),
}

impl SelectExpr {
	/// Create a column entry.
	pub fn column<C: IntoColumnRef>(column: C) -> Self {
		Self::Column(column.into_column_ref())
	}

	/// Create a raw entry.
	pub fn raw(sql: impl Into<String>) -> Self {
		Self::Raw(sql.into())
	}

	/// Whether this entry is a computed (raw) expression.
	pub fn is_computed(&self) -> bool {
		matches!(self, Self::Raw(_))
	}

	/// The alias declared by a computed expression, with quotes stripped.
	///
	/// # Examples
	///
	/// ```rust
	/// use relsort_query::SelectExpr;
	///
	/// let expr = SelectExpr::raw("COUNT(comments.id) AS `comment_count`");
	/// assert_eq!(expr.computed_alias(), Some("comment_count"));
	/// assert_eq!(SelectExpr::column("name").computed_alias(), None);
	/// ```
	pub fn computed_alias(&self) -> Option<&str> {
		match self {
			Self::Raw(sql) => alias_regex()
				.captures(sql)
				.and_then(|caps| caps.get(1))
				.map(|m| m.as_str()),
			Self::Column(_) => None,
		}
	}
}
