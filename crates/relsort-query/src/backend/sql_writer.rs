//! SQL Writer helper for constructing SQL strings
//!
//! [`SqlWriter`] accumulates SQL text and the values bound to its
//! placeholders, keeping the placeholder index in step with the values.

use crate::value::{Value, Values};

/// SQL Writer for constructing SQL strings
///
/// # Examples
///
/// ```rust
/// use relsort_query::backend::SqlWriter;
/// use relsort_query::Value;
///
/// let mut writer = SqlWriter::new();
/// writer.push("SELECT");
/// writer.push_space();
/// writer.push_identifier("id", |s| format!("\"{}\"", s));
/// writer.push_keyword("WHERE");
/// writer.push_space();
/// writer.push("x =");
/// writer.push_space();
/// writer.push_value(Value::from(1i64), |i| format!("${}", i));
///
/// let (sql, values) = writer.finish();
/// assert_eq!(sql, "SELECT \"id\" WHERE x = $1");
/// assert_eq!(values.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SqlWriter {
	sql: String,
	values: Values,
	/// Next parameter index (1-based)
	param_index: usize,
}

impl SqlWriter {
	/// Create a new SQL writer
	pub fn new() -> Self {
		Self {
			sql: String::new(),
			values: Values::default(),
			param_index: 1,
		}
	}

	/// Push a string to SQL
	pub fn push(&mut self, s: &str) {
		self.sql.push_str(s);
	}

	/// Push a single character to SQL
	pub fn push_char(&mut self, c: char) {
		self.sql.push(c);
	}

	/// Push a space unless the SQL is empty or already ends with one
	pub fn push_space(&mut self) {
		if !self.sql.is_empty() && !self.sql.ends_with(' ') {
			self.sql.push(' ');
		}
	}

	/// Push an identifier escaped by `escape_fn`
	pub fn push_identifier<F>(&mut self, ident: &str, escape_fn: F)
	where
		F: FnOnce(&str) -> String,
	{
		self.sql.push_str(&escape_fn(ident));
	}

	/// Push a comma separator
	pub fn push_comma(&mut self) {
		self.sql.push_str(", ");
	}

	/// Push a value placeholder and collect the value
	///
	/// # Returns
	///
	/// * `Some(index)` - The parameter index used for a non-NULL value
	/// * `None` - NULL value, inlined as `NULL` without consuming an index
	pub fn push_value<F>(&mut self, value: Value, format_fn: F) -> Option<usize>
	where
		F: FnOnce(usize) -> String,
	{
		if value.is_null() {
			self.sql.push_str("NULL");
			return None;
		}

		let index = self.param_index;
		self.sql.push_str(&format_fn(index));
		self.values.push(value);
		self.param_index += 1;
		Some(index)
	}

	/// Push a keyword preceded by a space
	pub fn push_keyword(&mut self, keyword: &str) {
		self.push_space();
		self.sql.push_str(keyword);
	}

	/// Current SQL string
	pub fn sql(&self) -> &str {
		&self.sql
	}

	/// Collected values
	pub fn values(&self) -> &Values {
		&self.values
	}

	/// Consume the writer and return (SQL, Values)
	pub fn finish(self) -> (String, Values) {
		(self.sql, self.values)
	}
}

impl Default for SqlWriter {
	fn default() -> Self {
		Self::new()
	}
}
