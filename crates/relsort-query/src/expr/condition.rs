//! Boolean predicates.
//!
//! A [`Condition`] carries its bound values with it. Column-bearing variants
//! can be rewritten against a table; raw SQL is never rewritten.

use crate::types::{BinOper, ColumnRef, IntoColumnRef};
use crate::value::Value;

/// A single predicate.
///
/// Conditions held in a list are combined with `AND` when rendered.
///
/// # Examples
///
/// ```rust
/// use relsort_query::{Condition, ColumnRef};
///
/// let cond = Condition::eq("active", true).qualified("users");
/// assert_eq!(
///     cond,
///     Condition::eq(ColumnRef::table_column("users", "active"), true)
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
	/// `column <op> value`
	Compare {
		/// Left-hand column
		column: ColumnRef,
		/// Comparison operator
		op: BinOper,
		/// Bound right-hand value
		value: Value,
	},
	/// `column [NOT] IN (values...)`
	In {
		/// Tested column
		column: ColumnRef,
		/// Bound candidates
		values: Vec<Value>,
		/// `NOT IN` when true
		negated: bool,
	},
	/// `column IS [NOT] NULL`
	Null {
		/// Tested column
		column: ColumnRef,
		/// `IS NOT NULL` when true
		negated: bool,
	},
	/// `left = right` between two columns
	ColumnEq {
		/// Left-hand column
		left: ColumnRef,
		/// Right-hand column
		right: ColumnRef,
	},
	/// Raw SQL fragment. Each `?` is replaced by the next bound value.
	Raw {
		/// SQL text
		sql: String,
		/// Bound values, in placeholder order
		values: Vec<Value>,
	},
}

impl Condition {
	fn compare<C: IntoColumnRef, V: Into<Value>>(column: C, op: BinOper, value: V) -> Self {
		Self::Compare {
			column: column.into_column_ref(),
			op,
			value: value.into(),
		}
	}

	/// `column = value`
	pub fn eq<C: IntoColumnRef, V: Into<Value>>(column: C, value: V) -> Self {
		Self::compare(column, BinOper::Equal, value)
	}

	/// `column <> value`
	pub fn ne<C: IntoColumnRef, V: Into<Value>>(column: C, value: V) -> Self {
		Self::compare(column, BinOper::NotEqual, value)
	}

	/// `column > value`
	pub fn gt<C: IntoColumnRef, V: Into<Value>>(column: C, value: V) -> Self {
		Self::compare(column, BinOper::GreaterThan, value)
	}

	/// `column >= value`
	pub fn gte<C: IntoColumnRef, V: Into<Value>>(column: C, value: V) -> Self {
		Self::compare(column, BinOper::GreaterThanOrEqual, value)
	}

	/// `column < value`
	pub fn lt<C: IntoColumnRef, V: Into<Value>>(column: C, value: V) -> Self {
		Self::compare(column, BinOper::SmallerThan, value)
	}

	/// `column <= value`
	pub fn lte<C: IntoColumnRef, V: Into<Value>>(column: C, value: V) -> Self {
		Self::compare(column, BinOper::SmallerThanOrEqual, value)
	}

	/// `column LIKE pattern`
	pub fn like<C: IntoColumnRef, V: Into<Value>>(column: C, pattern: V) -> Self {
		Self::compare(column, BinOper::Like, pattern)
	}

	/// `column IN (values...)`
	pub fn is_in<C, I, V>(column: C, values: I) -> Self
	where
		C: IntoColumnRef,
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::In {
			column: column.into_column_ref(),
			values: values.into_iter().map(Into::into).collect(),
			negated: false,
		}
	}

	/// `column NOT IN (values...)`
	pub fn not_in<C, I, V>(column: C, values: I) -> Self
	where
		C: IntoColumnRef,
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::In {
			column: column.into_column_ref(),
			values: values.into_iter().map(Into::into).collect(),
			negated: true,
		}
	}

	/// `column IS NULL`
	pub fn is_null<C: IntoColumnRef>(column: C) -> Self {
		Self::Null {
			column: column.into_column_ref(),
			negated: false,
		}
	}

	/// `column IS NOT NULL`
	pub fn is_not_null<C: IntoColumnRef>(column: C) -> Self {
		Self::Null {
			column: column.into_column_ref(),
			negated: true,
		}
	}

	/// `left = right`
	pub fn columns_eq<L: IntoColumnRef, R: IntoColumnRef>(left: L, right: R) -> Self {
		Self::ColumnEq {
			left: left.into_column_ref(),
			right: right.into_column_ref(),
		}
	}

	/// Raw SQL with `?` placeholders.
	///
	/// # Examples
	///
	/// ```rust
	/// use relsort_query::Condition;
	///
	/// let cond = Condition::raw("score > ? AND score < ?", [10i64, 20i64]);
	/// assert_eq!(cond.values().len(), 2);
	/// ```
	pub fn raw<I, V>(sql: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::Raw {
			sql: sql.into(),
			values: values.into_iter().map(Into::into).collect(),
		}
	}

	/// Bound values of this condition, in rendering order.
	pub fn values(&self) -> Vec<&Value> {
		match self {
			Self::Compare { value, .. } => vec![value],
			Self::In { values, .. } | Self::Raw { values, .. } => values.iter().collect(),
			Self::Null { .. } | Self::ColumnEq { .. } => Vec::new(),
		}
	}

	/// Column references of this condition. Raw SQL reports none.
	pub fn columns(&self) -> Vec<&ColumnRef> {
		match self {
			Self::Compare { column, .. } | Self::In { column, .. } | Self::Null { column, .. } => {
				vec![column]
			}
			Self::ColumnEq { left, right } => vec![left, right],
			Self::Raw { .. } => Vec::new(),
		}
	}

	/// Apply `f` to every column reference. Raw SQL is left untouched.
	pub fn map_columns<F>(&self, f: F) -> Self
	where
		F: Fn(&ColumnRef) -> ColumnRef,
	{
		match self {
			Self::Compare { column, op, value } => Self::Compare {
				column: f(column),
				op: *op,
				value: value.clone(),
			},
			Self::In {
				column,
				values,
				negated,
			} => Self::In {
				column: f(column),
				values: values.clone(),
				negated: *negated,
			},
			Self::Null { column, negated } => Self::Null {
				column: f(column),
				negated: *negated,
			},
			Self::ColumnEq { left, right } => Self::ColumnEq {
				left: f(left),
				right: f(right),
			},
			Self::Raw { .. } => self.clone(),
		}
	}

	/// Qualify every bare column against `table`.
	pub fn qualified(&self, table: &str) -> Self {
		self.map_columns(|c| c.qualified(table))
	}

	/// Rename column references from table `from` to `to`.
	pub fn renamed_table(&self, from: &str, to: &str) -> Self {
		self.map_columns(|c| c.renamed_table(from, to))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_qualified_leaves_raw_untouched() {
		let raw = Condition::raw("status = ?", ["published"]);
		assert_eq!(raw.qualified("posts"), raw);
	}

	#[rstest]
	fn test_qualified_columns_eq_keeps_qualified_side() {
		let cond = Condition::columns_eq("author_id", "users.id").qualified("posts");
		assert_eq!(
			cond,
			Condition::ColumnEq {
				left: ColumnRef::table_column("posts", "author_id"),
				right: ColumnRef::table_column("users", "id"),
			}
		);
	}

	#[rstest]
	fn test_values_order_preserved() {
		let cond = Condition::is_in("id", [3i64, 1, 2]);
		let values: Vec<Value> = cond.values().into_iter().cloned().collect();
		assert_eq!(
			values,
			vec![Value::from(3i64), Value::from(1i64), Value::from(2i64)]
		);
	}

	#[rstest]
	fn test_renamed_table() {
		let cond = Condition::gt("users.age", 18i32);
		assert_eq!(
			cond.renamed_table("users", "parent_users"),
			Condition::gt("parent_users.age", 18i32)
		);
	}
}
