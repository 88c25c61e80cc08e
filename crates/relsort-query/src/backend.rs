//! SQL Backend implementations
//!
//! This module provides database-specific SQL generation backends for PostgreSQL,
//! MySQL and SQLite. The backends differ only in identifier quoting and
//! placeholder syntax; the statement layout is shared.

use crate::{
	expr::{Condition, SelectExpr},
	query::{JoinExpr, OrderExpr, OrderKey, SelectStatement},
	types::{ColumnRef, TableRef},
	value::{Value, Values},
};

mod mysql;
mod postgres;
mod sql_writer;
mod sqlite;

pub use mysql::MySqlQueryBuilder;
pub use postgres::PostgresQueryBuilder;
pub use sql_writer::SqlWriter;
pub use sqlite::SqliteQueryBuilder;

/// Query builder trait for generating SQL from query statements
///
/// # Implementations
///
/// - [`PostgresQueryBuilder`] - PostgreSQL backend
/// - [`MySqlQueryBuilder`] - MySQL backend
/// - [`SqliteQueryBuilder`] - SQLite backend
///
/// # Examples
///
/// ```rust
/// use relsort_query::prelude::*;
///
/// let mut stmt = Query::select();
/// stmt.column("id").from("users").and_where(Condition::eq("active", true));
///
/// let (sql, values) = MySqlQueryBuilder::new().build_select(&stmt);
/// assert_eq!(sql, "SELECT `id` FROM `users` WHERE `active` = ?");
/// assert_eq!(values.len(), 1);
/// ```
pub trait QueryBuilder {
	/// Quote an identifier, escaping embedded quote characters
	fn escape_identifier(&self, ident: &str) -> String;

	/// Format the placeholder for the 1-based parameter `index`
	fn format_placeholder(&self, index: usize) -> String;

	/// Build SELECT statement
	///
	/// # Returns
	///
	/// A tuple of (SQL string, parameter values)
	fn build_select(&self, stmt: &SelectStatement) -> (String, Values) {
		let mut writer = SqlWriter::new();
		write_select(self, &mut writer, stmt);
		writer.finish()
	}
}

fn write_select<B: QueryBuilder + ?Sized>(b: &B, w: &mut SqlWriter, stmt: &SelectStatement) {
	w.push("SELECT");
	w.push_space();
	if stmt.selects().is_empty() {
		w.push("*");
	} else {
		for (i, select) in stmt.selects().iter().enumerate() {
			if i > 0 {
				w.push_comma();
			}
			match select {
				SelectExpr::Column(column) => write_column_ref(b, w, column),
				SelectExpr::Raw(sql) => w.push(sql),
			}
		}
	}

	if let Some(from) = stmt.get_from() {
		w.push_keyword("FROM");
		w.push_space();
		write_table_ref(b, w, from);
	}

	for join in stmt.joins() {
		write_join(b, w, join);
	}

	if !stmt.wheres().is_empty() {
		w.push_keyword("WHERE");
		w.push_space();
		write_conditions(b, w, stmt.wheres());
	}

	if !stmt.orders().is_empty() {
		w.push_keyword("ORDER BY");
		w.push_space();
		for (i, order) in stmt.orders().iter().enumerate() {
			if i > 0 {
				w.push_comma();
			}
			write_order(b, w, order);
		}
	}

	if let Some(limit) = stmt.get_limit() {
		w.push_keyword("LIMIT");
		w.push_space();
		w.push_value(Value::from(limit), |i| b.format_placeholder(i));
	}

	if let Some(offset) = stmt.get_offset() {
		w.push_keyword("OFFSET");
		w.push_space();
		w.push_value(Value::from(offset), |i| b.format_placeholder(i));
	}
}

fn write_table_ref<B: QueryBuilder + ?Sized>(b: &B, w: &mut SqlWriter, table: &TableRef) {
	match table {
		TableRef::Table(name) => w.push_identifier(name, |s| b.escape_identifier(s)),
		TableRef::TableAlias(name, alias) => {
			w.push_identifier(name, |s| b.escape_identifier(s));
			w.push_keyword("AS");
			w.push_space();
			w.push_identifier(alias, |s| b.escape_identifier(s));
		}
	}
}

fn write_column_ref<B: QueryBuilder + ?Sized>(b: &B, w: &mut SqlWriter, column: &ColumnRef) {
	match column {
		ColumnRef::Column(name) => w.push_identifier(name, |s| b.escape_identifier(s)),
		ColumnRef::TableColumn(table, name) => {
			w.push_identifier(table, |s| b.escape_identifier(s));
			w.push(".");
			w.push_identifier(name, |s| b.escape_identifier(s));
		}
		ColumnRef::Asterisk => w.push("*"),
		ColumnRef::TableAsterisk(table) => {
			w.push_identifier(table, |s| b.escape_identifier(s));
			w.push(".*");
		}
	}
}

fn write_join<B: QueryBuilder + ?Sized>(b: &B, w: &mut SqlWriter, join: &JoinExpr) {
	w.push_keyword(join.join.as_sql());
	w.push_space();
	write_table_ref(b, w, &join.table);
	w.push_keyword("ON");
	w.push_space();
	if join.on.is_empty() {
		w.push("1 = 1");
	} else {
		write_conditions(b, w, &join.on);
	}
}

fn write_order<B: QueryBuilder + ?Sized>(b: &B, w: &mut SqlWriter, order: &OrderExpr) {
	match &order.key {
		OrderKey::Column(column) => write_column_ref(b, w, column),
		OrderKey::Alias(alias) => w.push_identifier(alias, |s| b.escape_identifier(s)),
	}
	w.push_keyword(order.order.as_sql());
}

fn write_conditions<B: QueryBuilder + ?Sized>(b: &B, w: &mut SqlWriter, conditions: &[Condition]) {
	for (i, condition) in conditions.iter().enumerate() {
		if i > 0 {
			w.push_keyword("AND");
			w.push_space();
		}
		write_condition(b, w, condition);
	}
}

fn write_condition<B: QueryBuilder + ?Sized>(b: &B, w: &mut SqlWriter, condition: &Condition) {
	match condition {
		Condition::Compare { column, op, value } => {
			write_column_ref(b, w, column);
			w.push_keyword(op.as_sql());
			w.push_space();
			w.push_value(value.clone(), |i| b.format_placeholder(i));
		}
		Condition::In {
			values, negated, ..
		} if values.is_empty() => {
			// Empty lists are not valid SQL
			w.push(if *negated { "1 = 1" } else { "1 = 0" });
		}
		Condition::In {
			column,
			values,
			negated,
		} => {
			write_column_ref(b, w, column);
			w.push_keyword(if *negated { "NOT IN" } else { "IN" });
			w.push(" (");
			for (i, value) in values.iter().enumerate() {
				if i > 0 {
					w.push_comma();
				}
				w.push_value(value.clone(), |i| b.format_placeholder(i));
			}
			w.push(")");
		}
		Condition::Null { column, negated } => {
			write_column_ref(b, w, column);
			w.push_keyword(if *negated { "IS NOT NULL" } else { "IS NULL" });
		}
		Condition::ColumnEq { left, right } => {
			write_column_ref(b, w, left);
			w.push(" = ");
			write_column_ref(b, w, right);
		}
		Condition::Raw { sql, values } => {
			// Surplus placeholders stay literal; surplus values are not rendered.
			let mut values = values.iter();
			w.push("(");
			for ch in sql.chars() {
				if ch != '?' {
					w.push_char(ch);
					continue;
				}
				match values.next() {
					Some(value) => {
						w.push_value(value.clone(), |i| b.format_placeholder(i));
					}
					None => w.push_char('?'),
				}
			}
			w.push(")");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{query::Query, types::Order};
	use rstest::rstest;

	#[rstest]
	fn test_select_star_when_no_columns() {
		let mut stmt = Query::select();
		stmt.from("users");

		let (sql, values) = PostgresQueryBuilder::new().build_select(&stmt);
		assert_eq!(sql, r#"SELECT * FROM "users""#);
		assert!(values.is_empty());
	}

	#[rstest]
	fn test_join_with_compound_on_clause() {
		let mut stmt = Query::select();
		stmt.from("posts").column("posts.*").left_join(
			"users",
			vec![
				Condition::columns_eq("posts.author_id", "users.id"),
				Condition::eq("users.active", true),
			],
		);

		let (sql, values) = PostgresQueryBuilder::new().build_select(&stmt);
		assert_eq!(
			sql,
			r#"SELECT "posts".* FROM "posts" LEFT JOIN "users" ON "posts"."author_id" = "users"."id" AND "users"."active" = $1"#
		);
		assert_eq!(values.0, vec![Value::Bool(Some(true))]);
	}

	#[rstest]
	fn test_raw_condition_binds_in_order() {
		let mut stmt = Query::select();
		stmt.from("posts")
			.and_where(Condition::eq("published", true))
			.and_where(Condition::raw("score > ? OR score < ?", [10i64, -10i64]));

		let (sql, values) = PostgresQueryBuilder::new().build_select(&stmt);
		assert_eq!(
			sql,
			r#"SELECT * FROM "posts" WHERE "published" = $1 AND (score > $2 OR score < $3)"#
		);
		assert_eq!(
			values.0,
			vec![
				Value::Bool(Some(true)),
				Value::BigInt(Some(10)),
				Value::BigInt(Some(-10)),
			]
		);
	}

	#[rstest]
	#[case(Condition::is_in("id", Vec::<i64>::new()), "1 = 0")]
	#[case(Condition::not_in("id", Vec::<i64>::new()), "1 = 1")]
	#[case(Condition::is_null("deleted_at"), "`deleted_at` IS NULL")]
	#[case(Condition::is_not_null("deleted_at"), "`deleted_at` IS NOT NULL")]
	#[case(Condition::is_in("id", [1i64, 2]), "`id` IN (?, ?)")]
	fn test_condition_rendering(#[case] condition: Condition, #[case] expected: &str) {
		let mut stmt = Query::select();
		stmt.from("t").and_where(condition);

		let (sql, _) = MySqlQueryBuilder::new().build_select(&stmt);
		assert_eq!(sql, format!("SELECT * FROM `t` WHERE {expected}"));
	}

	#[rstest]
	fn test_order_by_alias_and_column() {
		let mut stmt = Query::select();
		stmt.from_as("users", "parent_users")
			.expr("COUNT(posts.id) AS post_count")
			.order_by(("parent_users", "name"), Order::Desc)
			.order_by_alias("post_count", Order::Asc)
			.limit(5)
			.offset(10);

		let (sql, values) = SqliteQueryBuilder::new().build_select(&stmt);
		assert_eq!(
			sql,
			r#"SELECT COUNT(posts.id) AS post_count FROM "users" AS "parent_users" ORDER BY "parent_users"."name" DESC, "post_count" ASC LIMIT ? OFFSET ?"#
		);
		assert_eq!(values.len(), 2);
	}
}
