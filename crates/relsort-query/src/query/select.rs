//! SELECT statement builder.
//!
//! Besides the usual builder methods, [`SelectStatement`] exposes the two
//! rewrites needed to add joins to an existing query safely:
//! [`SelectStatement::qualify_columns`] and [`SelectStatement::alias_source`].

use regex::Regex;

use crate::expr::{Condition, SelectExpr};
use crate::types::{ColumnRef, IntoColumnRef, IntoTableRef, JoinType, Order, TableRef};

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpr {
	/// Join kind
	pub join: JoinType,
	/// Joined table, optionally aliased
	pub table: TableRef,
	/// ON conditions, combined with `AND`
	pub on: Vec<Condition>,
}

/// What an ORDER BY entry sorts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderKey {
	/// A column reference, rendered with escaped identifiers
	Column(ColumnRef),
	/// A computed select alias, rendered as an escaped bare identifier
	Alias(String),
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderExpr {
	/// Sort key
	pub key: OrderKey,
	/// Direction
	pub order: Order,
}

/// SELECT statement builder.
///
/// # Examples
///
/// ```rust
/// use relsort_query::prelude::*;
///
/// let mut stmt = Query::select();
/// stmt.from("posts")
///     .column("title")
///     .and_where(Condition::eq("published", true))
///     .limit(10);
///
/// let (sql, values) = PostgresQueryBuilder::new().build_select(&stmt);
/// assert_eq!(
///     sql,
///     r#"SELECT "title" FROM "posts" WHERE "published" = $1 LIMIT $2"#
/// );
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
	from: Option<TableRef>,
	selects: Vec<SelectExpr>,
	joins: Vec<JoinExpr>,
	wheres: Vec<Condition>,
	orders: Vec<OrderExpr>,
	limit: Option<u64>,
	offset: Option<u64>,
}

impl SelectStatement {
	/// Create an empty statement.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the source table.
	pub fn from<T: IntoTableRef>(&mut self, table: T) -> &mut Self {
		self.from = Some(table.into_table_ref());
		self
	}

	/// Set the source table with an alias.
	pub fn from_as(&mut self, table: impl Into<String>, alias: impl Into<String>) -> &mut Self {
		self.from = Some(TableRef::table_alias(table, alias));
		self
	}

	/// Add a column to the select list.
	pub fn column<C: IntoColumnRef>(&mut self, column: C) -> &mut Self {
		self.selects.push(SelectExpr::column(column));
		self
	}

	/// Add several columns to the select list.
	pub fn columns<I, C>(&mut self, columns: I) -> &mut Self
	where
		I: IntoIterator<Item = C>,
		C: IntoColumnRef,
	{
		self.selects
			.extend(columns.into_iter().map(SelectExpr::column));
		self
	}

	/// Add a raw expression to the select list.
	pub fn expr(&mut self, sql: impl Into<String>) -> &mut Self {
		self.selects.push(SelectExpr::raw(sql));
		self
	}

	/// Add a join of the given kind.
	pub fn join<T: IntoTableRef>(
		&mut self,
		join: JoinType,
		table: T,
		on: Vec<Condition>,
	) -> &mut Self {
		self.joins.push(JoinExpr {
			join,
			table: table.into_table_ref(),
			on,
		});
		self
	}

	/// Add a LEFT JOIN.
	pub fn left_join<T: IntoTableRef>(&mut self, table: T, on: Vec<Condition>) -> &mut Self {
		self.join(JoinType::LeftJoin, table, on)
	}

	/// Add a WHERE condition. Conditions are combined with `AND`.
	pub fn and_where(&mut self, condition: Condition) -> &mut Self {
		self.wheres.push(condition);
		self
	}

	/// Order by a column.
	pub fn order_by<C: IntoColumnRef>(&mut self, column: C, order: Order) -> &mut Self {
		self.orders.push(OrderExpr {
			key: OrderKey::Column(column.into_column_ref()),
			order,
		});
		self
	}

	/// Order by a computed select alias.
	pub fn order_by_alias(&mut self, alias: impl Into<String>, order: Order) -> &mut Self {
		self.orders.push(OrderExpr {
			key: OrderKey::Alias(alias.into()),
			order,
		});
		self
	}

	/// Set LIMIT.
	pub fn limit(&mut self, limit: u64) -> &mut Self {
		self.limit = Some(limit);
		self
	}

	/// Set OFFSET.
	pub fn offset(&mut self, offset: u64) -> &mut Self {
		self.offset = Some(offset);
		self
	}

	/// Source table reference.
	pub fn get_from(&self) -> Option<&TableRef> {
		self.from.as_ref()
	}

	/// Select list.
	pub fn selects(&self) -> &[SelectExpr] {
		&self.selects
	}

	/// Joins, in insertion order.
	pub fn joins(&self) -> &[JoinExpr] {
		&self.joins
	}

	/// WHERE conditions.
	pub fn wheres(&self) -> &[Condition] {
		&self.wheres
	}

	/// ORDER BY entries.
	pub fn orders(&self) -> &[OrderExpr] {
		&self.orders
	}

	/// LIMIT, if set.
	pub fn get_limit(&self) -> Option<u64> {
		self.limit
	}

	/// OFFSET, if set.
	pub fn get_offset(&self) -> Option<u64> {
		self.offset
	}

	/// Name other clauses use for the source table (its alias if aliased).
	pub fn source_name(&self) -> Option<&str> {
		self.from.as_ref().map(TableRef::visible_name)
	}

	/// Every table name or alias visible in FROM and JOIN clauses.
	pub fn visible_table_names(&self) -> Vec<&str> {
		self.from
			.iter()
			.chain(self.joins.iter().map(|j| &j.table))
			.map(TableRef::visible_name)
			.collect()
	}

	/// Whether an identical join is already present.
	pub fn has_join(&self, join: &JoinExpr) -> bool {
		self.joins.iter().any(|j| j == join)
	}

	/// Raw SQL of the select list, WHERE conditions and join conditions.
	pub fn raw_fragments(&self) -> impl Iterator<Item = &str> {
		let selects = self.selects.iter().filter_map(|select| match select {
			SelectExpr::Raw(sql) => Some(sql.as_str()),
			SelectExpr::Column(_) => None,
		});
		let conditions = self
			.wheres
			.iter()
			.chain(self.joins.iter().flat_map(|join| join.on.iter()))
			.filter_map(|condition| match condition {
				Condition::Raw { sql, .. } => Some(sql.as_str()),
				_ => None,
			});
		selects.chain(conditions)
	}

	/// Whether a raw fragment qualifies a column with `table`, as in
	/// `table.column` or `"table".column`.
	///
	/// Raw SQL is never rewritten, so renaming `table` would change what such
	/// a fragment refers to.
	pub fn raw_references_table(&self, table: &str) -> bool {
		let pattern = format!(
			r#"(?i)(?:^|[^A-Za-z0-9_])[`"\[]?{}[`"\]]?\s*\."#,
			regex::escape(table)
		);
		match Regex::new(&pattern) {
			Ok(re) => self.raw_fragments().any(|sql| re.is_match(sql)),
			Err(_) => self.raw_fragments().next().is_some(),
		}
	}

	/// Qualify bare column references against `table`.
	///
	/// Applies to the select list, WHERE conditions and column ORDER BY
	/// entries. An empty select list becomes `table.*`. Raw expressions,
	/// alias orderings and existing join conditions are left as they are.
	pub fn qualify_columns(&mut self, table: &str) -> &mut Self {
		if self.selects.is_empty() {
			self.selects.push(SelectExpr::Column(ColumnRef::TableAsterisk(
				table.to_string(),
			)));
		} else {
			for select in &mut self.selects {
				if let SelectExpr::Column(column) = select {
					*column = column.qualified(table);
				}
			}
		}
		for condition in &mut self.wheres {
			*condition = condition.qualified(table);
		}
		for order in &mut self.orders {
			if let OrderKey::Column(column) = &mut order.key {
				*column = column.qualified(table);
			}
		}
		self
	}

	/// Rename every `from.column` reference to `to.column`.
	pub fn rename_table(&mut self, from: &str, to: &str) -> &mut Self {
		for select in &mut self.selects {
			if let SelectExpr::Column(column) = select {
				*column = column.renamed_table(from, to);
			}
		}
		for condition in &mut self.wheres {
			*condition = condition.renamed_table(from, to);
		}
		for join in &mut self.joins {
			for condition in &mut join.on {
				*condition = condition.renamed_table(from, to);
			}
		}
		for order in &mut self.orders {
			if let OrderKey::Column(column) = &mut order.key {
				*column = column.renamed_table(from, to);
			}
		}
		self
	}

	/// Alias the source table and rename references to it.
	///
	/// Does nothing when no source table is set.
	pub fn alias_source(&mut self, alias: &str) -> &mut Self {
		let Some(from) = self.from.take() else {
			return self;
		};
		let previous = from.visible_name().to_string();
		self.from = Some(TableRef::table_alias(from.name(), alias));
		if previous != alias {
			self.rename_table(&previous, alias);
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Value;
	use rstest::rstest;

	#[rstest]
	fn test_qualify_columns_on_empty_select() {
		let mut stmt = SelectStatement::new();
		stmt.from("users").qualify_columns("users");

		assert_eq!(
			stmt.selects(),
			&[SelectExpr::Column(ColumnRef::TableAsterisk("users".into()))]
		);
	}

	#[rstest]
	fn test_qualify_columns_keeps_qualified_and_raw() {
		let mut stmt = SelectStatement::new();
		stmt.from("users")
			.column("id")
			.column("profiles.city")
			.expr("COUNT(*) AS total")
			.and_where(Condition::eq("active", true))
			.order_by("name", Order::Desc)
			.order_by_alias("total", Order::Asc);

		stmt.qualify_columns("users");

		assert_eq!(
			stmt.selects(),
			&[
				SelectExpr::column(("users", "id")),
				SelectExpr::column(("profiles", "city")),
				SelectExpr::raw("COUNT(*) AS total"),
			]
		);
		assert_eq!(
			stmt.wheres(),
			&[Condition::eq(ColumnRef::table_column("users", "active"), true)]
		);
		assert_eq!(
			stmt.orders()[0].key,
			OrderKey::Column(ColumnRef::table_column("users", "name"))
		);
		assert_eq!(stmt.orders()[1].key, OrderKey::Alias("total".into()));
	}

	#[rstest]
	fn test_alias_source_renames_references() {
		let mut stmt = SelectStatement::new();
		stmt.from("users")
			.column("users.id")
			.column("posts.id")
			.and_where(Condition::gt("users.age", Value::from(18i32)));

		stmt.alias_source("parent_users");

		assert_eq!(
			stmt.get_from(),
			Some(&TableRef::table_alias("users", "parent_users"))
		);
		assert_eq!(
			stmt.selects(),
			&[
				SelectExpr::column(("parent_users", "id")),
				SelectExpr::column(("posts", "id")),
			]
		);
		assert_eq!(stmt.wheres(), &[Condition::gt("parent_users.age", 18i32)]);
	}

	#[rstest]
	fn test_visible_names_and_has_join() {
		let mut stmt = SelectStatement::new();
		let on = vec![Condition::columns_eq("users.id", "profiles.user_id")];
		stmt.from("users").left_join(("profiles", "p"), on.clone());

		assert_eq!(stmt.visible_table_names(), vec!["users", "p"]);
		assert!(stmt.has_join(&JoinExpr {
			join: JoinType::LeftJoin,
			table: TableRef::table_alias("profiles", "p"),
			on,
		}));
	}

	#[rstest]
	#[case::raw_select(SelectStatement::new().from("users").expr("UPPER(users.name) AS uname").clone(), true)]
	#[case::quoted(SelectStatement::new().from("users").expr("LOWER(\"users\".email) AS e").clone(), true)]
	#[case::raw_where(SelectStatement::new().from("users").and_where(Condition::raw("Users.active = ?", [true])).clone(), true)]
	#[case::raw_join(SelectStatement::new().from("posts").left_join("tags", vec![Condition::raw("tags.post_id = users.id", Vec::<Value>::new())]).clone(), true)]
	#[case::other_table(SelectStatement::new().from("users").expr("COUNT(admin_users.id) AS n").clone(), false)]
	#[case::bare_word(SelectStatement::new().from("users").and_where(Condition::raw("users = ?", [1i32])).clone(), false)]
	#[case::structured_only(SelectStatement::new().from("users").column("users.name").and_where(Condition::eq("users.active", true)).clone(), false)]
	fn test_raw_references_table(#[case] stmt: SelectStatement, #[case] expected: bool) {
		assert_eq!(stmt.raw_references_table("users"), expected);
	}
}
