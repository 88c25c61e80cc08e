//! Staged query mutations.
//!
//! A [`SortPlan`] collects everything a sort will change in a query: the
//! source alias, the table bare columns are qualified against, the relation
//! joins and the final ORDER BY. It is computed against a read-only query and
//! applied in one step, so a sort that turns out invalid changes nothing.

use relsort_query::{ColumnRef, OrderExpr, SelectStatement};

use crate::join::JoinPlan;
use crate::state::SortDirection;
use crate::validate::OrderTarget;

/// Pending mutations of one sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortPlan {
	source_table: Option<String>,
	source_alias: Option<String>,
	qualify_with: Option<String>,
	joins: Vec<JoinPlan>,
	order: Option<(OrderTarget, SortDirection)>,
}

impl SortPlan {
	/// Start a plan for `query`, whose model is stored in `base_table`.
	///
	/// `base_table` becomes the source when the query has none.
	pub fn new(query: &SelectStatement, base_table: &str) -> Self {
		Self {
			source_table: query.get_from().is_none().then(|| base_table.to_string()),
			..Self::default()
		}
	}

	/// Name of the source table once the plan is applied.
	pub fn source_name(&self, query: &SelectStatement) -> String {
		self.source_alias
			.as_deref()
			.or_else(|| query.source_name())
			.or(self.source_table.as_deref())
			.unwrap_or_default()
			.to_string()
	}

	/// Name of the table the next hop starts from.
	pub fn current_name(&self, query: &SelectStatement) -> String {
		match self.joins.last() {
			Some(join) => join.visible_name().to_string(),
			None => self.source_name(query),
		}
	}

	/// Every table name visible once the plan is applied.
	///
	/// `source_override` stands in for the source name when a source alias is
	/// about to be staged.
	pub fn visible_names(
		&self,
		query: &SelectStatement,
		source_override: Option<&str>,
	) -> Vec<String> {
		let source = source_override
			.map(str::to_string)
			.unwrap_or_else(|| self.source_name(query));
		std::iter::once(source)
			.chain(query.joins().iter().map(|j| j.table.visible_name().to_string()))
			.chain(self.joins.iter().map(|j| j.visible_name().to_string()))
			.collect()
	}

	/// Staged joins, in hop order.
	pub fn joins(&self) -> &[JoinPlan] {
		&self.joins
	}

	/// Staged source alias.
	pub fn source_alias(&self) -> Option<&str> {
		self.source_alias.as_deref()
	}

	/// Table bare columns will be qualified against.
	pub fn qualify_with(&self) -> Option<&str> {
		self.qualify_with.as_deref()
	}

	/// Staged ORDER BY.
	pub fn order(&self) -> Option<&(OrderTarget, SortDirection)> {
		self.order.as_ref()
	}

	pub(crate) fn set_source_alias(&mut self, alias: String) {
		self.source_alias = Some(alias);
	}

	pub(crate) fn set_qualify_with(&mut self, table: String) {
		self.qualify_with = Some(table);
	}

	pub(crate) fn push_join(&mut self, join: JoinPlan) {
		self.joins.push(join);
	}

	/// Stage the final ORDER BY.
	pub fn set_order(&mut self, target: OrderTarget, direction: SortDirection) {
		self.order = Some((target, direction));
	}

	/// Apply every staged mutation to `query`.
	///
	/// Returns the number of joins added. Reused joins and joins already
	/// present are not added again, nor is an ORDER BY entry identical to one
	/// the query already has.
	pub fn apply(self, query: &mut SelectStatement) -> usize {
		if let Some(table) = self.source_table.filter(|_| query.get_from().is_none()) {
			query.from(table);
		}
		if let Some(alias) = &self.source_alias {
			query.alias_source(alias);
		}
		if let Some(table) = &self.qualify_with {
			query.qualify_columns(table);
		}

		let mut added = 0;
		for join in self.joins.iter().filter(|j| !j.reused) {
			let expr = join.to_join_expr();
			if query.has_join(&expr) {
				continue;
			}
			query.join(expr.join, expr.table, expr.on);
			added += 1;
		}

		if let Some((target, direction)) = self.order {
			let expr = OrderExpr {
				key: target.to_order_key(),
				order: direction.into(),
			};
			if query.orders().contains(&expr) {
				return added;
			}
			match target {
				OrderTarget::Column { table, column } => {
					query.order_by(ColumnRef::TableColumn(table, column), direction.into());
				}
				OrderTarget::Alias(alias) => {
					query.order_by_alias(alias, direction.into());
				}
			}
		}
		added
	}
}
