//! Join synthesis for relation hops.
//!
//! [`plan_join`] turns one relation hop into a [`JoinPlan`] and stages it on a
//! [`SortPlan`]. The query itself is only read; nothing is written to it until
//! the plan is applied.

use relsort_query::{ColumnRef, Condition, JoinExpr, JoinType, SelectStatement, TableRef};

use crate::error::{SortError, SortResult};
use crate::metadata::{MetadataProvider, ModelMeta, RelationKind};
use crate::plan::SortPlan;

/// Join kind used for every relation hop.
///
/// Parent rows without a related row are kept.
pub const JOIN_TYPE: JoinType = JoinType::LeftJoin;

/// One staged relation join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinPlan {
	/// Relation the join was derived from
	pub relation: String,
	/// Related table
	pub table: String,
	/// Alias of the related table, when its name is already taken
	pub alias: Option<String>,
	/// Key on the parent side
	pub parent_key: ColumnRef,
	/// Key on the related side
	pub related_key: ColumnRef,
	/// Relation predicates, qualified against the related side
	pub predicates: Vec<Condition>,
	/// Whether an identical join is already present in the query
	pub reused: bool,
}

impl JoinPlan {
	/// Name other clauses use for the related table.
	pub fn visible_name(&self) -> &str {
		self.alias.as_deref().unwrap_or(&self.table)
	}

	/// Table reference of the related side.
	pub fn table_ref(&self) -> TableRef {
		match &self.alias {
			Some(alias) => TableRef::table_alias(&self.table, alias),
			None => TableRef::table(&self.table),
		}
	}

	/// ON conditions: the key equality followed by the predicates.
	pub fn on_conditions(&self) -> Vec<Condition> {
		std::iter::once(Condition::ColumnEq {
			left: self.parent_key.clone(),
			right: self.related_key.clone(),
		})
		.chain(self.predicates.iter().cloned())
		.collect()
	}

	/// The join clause this plan adds.
	pub fn to_join_expr(&self) -> JoinExpr {
		JoinExpr {
			join: JOIN_TYPE,
			table: self.table_ref(),
			on: self.on_conditions(),
		}
	}
}

/// Stage the join for `relation_name` of `current_model` on `plan`.
///
/// Returns the related model, which becomes the current model of the next
/// hop. On error `plan` is left unchanged.
///
/// The parent side is the source table on the first hop and the previous
/// join afterwards. When the first hop points back at the source table, the
/// source is aliased as `parent_<table>`, unless raw SQL in the query
/// qualifies columns with the source name. When the related table is already
/// visible in the query, the related side is aliased as `<relation>_<table>`.
pub fn plan_join<'p, P>(
	provider: &'p P,
	query: &SelectStatement,
	plan: &mut SortPlan,
	current_model: &str,
	relation_name: &str,
) -> SortResult<&'p ModelMeta>
where
	P: MetadataProvider + ?Sized,
{
	let current = provider
		.model(current_model)
		.ok_or_else(|| SortError::UnknownModel {
			model: current_model.to_string(),
		})?;
	let relation = current
		.get_relation(relation_name)
		.ok_or_else(|| SortError::UnknownRelation {
			model: current_model.to_string(),
			relation: relation_name.to_string(),
		})?;
	let (parent_column, related_column) = match &relation.kind {
		RelationKind::HasOne => (&relation.other_key, &relation.foreign_key),
		RelationKind::BelongsTo => (&relation.foreign_key, &relation.other_key),
		RelationKind::Unsupported(kind) => {
			return Err(SortError::UnsupportedRelationKind {
				relation: relation_name.to_string(),
				kind: kind.clone(),
			});
		}
	};
	let related = provider
		.model(&relation.related_model)
		.ok_or_else(|| SortError::UnknownModel {
			model: relation.related_model.clone(),
		})?;
	let related_table = related.table();

	let first_hop = plan.joins().is_empty();
	let mut source_alias = None;
	let parent = if first_hop {
		let source = plan.source_name(query);
		if source != related_table {
			source
		} else if query.raw_references_table(&source) {
			tracing::debug!(
				model = current_model,
				relation = relation_name,
				table = related_table,
				"source kept unaliased: raw SQL references it"
			);
			source
		} else {
			let alias = format!("parent_{related_table}");
			source_alias = Some(alias.clone());
			alias
		}
	} else {
		plan.current_name(query)
	};

	let build = |alias: Option<String>| {
		let visible = alias.as_deref().unwrap_or(related_table);
		let predicates = relation
			.predicates
			.iter()
			.map(|p| {
				let p = match &alias {
					Some(alias) => p.renamed_table(related_table, alias),
					None => p.clone(),
				};
				p.qualified(visible)
			})
			.collect();
		JoinPlan {
			relation: relation_name.to_string(),
			table: related_table.to_string(),
			parent_key: ColumnRef::table_column(&parent, parent_column),
			related_key: ColumnRef::table_column(visible, related_column),
			predicates,
			alias,
			reused: false,
		}
	};

	let mut join = build(None);
	let expr = join.to_join_expr();
	if query.has_join(&expr) || plan.joins().iter().any(|j| j.to_join_expr() == expr) {
		join.reused = true;
	} else {
		let visible = plan.visible_names(query, source_alias.as_deref());
		if visible.iter().any(|name| name == related_table) {
			let alias = unique_alias(&format!("{relation_name}_{related_table}"), &visible);
			join = build(Some(alias));
		}
	}

	tracing::debug!(
		model = current_model,
		relation = relation_name,
		table = related_table,
		alias = join.alias.as_deref(),
		reused = join.reused,
		"staged relation join"
	);

	if first_hop {
		if let Some(alias) = source_alias {
			plan.set_source_alias(alias);
		}
		plan.set_qualify_with(parent);
	}
	plan.push_join(join);
	Ok(related)
}

fn unique_alias(base: &str, visible: &[String]) -> String {
	if !visible.iter().any(|name| name == base) {
		return base.to_string();
	}
	(2..)
		.map(|n| format!("{base}_{n}"))
		.find(|candidate| !visible.iter().any(|name| name == candidate))
		.unwrap_or_else(|| base.to_string())
}
