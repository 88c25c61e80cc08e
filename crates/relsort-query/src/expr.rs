//! Conditions and select expressions.
//!
//! - [`Condition`]: A single boolean predicate usable in WHERE and ON clauses
//! - [`SelectExpr`]: An entry of the select list (column or raw SQL)

mod condition;
mod select_expr;

pub use condition::Condition;
pub use select_expr::SelectExpr;
