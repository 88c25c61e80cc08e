//! Sort order and join kinds.

use serde::{Deserialize, Serialize};

/// Sort direction in ORDER BY.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
	/// Ascending order
	#[default]
	Asc,
	/// Descending order
	Desc,
}

impl Order {
	/// SQL keyword for this order.
	pub fn as_sql(&self) -> &'static str {
		match self {
			Self::Asc => "ASC",
			Self::Desc => "DESC",
		}
	}

	/// The opposite direction.
	pub fn reverse(self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
	/// INNER JOIN
	InnerJoin,
	/// LEFT JOIN
	LeftJoin,
	/// RIGHT JOIN
	RightJoin,
}

impl JoinType {
	/// SQL keyword for this join kind.
	pub fn as_sql(&self) -> &'static str {
		match self {
			Self::InnerJoin => "INNER JOIN",
			Self::LeftJoin => "LEFT JOIN",
			Self::RightJoin => "RIGHT JOIN",
		}
	}
}
