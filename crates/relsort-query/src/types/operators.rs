//! Comparison operators usable in conditions.

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOper {
	/// `=`
	Equal,
	/// `<>`
	NotEqual,
	/// `>`
	GreaterThan,
	/// `>=`
	GreaterThanOrEqual,
	/// `<`
	SmallerThan,
	/// `<=`
	SmallerThanOrEqual,
	/// `LIKE`
	Like,
	/// `NOT LIKE`
	NotLike,
}

impl BinOper {
	/// SQL text for this operator.
	pub fn as_sql(&self) -> &'static str {
		match self {
			Self::Equal => "=",
			Self::NotEqual => "<>",
			Self::GreaterThan => ">",
			Self::GreaterThanOrEqual => ">=",
			Self::SmallerThan => "<",
			Self::SmallerThanOrEqual => "<=",
			Self::Like => "LIKE",
			Self::NotLike => "NOT LIKE",
		}
	}
}
