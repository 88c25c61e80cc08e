//! SQL parameter values.
//!
//! Values are never interpolated into SQL text. Backends emit a placeholder
//! for every non-NULL value and return the values alongside the statement.

/// Core value representation for SQL parameters.
///
/// All variants use `Option<T>` to represent nullable values. A `None` value
/// is rendered as SQL `NULL` without consuming a placeholder.
///
/// # Examples
///
/// ```rust
/// use relsort_query::Value;
///
/// let int_val = Value::BigInt(Some(42));
/// let null_int = Value::BigInt(None);
/// let string_val = Value::from("hello");
///
/// assert!(!int_val.is_null());
/// assert!(null_int.is_null());
/// assert_eq!(string_val, Value::String(Some(Box::new("hello".to_string()))));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// Boolean value
	Bool(Option<bool>),
	/// 32-bit signed integer
	Int(Option<i32>),
	/// 64-bit signed integer
	BigInt(Option<i64>),
	/// 64-bit unsigned integer
	BigUnsigned(Option<u64>),
	/// 64-bit floating point
	Double(Option<f64>),
	/// String value (boxed)
	String(Option<Box<String>>),
}

impl Value {
	/// Returns `true` when the value represents SQL `NULL`.
	pub fn is_null(&self) -> bool {
		match self {
			Self::Bool(v) => v.is_none(),
			Self::Int(v) => v.is_none(),
			Self::BigInt(v) => v.is_none(),
			Self::BigUnsigned(v) => v.is_none(),
			Self::Double(v) => v.is_none(),
			Self::String(v) => v.is_none(),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Self::Bool(Some(v))
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Self::Int(Some(v))
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Self::BigInt(Some(v))
	}
}

impl From<u64> for Value {
	fn from(v: u64) -> Self {
		Self::BigUnsigned(Some(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Self::Double(Some(v))
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Self::String(Some(Box::new(v.to_string())))
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Self::String(Some(Box::new(v)))
	}
}

/// Ordered collection of bound parameter values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values(pub Vec<Value>);

impl Values {
	/// Create an empty collection
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a value
	pub fn push(&mut self, value: Value) {
		self.0.push(value);
	}

	/// Number of values
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether no values are present
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over the values in binding order
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.0.iter()
	}
}

impl IntoIterator for Values {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Values {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl FromIterator<Value> for Values {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Value::Bool(None))]
	#[case(Value::Int(None))]
	#[case(Value::BigInt(None))]
	#[case(Value::Double(None))]
	#[case(Value::String(None))]
	fn test_null_variants(#[case] value: Value) {
		assert!(value.is_null());
	}

	#[rstest]
	fn test_values_preserve_order() {
		let values: Values = vec![Value::from(1i64), Value::from("a"), Value::from(true)]
			.into_iter()
			.collect();

		assert_eq!(values.len(), 3);
		assert_eq!(values.0[0], Value::BigInt(Some(1)));
		assert_eq!(values.0[2], Value::Bool(Some(true)));
	}
}
