//! Relation path parsing.
//!
//! A sort column may be prefixed by relation hops separated by `.`:
//! `author.profile.city` is the `city` column reached through the `author`
//! and then the `profile` relation.

use crate::error::{SortError, SortResult};

/// Separator between relation hops and the column.
pub const SEPARATOR: char = '.';

/// Split off the first relation hop of `column`.
///
/// Returns `(None, column)` when there is no hop. Paths with an empty
/// segment anywhere are rejected.
///
/// # Examples
///
/// ```rust
/// use relsort_orm::path::resolve;
///
/// assert_eq!(resolve("name").unwrap(), (None, "name"));
/// assert_eq!(resolve("author.profile.city").unwrap(), (Some("author"), "profile.city"));
/// assert!(resolve("author..city").is_err());
/// ```
pub fn resolve(column: &str) -> SortResult<(Option<&str>, &str)> {
	if column.split(SEPARATOR).any(str::is_empty) {
		return Err(SortError::MalformedColumnPath {
			path: column.to_string(),
		});
	}
	Ok(match column.split_once(SEPARATOR) {
		Some((hop, remainder)) => (Some(hop), remainder),
		None => (None, column),
	})
}

/// A column path split into relation hops and the terminal column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationPath {
	/// Relation names, in traversal order
	pub hops: Vec<String>,
	/// Terminal column
	pub column: String,
}

impl RelationPath {
	/// Parse `column`, allowing at most `max_hops` relation hops.
	///
	/// # Examples
	///
	/// ```rust
	/// use relsort_orm::{RelationPath, SortError};
	///
	/// let path = RelationPath::parse("author.profile.city", 4).unwrap();
	/// assert_eq!(path.hops, vec!["author", "profile"]);
	/// assert_eq!(path.column, "city");
	///
	/// assert!(matches!(
	///     RelationPath::parse("a.b.c", 1),
	///     Err(SortError::TooManyHops { hops: 2, limit: 1, .. })
	/// ));
	/// ```
	pub fn parse(column: &str, max_hops: usize) -> SortResult<Self> {
		// Checked before any segment is followed.
		let hops = column.matches(SEPARATOR).count();
		if hops > max_hops {
			return Err(SortError::TooManyHops {
				path: column.to_string(),
				hops,
				limit: max_hops,
			});
		}

		let mut path = Self {
			hops: Vec::with_capacity(hops),
			column: String::new(),
		};
		let mut rest = column;
		loop {
			match resolve(rest)? {
				(Some(hop), remainder) => {
					path.hops.push(hop.to_string());
					rest = remainder;
				}
				(None, terminal) => {
					path.column = terminal.to_string();
					return Ok(path);
				}
			}
		}
	}

	/// Number of relation hops.
	pub fn depth(&self) -> usize {
		self.hops.len()
	}

	/// Whether the path stays on the base model.
	pub fn is_local(&self) -> bool {
		self.hops.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("")]
	#[case(".")]
	#[case(".name")]
	#[case("author.")]
	#[case("author..name")]
	fn test_resolve_rejects_empty_segments(#[case] column: &str) {
		assert!(matches!(
			resolve(column),
			Err(SortError::MalformedColumnPath { .. })
		));
	}

	#[rstest]
	fn test_parse_local_column() {
		let path = RelationPath::parse("created_at", 4).unwrap();

		assert!(path.is_local());
		assert_eq!(path.column, "created_at");
	}

	#[rstest]
	fn test_parse_rejects_too_many_hops_before_segments() {
		// Hop count is checked first, even when segments are empty.
		let result = RelationPath::parse("....", 2);
		assert!(matches!(result, Err(SortError::TooManyHops { hops: 4, .. })));
	}

	proptest! {
		#[test]
		fn prop_parse_round_trips(
			hops in proptest::collection::vec("[a-z_]{1,8}", 0..4),
			column in "[a-z_]{1,8}",
		) {
			let mut full = hops.join(".");
			if !full.is_empty() {
				full.push('.');
			}
			full.push_str(&column);

			let path = RelationPath::parse(&full, 4).unwrap();
			prop_assert_eq!(path.hops, hops);
			prop_assert_eq!(path.column, column);
		}

		#[test]
		fn prop_resolve_splits_on_first_separator(
			hop in "[a-z]{1,6}",
			rest in "[a-z]{1,6}(\\.[a-z]{1,6}){0,2}",
		) {
			let column = format!("{hop}.{rest}");
			let (first, remainder) = resolve(&column).unwrap();
			prop_assert_eq!(first, Some(hop.as_str()));
			prop_assert_eq!(remainder, rest.as_str());
		}
	}
}
