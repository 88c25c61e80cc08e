//! Type definitions for table references, column references and ordering.
//!
//! - [`TableRef`]: Reference to a table (simple or aliased)
//! - [`ColumnRef`]: Reference to a column (bare, table-qualified or wildcard)
//! - [`IntoTableRef`] / [`IntoColumnRef`]: Conversion traits
//! - [`Order`] / [`JoinType`]: Sort order and join kind
//! - [`BinOper`]: Binary comparison operators

mod column_ref;
mod operators;
mod order;
mod table_ref;

pub use column_ref::{ColumnRef, IntoColumnRef};
pub use operators::BinOper;
pub use order::{JoinType, Order};
pub use table_ref::{IntoTableRef, TableRef};
