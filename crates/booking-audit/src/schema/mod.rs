//! Typed table model and column type inference.

mod column;
mod inference;
mod table;
mod temporal;
mod types;

pub use column::Column;
pub use inference::infer_column;
pub use table::{Table, strip_unit_suffix};
pub use temporal::{ParsedDate, parse_datetime};
pub use types::{ColumnType, Value, ValueKey};
