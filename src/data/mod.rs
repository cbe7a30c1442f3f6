//! Data module - indexed numeric tables extracted from Polars frames

mod table;

pub use table::{DataTable, TableError};

pub(crate) use table::is_numeric_dtype;
