//! Charts module - summary annotation, table-chart formatting, rendering

mod annotate;
mod formatter;
mod renderer;

pub use annotate::annotate_summary;
pub use formatter::{format_table_chart, ChartConfig};
pub use renderer::{ChartRenderer, PALETTE};

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid surface: {0}")]
    InvalidSurface(String),
    #[error("Render failed: {0}")]
    Render(String),
}
