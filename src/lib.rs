//! Plotkit - Table Chart Formatting & Summary Annotation Helpers
//!
//! Helper routines for plotting Polars tables and stamping descriptive
//! statistics onto charts.

pub mod charts;
pub mod data;
pub mod figure;
pub mod stats;

pub use charts::{annotate_summary, format_table_chart, ChartConfig, ChartError, ChartRenderer};
pub use data::{DataTable, TableError};
pub use figure::{Annotation, Axis, Figure, PlotSurface, SeriesLine};
pub use stats::{ColumnStats, StatsCalculator, TableSummary};
