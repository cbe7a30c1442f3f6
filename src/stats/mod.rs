//! Stats module - descriptive statistics and summary tables

mod calculator;

pub use calculator::{ColumnStats, StatsCalculator, TableSummary};
