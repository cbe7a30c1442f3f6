//! Statistics Calculator Module
//! Per-column descriptive summaries in the row-per-statistic table layout.

use crate::data::DataTable;
use rayon::prelude::*;
use std::fmt;

/// Descriptive statistics for a single numeric column.
///
/// `std` is the sample standard deviation (n - 1 denominator); a single-value
/// column yields 0.0. Quartiles use linear interpolation between the two
/// nearest order statistics.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Descriptive statistics for every column of a table, in column order.
#[derive(Debug, Clone, Default)]
pub struct TableSummary {
    pub columns: Vec<ColumnStats>,
}

const SUMMARY_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl TableSummary {
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}", "")?;
        for col in &self.columns {
            write!(f, "{:>14}", col.name)?;
        }
        writeln!(f)?;

        for row in SUMMARY_ROWS {
            write!(f, "{:<8}", row)?;
            for col in &self.columns {
                let value = match row {
                    "count" => col.count as f64,
                    "mean" => col.mean,
                    "std" => col.std,
                    "min" => col.min,
                    "25%" => col.q25,
                    "50%" => col.median,
                    "75%" => col.q75,
                    _ => col.max,
                };
                write!(f, "{:>14.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// NaN entries are skipped; an empty or all-NaN input yields the
    /// NaN-filled default with count 0.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnStats {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = sorted.len();
        if n == 0 {
            return ColumnStats::default();
        }

        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ColumnStats {
            name: String::new(),
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Compute statistics for every column of a table in parallel.
    pub fn describe_table(table: &DataTable) -> TableSummary {
        let columns = table
            .columns()
            .par_iter()
            .map(|(name, values)| {
                let mut stats = Self::compute_descriptive_stats(values);
                stats.name = name.clone();
                stats
            })
            .collect();

        TableSummary { columns }
    }
}
