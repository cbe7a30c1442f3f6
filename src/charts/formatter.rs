//! Table Chart Formatter Module
//! Plots every column of a table onto a fresh axis and prints the table's
//! descriptive summary.

use crate::charts::ChartError;
use crate::data::DataTable;
use crate::figure::{Axis, Figure};
use crate::stats::StatsCalculator;
use serde::{Deserialize, Serialize};

/// Display options for [`format_table_chart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Increment between x-axis ticks.
    pub x_tick: f64,
    /// Increment between y-axis ticks.
    pub y_tick: f64,
    /// Figure length (width), in figure units.
    pub fig_length: f64,
    /// Figure breadth (height), in figure units.
    pub fig_breadth: f64,
    pub x_label_font_size: f32,
    pub y_label_font_size: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_tick: 1.0,
            y_tick: 0.2,
            fig_length: 16.0,
            fig_breadth: 9.0,
            x_label_font_size: 18.0,
            y_label_font_size: 16.0,
        }
    }
}

/// Plot every column of `data` against its index onto a new single-axis figure.
///
/// Axis labels, label font sizes, title, and tick increments come from the
/// arguments. Tick positions cover the half-open range from each axis minimum
/// up to (excluding) its maximum, stepped by the configured increment; the
/// y range spans the global minimum and maximum across all columns. The
/// table's descriptive summary is printed to stdout as a side effect.
/// Returns the configured axis for further caller-side composition.
pub fn format_table_chart(
    data: &DataTable,
    x_label: &str,
    y_label: &str,
    title: &str,
    config: &ChartConfig,
) -> Result<Axis, ChartError> {
    if data.width() == 0 {
        return Err(ChartError::InvalidInput(
            "table has no value columns".to_string(),
        ));
    }
    if data.height() == 0 {
        return Err(ChartError::InvalidInput("table has no rows".to_string()));
    }
    validate_config(config)?;

    let mut axis = Figure::new(config.fig_length, config.fig_breadth).into_single_axis();

    for (name, values) in data.columns() {
        let points: Vec<(f64, f64)> = data
            .index()
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect();
        axis.plot_line(name, points);
    }

    axis.set_x_label_font_size(config.x_label_font_size);
    axis.set_y_label_font_size(config.y_label_font_size);
    axis.set_labels(x_label, y_label);
    axis.set_title(title);

    if let Some((min, max)) = data.index_range() {
        axis.set_x_ticks(arange(min, max, config.x_tick));
    }
    if let Some((min, max)) = data.value_range() {
        axis.set_y_ticks(arange(min, max, config.y_tick));
    }

    print!("{}", StatsCalculator::describe_table(data));

    Ok(axis)
}

fn validate_config(config: &ChartConfig) -> Result<(), ChartError> {
    if config.x_tick <= 0.0 {
        return Err(ChartError::InvalidInput(format!(
            "x_tick must be positive, got {}",
            config.x_tick
        )));
    }
    if config.y_tick <= 0.0 {
        return Err(ChartError::InvalidInput(format!(
            "y_tick must be positive, got {}",
            config.y_tick
        )));
    }
    if config.fig_length <= 0.0 || config.fig_breadth <= 0.0 {
        return Err(ChartError::InvalidInput(format!(
            "figure size must be positive, got {}x{}",
            config.fig_length, config.fig_breadth
        )));
    }
    if config.x_label_font_size <= 0.0 || config.y_label_font_size <= 0.0 {
        return Err(ChartError::InvalidInput(
            "label font sizes must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Half-open arithmetic sequence `start, start + step, ... < stop`.
///
/// The element count is ceil((stop - start) / step), so `start == stop`
/// yields an empty sequence and a step larger than the span yields just
/// `start`. Callers must pass a positive step.
pub(crate) fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let span = stop - start;
    if span <= 0.0 {
        return Vec::new();
    }
    let count = (span / step).ceil() as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_column_table() -> DataTable {
        DataTable::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![("A".to_string(), vec![1.0, 2.0, 3.0, 4.0])],
        )
        .unwrap()
    }

    #[test]
    fn test_arange_half_open() {
        assert_eq!(arange(0.0, 3.0, 1.0), vec![0.0, 1.0, 2.0]);
        assert_eq!(arange(1.0, 4.0, 1.0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_arange_degenerate_span_is_empty() {
        assert!(arange(2.0, 2.0, 1.0).is_empty());
        assert!(arange(3.0, 2.0, 1.0).is_empty());
    }

    #[test]
    fn test_arange_step_beyond_span() {
        assert_eq!(arange(0.0, 1.0, 5.0), vec![0.0]);
    }

    #[test]
    fn test_arange_fractional_step() {
        let ticks = arange(0.0, 1.0, 0.2);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0], 0.0);
        assert!(ticks.iter().all(|&t| t < 1.0));
    }

    #[test]
    fn test_format_table_chart_configures_axis() {
        let config = ChartConfig {
            x_tick: 1.0,
            y_tick: 1.0,
            ..ChartConfig::default()
        };
        let axis =
            format_table_chart(&single_column_table(), "Day", "Cases", "Growth", &config).unwrap();

        assert_eq!(axis.title(), "Growth");
        assert_eq!(axis.x_label(), "Day");
        assert_eq!(axis.y_label(), "Cases");
        assert_eq!(axis.x_label_font_size(), 18.0);
        assert_eq!(axis.y_label_font_size(), 16.0);
        assert_eq!(axis.size(), (16.0, 9.0));
        assert_eq!(axis.x_ticks(), &[0.0, 1.0, 2.0]);
        assert_eq!(axis.y_ticks(), &[1.0, 2.0, 3.0]);
        assert_eq!(axis.series().len(), 1);
        assert_eq!(axis.series()[0].name, "A");
        assert_eq!(axis.series()[0].points[3], (3.0, 4.0));
        assert!(axis.annotations().is_empty());
    }

    #[test]
    fn test_single_row_table_has_empty_ticks() {
        let table = DataTable::new(vec![5.0], vec![("A".to_string(), vec![2.0])]).unwrap();
        let axis =
            format_table_chart(&table, "x", "y", "t", &ChartConfig::default()).unwrap();
        assert!(axis.x_ticks().is_empty());
        assert!(axis.y_ticks().is_empty());
    }

    #[test]
    fn test_empty_table_is_invalid_input() {
        let table = DataTable::new(Vec::new(), Vec::new()).unwrap();
        let err =
            format_table_chart(&table, "x", "y", "t", &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_zero_row_table_is_invalid_input() {
        let table = DataTable::new(Vec::new(), vec![("A".to_string(), Vec::new())]).unwrap();
        let err =
            format_table_chart(&table, "x", "y", "t", &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_non_positive_ticks_are_invalid_input() {
        for (x_tick, y_tick) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (1.0, -0.5)] {
            let config = ChartConfig {
                x_tick,
                y_tick,
                ..ChartConfig::default()
            };
            let err = format_table_chart(&single_column_table(), "x", "y", "t", &config)
                .unwrap_err();
            assert!(matches!(err, ChartError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.x_tick, 1.0);
        assert_eq!(config.y_tick, 0.2);
        assert_eq!(config.fig_length, 16.0);
        assert_eq!(config.fig_breadth, 9.0);
        assert_eq!(config.x_label_font_size, 18.0);
        assert_eq!(config.y_label_font_size, 16.0);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ChartConfig = serde_json::from_str(r#"{"x_tick": 2.0}"#).unwrap();
        assert_eq!(config.x_tick, 2.0);
        assert_eq!(config.y_tick, 0.2);
        assert_eq!(config.fig_length, 16.0);
    }
}
