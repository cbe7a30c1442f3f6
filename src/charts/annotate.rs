//! Summary Annotation Module
//! Stamps a five-line descriptive summary box near the top-right of a plot.

use crate::charts::ChartError;
use crate::data::is_numeric_dtype;
use crate::figure::{Annotation, BoxStyle, PlotSurface, VerticalAnchor};
use crate::stats::StatsCalculator;
use plotters::style::RGBColor;
use polars::prelude::*;

/// Axes-fraction position of the summary box (top-right).
pub const SUMMARY_POSITION: (f64, f64) = (0.85, 0.95);

/// Font size of the summary text.
pub const SUMMARY_FONT_SIZE: f32 = 14.0;

/// Background fill behind the summary text (wheat).
pub const SUMMARY_FILL: RGBColor = RGBColor(245, 222, 179);

/// Background alpha behind the summary text.
pub const SUMMARY_ALPHA: f64 = 0.5;

/// Add a summary text box to a plot surface.
///
/// Computes mean, median, sample standard deviation, max, and min of `series`
/// and renders them as one rounded, semi-transparent box anchored at
/// axes-fraction (0.85, 0.95). The surface gains exactly one annotation;
/// nothing else on it is touched.
pub fn annotate_summary<S: PlotSurface>(series: &Series, surface: &mut S) -> Result<(), ChartError> {
    if surface.axes_transform().is_none() {
        return Err(ChartError::InvalidSurface(
            "surface has no axes-fraction transform".to_string(),
        ));
    }

    let values = numeric_values(series)?;
    let stats = StatsCalculator::compute_descriptive_stats(&values);
    let text = format!(
        "μ={:.2}\nmedian={:.2}\nσ={:.2}\nmax={:.2}\nmin={:.2}",
        stats.mean, stats.median, stats.std, stats.max, stats.min
    );

    surface.push_annotation(Annotation {
        text,
        position: SUMMARY_POSITION,
        font_size: SUMMARY_FONT_SIZE,
        vertical_anchor: VerticalAnchor::Top,
        box_style: Some(BoxStyle::rounded(SUMMARY_FILL, SUMMARY_ALPHA)),
    });

    Ok(())
}

/// Extract the usable values of a numeric series, dropping nulls and NaN.
fn numeric_values(series: &Series) -> Result<Vec<f64>, ChartError> {
    if !is_numeric_dtype(series.dtype()) {
        return Err(ChartError::InvalidInput(format!(
            "series '{}' is not numeric",
            series.name()
        )));
    }

    let values_f64 = series.cast(&DataType::Float64)?;
    let values_ca = values_f64.f64()?;
    let values: Vec<f64> = values_ca
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();

    if values.is_empty() {
        return Err(ChartError::InvalidInput(format!(
            "series '{}' has no numeric values",
            series.name()
        )));
    }

    Ok(values)
}
