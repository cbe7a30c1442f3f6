//! Figure and Axis Scene Model
//! Retained drawing targets that accumulate series, ticks, labels, and
//! annotations until a renderer rasterizes them.

use plotters::style::RGBColor;

/// Maps axes-fraction coordinates onto a figure surface.
///
/// Fractions run 0..=1 on both axes with (0, 0) at the bottom-left corner of
/// the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesTransform {
    width: f64,
    height: f64,
}

impl AxesTransform {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Surface position of a fraction pair, in figure units from bottom-left.
    pub fn to_surface(&self, fx: f64, fy: f64) -> (f64, f64) {
        (fx * self.width, fy * self.height)
    }
}

/// Vertical anchoring of a text block relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

/// Background box drawn behind an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub rounded: bool,
    pub fill: RGBColor,
    pub alpha: f64,
}

impl BoxStyle {
    pub fn rounded(fill: RGBColor, alpha: f64) -> Self {
        Self {
            rounded: true,
            fill,
            alpha,
        }
    }
}

/// A text block positioned in axes-fraction coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub position: (f64, f64),
    pub font_size: f32,
    pub vertical_anchor: VerticalAnchor,
    pub box_style: Option<BoxStyle>,
}

/// A named polyline plotted in axis data coordinates.
///
/// Points with a NaN coordinate render as gaps in the line.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// A drawing target that can place axes-fraction annotations.
pub trait PlotSurface {
    /// The established axes-fraction transform, if any.
    fn axes_transform(&self) -> Option<AxesTransform>;

    /// Append one annotation to the surface.
    fn push_annotation(&mut self, annotation: Annotation);
}

/// A figure surface, sized in abstract figure units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    width: f64,
    height: f64,
}

impl Figure {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The single axis spanning this figure, with an established transform.
    pub fn into_single_axis(self) -> Axis {
        let mut axis = Axis::detached();
        axis.attach(&self);
        axis
    }
}

/// A retained plot axis.
///
/// Accumulates series, explicit tick positions, labels, a title, and
/// annotations. Setters replace only the element they name.
#[derive(Debug, Clone)]
pub struct Axis {
    size: (f64, f64),
    transform: Option<AxesTransform>,
    title: String,
    x_label: String,
    y_label: String,
    x_label_font_size: f32,
    y_label_font_size: f32,
    x_ticks: Vec<f64>,
    y_ticks: Vec<f64>,
    series: Vec<SeriesLine>,
    annotations: Vec<Annotation>,
}

impl Axis {
    /// An axis without a figure attachment.
    ///
    /// It accumulates elements normally, but axes-fraction placement is
    /// unavailable until [`Axis::attach`] establishes a transform.
    pub fn detached() -> Self {
        Self {
            size: (0.0, 0.0),
            transform: None,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            x_label_font_size: 12.0,
            y_label_font_size: 12.0,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            series: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Attach this axis to a figure, establishing its axes-fraction transform.
    pub fn attach(&mut self, figure: &Figure) {
        self.size = (figure.width(), figure.height());
        self.transform = Some(AxesTransform::new(figure.width(), figure.height()));
    }

    /// Figure size backing this axis, in figure units.
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_labels(&mut self, x_label: &str, y_label: &str) {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn set_x_label_font_size(&mut self, size: f32) {
        self.x_label_font_size = size;
    }

    pub fn x_label_font_size(&self) -> f32 {
        self.x_label_font_size
    }

    pub fn set_y_label_font_size(&mut self, size: f32) {
        self.y_label_font_size = size;
    }

    pub fn y_label_font_size(&self) -> f32 {
        self.y_label_font_size
    }

    pub fn set_x_ticks(&mut self, ticks: Vec<f64>) {
        self.x_ticks = ticks;
    }

    pub fn x_ticks(&self) -> &[f64] {
        &self.x_ticks
    }

    pub fn set_y_ticks(&mut self, ticks: Vec<f64>) {
        self.y_ticks = ticks;
    }

    pub fn y_ticks(&self) -> &[f64] {
        &self.y_ticks
    }

    /// Append one named polyline.
    pub fn plot_line(&mut self, name: &str, points: Vec<(f64, f64)>) {
        self.series.push(SeriesLine {
            name: name.to_string(),
            points,
        });
    }

    pub fn series(&self) -> &[SeriesLine] {
        &self.series
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Bounding box over all plotted points with finite coordinates,
    /// as ((x_min, x_max), (y_min, y_max)).
    pub fn data_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut bounds: Option<((f64, f64), (f64, f64))> = None;
        for series in &self.series {
            for &(x, y) in &series.points {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                bounds = Some(match bounds {
                    Some(((x0, x1), (y0, y1))) => ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y))),
                    None => ((x, x), (y, y)),
                });
            }
        }
        bounds
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::detached()
    }
}

impl PlotSurface for Axis {
    fn axes_transform(&self) -> Option<AxesTransform> {
        self.transform
    }

    fn push_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_transform_maps_fractions() {
        let transform = AxesTransform::new(16.0, 9.0);
        assert_eq!(transform.to_surface(0.0, 0.0), (0.0, 0.0));
        assert_eq!(transform.to_surface(1.0, 1.0), (16.0, 9.0));
        assert_eq!(transform.to_surface(0.5, 0.5), (8.0, 4.5));
    }

    #[test]
    fn test_detached_axis_has_no_transform() {
        let axis = Axis::detached();
        assert!(axis.axes_transform().is_none());
    }

    #[test]
    fn test_attach_establishes_transform() {
        let mut axis = Axis::detached();
        axis.attach(&Figure::new(4.0, 3.0));
        assert_eq!(axis.size(), (4.0, 3.0));
        assert!(axis.axes_transform().is_some());
    }

    #[test]
    fn test_single_axis_figure() {
        let axis = Figure::new(16.0, 9.0).into_single_axis();
        assert_eq!(axis.size(), (16.0, 9.0));
        assert!(axis.axes_transform().is_some());
        assert!(axis.series().is_empty());
        assert!(axis.annotations().is_empty());
    }

    #[test]
    fn test_push_annotation_appends() {
        let mut axis = Figure::new(4.0, 3.0).into_single_axis();
        let note = Annotation {
            text: "hello".to_string(),
            position: (0.5, 0.5),
            font_size: 12.0,
            vertical_anchor: VerticalAnchor::Top,
            box_style: None,
        };
        axis.push_annotation(note.clone());
        axis.push_annotation(note);
        assert_eq!(axis.annotations().len(), 2);
    }

    #[test]
    fn test_data_bounds_skip_nan() {
        let mut axis = Axis::detached();
        axis.plot_line("a", vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, 5.0)]);
        axis.plot_line("b", vec![(-1.0, 3.0)]);
        assert_eq!(axis.data_bounds(), Some(((-1.0, 2.0), (1.0, 5.0))));
    }

    #[test]
    fn test_data_bounds_empty() {
        assert!(Axis::detached().data_bounds().is_none());
    }
}
