//! Figure module - retained figure/axis scene model

mod axis;

pub use axis::{
    Annotation, AxesTransform, Axis, BoxStyle, Figure, PlotSurface, SeriesLine, VerticalAnchor,
};
