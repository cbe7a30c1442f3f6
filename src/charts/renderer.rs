//! Static Chart Renderer
//! Rasterizes an [`Axis`] scene with Plotters.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Legend: horizontal colored strokes + series names under the title
//! 3. Framed plot area with grid lines at the axis's tick positions
//! 4. Series polylines, then annotations drawn last on top of the data

use crate::charts::ChartError;
use crate::figure::{Annotation, Axis, VerticalAnchor};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;

/// Pixels per figure unit.
const DPI: f64 = 100.0;

// Plot-area margins, in pixels.
const MARGIN_LEFT: i32 = 80;
const MARGIN_RIGHT: i32 = 30;
const MARGIN_TOP: i32 = 70;
const MARGIN_BOTTOM: i32 = 70;

const TICK_LEN: i32 = 5;
const TICK_FONT: f64 = 12.0;
const TITLE_FONT: f64 = 20.0;
const LEGEND_FONT: f64 = 12.0;

const GRID: RGBColor = RGBColor(200, 200, 200);

/// Color palette for series lines.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(255, 87, 34),   // Deep Orange
    RGBColor(96, 125, 139),  // Blue Grey
];

/// Renders retained axis scenes to static images.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Pixel dimensions of `axis` at 100 px per figure unit.
    pub fn pixel_size(axis: &Axis) -> (u32, u32) {
        let (fw, fh) = axis.size();
        (
            (fw * DPI).round().max(1.0) as u32,
            (fh * DPI).round().max(1.0) as u32,
        )
    }

    /// Render `axis` as a PNG file at `path`.
    pub fn render_png(axis: &Axis, path: &Path) -> Result<(), ChartError> {
        let (w, h) = Self::pixel_size(axis);
        let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
        Self::draw(axis, &root)?;
        root.present().map_err(render_err)
    }

    /// Render `axis` into an RGB pixel buffer (row-major, 3 bytes per pixel).
    ///
    /// The buffer must hold at least `w * h * 3` bytes for the size reported
    /// by [`ChartRenderer::pixel_size`]; returns the rendered dimensions.
    pub fn render_to_buffer(axis: &Axis, buffer: &mut [u8]) -> Result<(u32, u32), ChartError> {
        let (w, h) = Self::pixel_size(axis);
        let root = BitMapBackend::with_buffer(buffer, (w, h)).into_drawing_area();
        Self::draw(axis, &root)?;
        root.present().map_err(render_err)?;
        Ok((w, h))
    }

    fn draw<DB: DrawingBackend>(axis: &Axis, root: &DrawingArea<DB, Shift>) -> Result<(), ChartError> {
        root.fill(&WHITE).map_err(render_err)?;

        let (w, h) = root.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);
        let plot_x0 = MARGIN_LEFT;
        let plot_x1 = (w - MARGIN_RIGHT).max(plot_x0 + 1);
        let plot_y0 = MARGIN_TOP;
        let plot_y1 = (h - MARGIN_BOTTOM).max(plot_y0 + 1);

        let ((x_min, x_max), (y_min, y_max)) = Self::ranges(axis);

        if !axis.title().is_empty() {
            let style = ("sans-serif", TITLE_FONT)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            root.draw(&Text::new(axis.title().to_string(), (w / 2, 10), style))
                .map_err(render_err)?;
        }

        Self::draw_legend(axis, root, w)?;

        // Axes frame
        root.draw(&PathElement::new(
            vec![(plot_x0, plot_y1), (plot_x1, plot_y1)],
            ShapeStyle::from(&BLACK),
        ))
        .map_err(render_err)?;
        root.draw(&PathElement::new(
            vec![(plot_x0, plot_y0), (plot_x0, plot_y1)],
            ShapeStyle::from(&BLACK),
        ))
        .map_err(render_err)?;

        // X ticks, grid, and labels
        let tick_style = ("sans-serif", TICK_FONT)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for &t in axis.x_ticks() {
            if !t.is_finite() || t < x_min || t > x_max {
                continue;
            }
            let px = Self::map_x(t, x_min, x_max, plot_x0, plot_x1);
            root.draw(&PathElement::new(
                vec![(px, plot_y0), (px, plot_y1)],
                ShapeStyle::from(&GRID),
            ))
            .map_err(render_err)?;
            root.draw(&PathElement::new(
                vec![(px, plot_y1), (px, plot_y1 + TICK_LEN)],
                ShapeStyle::from(&BLACK),
            ))
            .map_err(render_err)?;
            root.draw(&Text::new(
                format_tick(t),
                (px, plot_y1 + TICK_LEN + 3),
                tick_style.clone(),
            ))
            .map_err(render_err)?;
        }

        // Y ticks, grid, and labels
        let tick_style = ("sans-serif", TICK_FONT)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for &t in axis.y_ticks() {
            if !t.is_finite() || t < y_min || t > y_max {
                continue;
            }
            let py = Self::map_y(t, y_min, y_max, plot_y0, plot_y1);
            root.draw(&PathElement::new(
                vec![(plot_x0, py), (plot_x1, py)],
                ShapeStyle::from(&GRID),
            ))
            .map_err(render_err)?;
            root.draw(&PathElement::new(
                vec![(plot_x0 - TICK_LEN, py), (plot_x0, py)],
                ShapeStyle::from(&BLACK),
            ))
            .map_err(render_err)?;
            root.draw(&Text::new(
                format_tick(t),
                (plot_x0 - TICK_LEN - 4, py),
                tick_style.clone(),
            ))
            .map_err(render_err)?;
        }

        if !axis.x_label().is_empty() {
            let style = ("sans-serif", axis.x_label_font_size() as f64)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            root.draw(&Text::new(
                axis.x_label().to_string(),
                ((plot_x0 + plot_x1) / 2, plot_y1 + TICK_LEN + 22),
                style,
            ))
            .map_err(render_err)?;
        }

        if !axis.y_label().is_empty() {
            // Rotated 90 degrees like the usual y-axis label
            let size = axis.y_label_font_size() as f64;
            let style = ("sans-serif", size)
                .into_font()
                .transform(FontTransform::Rotate270)
                .color(&BLACK);
            let y = (plot_y0 + plot_y1) / 2 + (axis.y_label().len() as f64 * size / 4.0) as i32;
            root.draw(&Text::new(axis.y_label().to_string(), (14, y), style))
                .map_err(render_err)?;
        }

        // Series polylines; NaN points break the line into runs
        for (i, series) in axis.series().iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let style = ShapeStyle::from(&color).stroke_width(2);
            let mut run: Vec<(i32, i32)> = Vec::new();
            for &(x, y) in &series.points {
                if x.is_finite() && y.is_finite() {
                    run.push((
                        Self::map_x(x, x_min, x_max, plot_x0, plot_x1),
                        Self::map_y(y, y_min, y_max, plot_y0, plot_y1),
                    ));
                } else {
                    Self::draw_run(root, &run, style)?;
                    run.clear();
                }
            }
            Self::draw_run(root, &run, style)?;
        }

        for annotation in axis.annotations() {
            Self::draw_annotation(root, annotation, plot_x0, plot_y0, plot_x1, plot_y1)?;
        }

        Ok(())
    }

    fn draw_legend<DB: DrawingBackend>(
        axis: &Axis,
        root: &DrawingArea<DB, Shift>,
        width: i32,
    ) -> Result<(), ChartError> {
        let named: Vec<(usize, &str)> = axis
            .series()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.name.is_empty())
            .map(|(i, s)| (i, s.name.as_str()))
            .collect();
        if named.is_empty() {
            return Ok(());
        }

        let entry_width = |name: &str| 22 + name.chars().count() as i32 * 7 + 16;
        let total: i32 = named.iter().map(|(_, name)| entry_width(name)).sum();
        let mut x = (width - total) / 2;
        let y = 36;

        let style = ("sans-serif", LEGEND_FONT)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (i, name) in named {
            let color = PALETTE[i % PALETTE.len()];
            root.draw(&PathElement::new(
                vec![(x, y), (x + 18, y)],
                ShapeStyle::from(&color).stroke_width(2),
            ))
            .map_err(render_err)?;
            root.draw(&Text::new(name.to_string(), (x + 22, y), style.clone()))
                .map_err(render_err)?;
            x += entry_width(name);
        }
        Ok(())
    }

    fn draw_run<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        run: &[(i32, i32)],
        style: ShapeStyle,
    ) -> Result<(), ChartError> {
        match run.len() {
            0 => Ok(()),
            1 => root
                .draw(&Circle::new(run[0], 2, ShapeStyle { filled: true, ..style }))
                .map_err(render_err),
            _ => root
                .draw(&PathElement::new(run.to_vec(), style))
                .map_err(render_err),
        }
    }

    fn draw_annotation<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        note: &Annotation,
        plot_x0: i32,
        plot_y0: i32,
        plot_x1: i32,
        plot_y1: i32,
    ) -> Result<(), ChartError> {
        let lines: Vec<&str> = note.text.lines().collect();
        if lines.is_empty() {
            return Ok(());
        }

        let (fx, fy) = note.position;
        let px = plot_x0 + ((plot_x1 - plot_x0) as f64 * fx).round() as i32;
        let py = plot_y1 - ((plot_y1 - plot_y0) as f64 * fy).round() as i32;

        let font_px = note.font_size.round() as i32;
        let line_h = font_px + 4;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let text_w = longest * font_px * 3 / 5;
        let text_h = line_h * lines.len() as i32;
        let pad = 6;

        let top = match note.vertical_anchor {
            VerticalAnchor::Top => py,
            VerticalAnchor::Center => py - text_h / 2,
            VerticalAnchor::Bottom => py - text_h,
        };

        if let Some(box_style) = &note.box_style {
            let (x0, y0) = (px - pad, top - pad);
            let (x1, y1) = (px + text_w + pad, top + text_h + pad);
            let fill = box_style.fill.mix(box_style.alpha).filled();
            if box_style.rounded {
                let outline = chamfered_box(x0, y0, x1, y1, 5);
                root.draw(&Polygon::new(outline.clone(), fill))
                    .map_err(render_err)?;
                let mut border = outline;
                border.push(border[0]);
                root.draw(&PathElement::new(border, ShapeStyle::from(&box_style.fill)))
                    .map_err(render_err)?;
            } else {
                root.draw(&Rectangle::new([(x0, y0), (x1, y1)], fill))
                    .map_err(render_err)?;
            }
        }

        let style = ("sans-serif", note.font_size as f64)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Top));
        for (i, line) in lines.iter().enumerate() {
            root.draw(&Text::new(
                line.to_string(),
                (px, top + i as i32 * line_h),
                style.clone(),
            ))
            .map_err(render_err)?;
        }
        Ok(())
    }

    /// Drawing ranges: data bounds extended to cover the tick positions, then
    /// padded; degenerate or missing ranges are widened to keep mapping sane.
    fn ranges(axis: &Axis) -> ((f64, f64), (f64, f64)) {
        let ((mut x_min, mut x_max), (mut y_min, mut y_max)) =
            axis.data_bounds().unwrap_or(((0.0, 1.0), (0.0, 1.0)));
        for &t in axis.x_ticks() {
            if t.is_finite() {
                x_min = x_min.min(t);
                x_max = x_max.max(t);
            }
        }
        for &t in axis.y_ticks() {
            if t.is_finite() {
                y_min = y_min.min(t);
                y_max = y_max.max(t);
            }
        }
        (widen(x_min, x_max), widen(y_min, y_max))
    }

    fn map_x(v: f64, x_min: f64, x_max: f64, plot_x0: i32, plot_x1: i32) -> i32 {
        let ratio = (v - x_min) / (x_max - x_min);
        plot_x0 + (ratio * (plot_x1 - plot_x0) as f64).round() as i32
    }

    fn map_y(v: f64, y_min: f64, y_max: f64, plot_y0: i32, plot_y1: i32) -> i32 {
        let ratio = (v - y_min) / (y_max - y_min);
        plot_y1 - (ratio * (plot_y1 - plot_y0) as f64).round() as i32
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 0.5, max + 0.5)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

/// Eight-point outline approximating a rounded rectangle with cut corners.
fn chamfered_box(x0: i32, y0: i32, x1: i32, y1: i32, c: i32) -> Vec<(i32, i32)> {
    vec![
        (x0 + c, y0),
        (x1 - c, y0),
        (x1, y0 + c),
        (x1, y1 - c),
        (x1 - c, y1),
        (x0 + c, y1),
        (x0, y1 - c),
        (x0, y0 + c),
    ]
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn format_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let formatted = format!("{v:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;

    #[test]
    fn test_pixel_size() {
        let axis = Figure::new(4.0, 3.0).into_single_axis();
        assert_eq!(ChartRenderer::pixel_size(&axis), (400, 300));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(0.6000000000000001), "0.6");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(-1.25), "-1.25");
    }

    #[test]
    fn test_ranges_cover_ticks_and_widen() {
        let mut axis = Figure::new(4.0, 3.0).into_single_axis();
        axis.plot_line("", vec![(0.0, 5.0), (2.0, 5.0)]);
        axis.set_x_ticks(vec![0.0, 1.0, 2.0, 3.0]);
        let ((x_min, x_max), (y_min, y_max)) = ChartRenderer::ranges(&axis);
        assert!(x_min <= 0.0 && x_max >= 3.0);
        // Flat series still gets a non-degenerate y range
        assert!(y_min < 5.0 && y_max > 5.0);
    }

    #[test]
    fn test_map_y_is_inverted() {
        assert_eq!(ChartRenderer::map_y(0.0, 0.0, 1.0, 100, 300), 300);
        assert_eq!(ChartRenderer::map_y(1.0, 0.0, 1.0, 100, 300), 100);
    }

    #[test]
    fn test_chamfered_box_has_eight_corners() {
        let outline = chamfered_box(0, 0, 20, 10, 3);
        assert_eq!(outline.len(), 8);
        assert_eq!(outline[0], (3, 0));
        assert_eq!(outline[7], (0, 3));
    }

    // Text-free scene, so the test does not depend on system fonts.
    #[test]
    fn test_render_to_buffer_draws_frame_and_series() {
        let mut axis = Figure::new(4.0, 3.0).into_single_axis();
        axis.plot_line("", vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0), (3.0, 2.0)]);

        let mut buffer = vec![0u8; 400 * 300 * 3];
        let (w, h) = ChartRenderer::render_to_buffer(&axis, &mut buffer).unwrap();
        assert_eq!((w, h), (400, 300));

        // Top-left corner is in the margin: background white
        assert_eq!(&buffer[0..3], &[255, 255, 255]);
        // The frame is drawn in black somewhere
        assert!(buffer.iter().any(|&b| b == 0));
    }
}
