//! Annotated heatmap drawing.
//!
//! The matrix is laid out in pixel space: row 0 at the top, column 0 on the
//! left, tick labels below and to the left of the cells, an optional colour
//! bar on the right.

use std::fmt::Display;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::colormap::RgbColor;
use crate::config::HeatmapConfig;
use crate::error::{PlotError, Result};
use crate::figure::Figure;

const FONT: &str = "sans-serif";
const PADDING: i32 = 8;
const COLORBAR_WIDTH: i32 = 20;
const COLORBAR_GAP: i32 = 24;
const COLORBAR_TICKS: usize = 5;
/// Average glyph width relative to font size, used to reserve label space.
const GLYPH_WIDTH: f64 = 0.6;
const DARK_TEXT: RGBColor = RGBColor(38, 38, 38);

/// A validated square table ready to be drawn.
#[derive(Debug)]
pub(crate) struct HeatmapSpec<'a> {
    labels: Vec<String>,
    rows: &'a [Vec<usize>],
}

impl<'a> HeatmapSpec<'a> {
    fn new<T: Display>(labels: &[T], rows: &'a [Vec<usize>]) -> Result<Self> {
        let k = labels.len();
        if k == 0 {
            return Err(PlotError::Render("cannot draw an empty matrix".to_string()));
        }
        if rows.len() != k || rows.iter().any(|row| row.len() != k) {
            return Err(PlotError::Render(format!(
                "matrix must be {k}x{k} to match its {k} labels"
            )));
        }
        Ok(Self {
            labels: labels.iter().map(ToString::to_string).collect(),
            rows,
        })
    }

    fn n(&self) -> usize {
        self.labels.len()
    }

    fn value_range(&self) -> (usize, usize) {
        let mut cells = self.rows.iter().flatten().copied();
        let first = cells.next().unwrap_or(0);
        cells.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}

/// Pixel geometry of a heatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    left: i32,
    top: i32,
    cell_width: f64,
    cell_height: f64,
    n: usize,
    colorbar: Option<(i32, i32)>,
}

impl Layout {
    fn compute(config: &HeatmapConfig, spec: &HeatmapSpec<'_>) -> Result<Self> {
        let tick = f64::from(config.tick_font_size);
        let axis = config.axis_font_size as i32;
        let longest = spec.labels.iter().map(|l| l.chars().count()).max();
        let widest_count = spec.value_range().1.to_string().len();

        let title = config.title.as_ref().map_or(0, |_| axis * 2);
        let top = PADDING * 2 + title;
        let bottom = PADDING * 3 + config.tick_font_size as i32 + axis;
        let left = PADDING * 3 + axis + text_width(longest.unwrap_or(1), tick);
        let mut right = PADDING * 2;
        if config.colorbar {
            right += COLORBAR_GAP + COLORBAR_WIDTH + PADDING + text_width(widest_count, tick);
        }

        // Crowded matrices get cells narrower than a pixel; only a plot area
        // of zero size is an error.
        let width = config.width as i32 - left - right;
        let height = config.height as i32 - top - bottom;
        if width <= 0 || height <= 0 {
            return Err(PlotError::render(format!(
                "figure of {}x{} leaves no room for the matrix",
                config.width, config.height
            )));
        }

        let bar_left = left + width + COLORBAR_GAP;
        let bar = (bar_left, bar_left + COLORBAR_WIDTH);
        let colorbar = config.colorbar.then_some(bar);

        let n = spec.n();
        Ok(Self {
            left,
            top,
            cell_width: f64::from(width) / n as f64,
            cell_height: f64::from(height) / n as f64,
            n,
            colorbar,
        })
    }

    fn x(&self, col: f64) -> i32 {
        self.left + (col * self.cell_width).round() as i32
    }

    fn y(&self, row: f64) -> i32 {
        self.top + (row * self.cell_height).round() as i32
    }

    fn right(&self) -> i32 {
        self.x(self.n as f64)
    }

    fn bottom(&self) -> i32 {
        self.y(self.n as f64)
    }

    /// Corners of cell `(row, col)`. Adjacent cells share edges.
    fn cell(&self, row: usize, col: usize) -> [(i32, i32); 2] {
        [
            (self.x(col as f64), self.y(row as f64)),
            (self.x(col as f64 + 1.0), self.y(row as f64 + 1.0)),
        ]
    }

    fn cell_center(&self, row: usize, col: usize) -> (i32, i32) {
        (self.x(col as f64 + 0.5), self.y(row as f64 + 0.5))
    }
}

/// Pixels reserved for `chars` glyphs at font size `size`.
fn text_width(chars: usize, size: f64) -> i32 {
    (chars as f64 * size * GLYPH_WIDTH).ceil() as i32
}

/// Evenly spaced integer ticks between `lo` and `hi`, without duplicates.
fn colorbar_ticks(lo: usize, hi: usize) -> Vec<usize> {
    let mut ticks: Vec<usize> = (0..COLORBAR_TICKS)
        .map(|i| {
            let t = i as f64 / (COLORBAR_TICKS - 1) as f64;
            (lo as f64 + t * (hi - lo) as f64).round() as usize
        })
        .collect();
    ticks.dedup();
    ticks
}

fn text_color(background: RgbColor) -> RGBColor {
    if background.luminance() < 128.0 {
        WHITE
    } else {
        DARK_TEXT
    }
}

/// Render a square count table onto `figure` as an annotated heatmap.
///
/// `labels` name both the rows (true classes) and the columns (predicted
/// classes); `rows[r][c]` is the count drawn in row `r`, column `c`.
///
/// The plot area is fixed by the figure size, so a domain with more classes
/// than the area has pixels gets sub-pixel cells and overlapping labels
/// rather than an error.
pub fn render_heatmap<T: Display>(
    figure: &mut Figure,
    labels: &[T],
    rows: &[Vec<usize>],
) -> Result<()> {
    let spec = HeatmapSpec::new(labels, rows)?;
    figure.draw_heatmap(&spec)?;
    tracing::debug!("Rendered {}x{} heatmap", spec.n(), spec.n());
    Ok(())
}

pub(crate) fn draw_on<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &HeatmapConfig,
    spec: &HeatmapSpec<'_>,
) -> Result<()> {
    let layout = Layout::compute(config, spec)?;
    let (lo, hi) = spec.value_range();
    let (lo_f, hi_f) = (lo as f64, hi as f64);

    root.fill(&WHITE).map_err(PlotError::render)?;

    // Cells
    for (r, row) in spec.rows.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let fill = config.colormap.color_for(value as f64, lo_f, hi_f);
            let cell = Rectangle::new(layout.cell(r, c), RGBColor::from(fill).filled());
            root.draw(&cell).map_err(PlotError::render)?;

            if config.annotate {
                let style = (FONT, f64::from(config.annotation_font_size))
                    .into_font()
                    .color(&text_color(fill))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                root.draw_text(&value.to_string(), &style, layout.cell_center(r, c))
                    .map_err(PlotError::render)?;
            }
        }
    }

    // Tick labels
    let tick_font = (FONT, f64::from(config.tick_font_size)).into_font();
    let x_tick = tick_font
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let y_tick = tick_font
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (i, label) in spec.labels.iter().enumerate() {
        let (cx, cy) = layout.cell_center(i, i);
        root.draw_text(label, &x_tick, (cx, layout.bottom() + PADDING))
            .map_err(PlotError::render)?;
        root.draw_text(label, &y_tick, (layout.left - PADDING, cy))
            .map_err(PlotError::render)?;
    }

    // Axis descriptions
    let axis_font = (FONT, f64::from(config.axis_font_size)).into_font();
    let mid_x = (layout.left + layout.right()) / 2;
    let mid_y = (layout.top + layout.bottom()) / 2;
    root.draw_text(
        &config.x_label,
        &axis_font
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
        (mid_x, config.height as i32 - PADDING),
    )
    .map_err(PlotError::render)?;
    root.draw_text(
        &config.y_label,
        &axis_font
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
        (PADDING, mid_y),
    )
    .map_err(PlotError::render)?;

    if let Some(title) = &config.title {
        let caption = (FONT, f64::from(config.axis_font_size) * 1.25)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw_text(title, &caption, (mid_x, PADDING))
            .map_err(PlotError::render)?;
    }

    if let Some((x0, x1)) = layout.colorbar {
        draw_colorbar(root, config, &layout, (x0, x1), (lo, hi))?;
    }

    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &HeatmapConfig,
    layout: &Layout,
    (x0, x1): (i32, i32),
    (lo, hi): (usize, usize),
) -> Result<()> {
    let (top, bottom) = (layout.top, layout.bottom());
    let span = (bottom - top).max(1);

    // One strip per pixel row, darkest (largest count) at the top.
    for y in top..bottom {
        let t = f64::from(bottom - 1 - y) / f64::from((span - 1).max(1));
        let color = config.colormap.color_at(t);
        let strip = Rectangle::new([(x0, y), (x1, y + 1)], RGBColor::from(color).filled());
        root.draw(&strip).map_err(PlotError::render)?;
    }
    let frame = Rectangle::new([(x0, top), (x1, bottom)], BLACK.stroke_width(1));
    root.draw(&frame).map_err(PlotError::render)?;

    let style = (FONT, f64::from(config.tick_font_size))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for tick in colorbar_ticks(lo, hi) {
        let t = crate::Colormap::normalize(tick as f64, lo as f64, hi as f64);
        let y = bottom - (t * f64::from(span)).round() as i32;
        root.draw(&PathElement::new(vec![(x1, y), (x1 + 4, y)], BLACK))
            .map_err(PlotError::render)?;
        root.draw_text(&tick.to_string(), &style, (x1 + PADDING, y))
            .map_err(PlotError::render)?;
    }

    Ok(())
}
