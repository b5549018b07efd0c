//! Figures: owned drawing canvases and their presentation.

use std::io::Write;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::config::HeatmapConfig;
use crate::error::{PlotError, Result};
use crate::heatmap::{self, HeatmapSpec};

/// Encoding of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureFormat {
    /// SVG document.
    Svg,
    /// PNG image (requires the `bitmap` feature).
    Png,
}

impl FigureFormat {
    /// Pick a format from a file extension, defaulting to SVG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::Svg,
        }
    }
}

/// Where a finished figure is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentTarget {
    /// Write the encoded figure to a file.
    File(PathBuf),
    /// Write the encoded figure to standard output.
    Stdout,
    /// Hand the encoded bytes back to the caller.
    Memory,
}

/// What [`Figure::present`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presented {
    /// The figure was written to this file.
    File(PathBuf),
    /// This many bytes were written to standard output.
    Stdout(usize),
    /// The encoded figure.
    Memory(Vec<u8>),
}

enum Canvas {
    Svg(String),
    #[cfg(feature = "bitmap")]
    Bitmap(Vec<u8>),
}

/// A drawing canvas with its own pixel or document buffer.
///
/// Each figure is independent: nothing is shared between figures, and the
/// buffer is released when the figure is presented or dropped.
pub struct Figure {
    config: HeatmapConfig,
    canvas: Canvas,
    drawn: bool,
}

impl Figure {
    /// Create an SVG figure.
    pub fn svg(config: HeatmapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            canvas: Canvas::Svg(String::new()),
            drawn: false,
        })
    }

    /// Create a bitmap figure encoded as PNG on presentation.
    #[cfg(feature = "bitmap")]
    pub fn bitmap(config: HeatmapConfig) -> Result<Self> {
        config.validate()?;
        let len = config.width as usize * config.height as usize * 3;
        Ok(Self {
            config,
            canvas: Canvas::Bitmap(vec![0; len]),
            drawn: false,
        })
    }

    /// Create a bitmap figure encoded as PNG on presentation.
    #[cfg(not(feature = "bitmap"))]
    pub fn bitmap(_config: HeatmapConfig) -> Result<Self> {
        Err(PlotError::render("bitmap feature is not enabled"))
    }

    /// Create a figure in the given format.
    pub fn new(format: FigureFormat, config: HeatmapConfig) -> Result<Self> {
        match format {
            FigureFormat::Svg => Self::svg(config),
            FigureFormat::Png => Self::bitmap(config),
        }
    }

    /// Rendering configuration.
    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Encoding of this figure.
    pub fn format(&self) -> FigureFormat {
        match self.canvas {
            Canvas::Svg(_) => FigureFormat::Svg,
            #[cfg(feature = "bitmap")]
            Canvas::Bitmap(_) => FigureFormat::Png,
        }
    }

    /// Whether anything has been drawn yet.
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Draw a heatmap onto the whole canvas, replacing previous content.
    pub(crate) fn draw_heatmap(&mut self, spec: &HeatmapSpec<'_>) -> Result<()> {
        let size = (self.config.width, self.config.height);
        self.drawn = false;
        match &mut self.canvas {
            Canvas::Svg(buf) => {
                buf.clear();
                let root = SVGBackend::with_string(buf, size).into_drawing_area();
                heatmap::draw_on(&root, &self.config, spec)?;
                root.present().map_err(PlotError::render)?;
            }
            #[cfg(feature = "bitmap")]
            Canvas::Bitmap(buf) => {
                let root = BitMapBackend::with_buffer(buf, size).into_drawing_area();
                heatmap::draw_on(&root, &self.config, spec)?;
                root.present().map_err(PlotError::render)?;
            }
        }
        self.drawn = true;
        Ok(())
    }

    /// Encode the figure.
    pub fn encode(self) -> Result<Vec<u8>> {
        if !self.drawn {
            return Err(PlotError::render("figure has nothing drawn"));
        }
        match self.canvas {
            Canvas::Svg(buf) => Ok(buf.into_bytes()),
            #[cfg(feature = "bitmap")]
            Canvas::Bitmap(buf) => {
                let (width, height) = (self.config.width, self.config.height);
                let Some(img) = image::RgbImage::from_raw(width, height, buf) else {
                    return Err(PlotError::render("bitmap buffer has the wrong size"));
                };
                let mut bytes = Vec::new();
                let mut cursor = std::io::Cursor::new(&mut bytes);
                img.write_to(&mut cursor, image::ImageFormat::Png)
                    .map_err(PlotError::render)?;
                Ok(bytes)
            }
        }
    }

    /// Deliver the figure to `target`, consuming it.
    pub fn present(self, target: &PresentTarget) -> Result<Presented> {
        let format = self.format();
        let bytes = self.encode()?;
        let presented = match target {
            PresentTarget::File(path) => {
                std::fs::write(path, &bytes)?;
                Presented::File(path.clone())
            }
            PresentTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(&bytes)?;
                out.flush()?;
                Presented::Stdout(bytes.len())
            }
            PresentTarget::Memory => Presented::Memory(bytes),
        };
        tracing::info!("Presented {:?} figure to {:?}", format, target);
        Ok(presented)
    }
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("format", &self.format())
            .field("size", &(self.config.width, self.config.height))
            .field("drawn", &self.drawn)
            .finish()
    }
}
