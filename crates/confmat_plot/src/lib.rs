//! # confmat_plot
//!
//! Annotated heatmap rendering for confmat.
//!
//! Rendering goes through an explicit [`Figure`] value instead of any
//! process-wide "current figure":
//!
//! ```rust
//! use confmat_plot::{render_heatmap, Figure, HeatmapConfig, PresentTarget, Presented};
//!
//! let mut figure = Figure::svg(HeatmapConfig::default()).unwrap();
//! render_heatmap(&mut figure, &["0", "1"], &[vec![2, 0], vec![1, 1]]).unwrap();
//! let Presented::Memory(svg) = figure.present(&PresentTarget::Memory).unwrap() else {
//!     unreachable!()
//! };
//! assert!(String::from_utf8(svg).unwrap().contains("Predicted"));
//! ```
//!
//! ## Feature Flags
//!
//! - `bitmap`: PNG output through the plotters bitmap backend

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod colormap;
mod config;
mod error;
mod figure;
mod heatmap;

pub use colormap::{ColorStop, Colormap, RgbColor};
pub use config::HeatmapConfig;
pub use error::{PlotError, Result};
pub use figure::{Figure, FigureFormat, PresentTarget, Presented};
pub use heatmap::render_heatmap;
