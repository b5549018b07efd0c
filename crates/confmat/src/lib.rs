//! # confmat
//!
//! Confusion matrix heatmaps from true and predicted labels.
//!
//! - **Analysis**: [`confusion_matrix`] counts label pairs into a
//!   [`ConfusionMatrix`] ordered by the sorted union of observed labels
//! - **Rendering**: [`render_heatmap`] draws an annotated blue heatmap onto an
//!   explicit [`Figure`], with "Predicted" on the x axis and "Observed" on the
//!   y axis
//!
//! ## Quick Start
//!
//! ```rust
//! use confmat::prelude::*;
//!
//! let y_true = [0, 1, 1, 0];
//! let y_pred = [0, 1, 0, 0];
//!
//! let mut figure = Figure::svg(HeatmapConfig::default())?;
//! let cm = plot_confusion_matrix(&y_true, &y_pred, &mut figure)?;
//! assert_eq!(cm.rows(), &[vec![2, 0], vec![1, 1]]);
//!
//! let presented = figure.present(&PresentTarget::Memory)?;
//! assert!(matches!(presented, Presented::Memory(_)));
//! # Ok::<(), confmat::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `bitmap`: PNG figures through the plotters bitmap backend

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fmt::Display;

use thiserror::Error;

// Re-export all crates
pub use confmat_analysis as analysis;
pub use confmat_core as core;
pub use confmat_plot as plot;

pub use confmat_analysis::{confusion_matrix, ConfusionMatrix};
pub use confmat_core::{CoreError, LabelDomain};
pub use confmat_plot::{
    render_heatmap, Colormap, Figure, FigureFormat, HeatmapConfig, PlotError, PresentTarget,
    Presented,
};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the visualizer, passed through from the computation and
/// rendering layers unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid label input (length mismatch, empty input).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Rendering or presentation failed.
    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// Compute the confusion matrix of `y_true` against `y_pred` and draw it onto
/// `figure`.
///
/// Labels are validated before anything is drawn, so a length mismatch or
/// empty input leaves `figure` untouched. The computed matrix is returned for
/// further inspection.
pub fn plot_confusion_matrix<L>(
    y_true: &[L],
    y_pred: &[L],
    figure: &mut Figure,
) -> Result<ConfusionMatrix<L>>
where
    L: Ord + Clone + Display,
{
    let cm = confusion_matrix(y_true, y_pred)?;
    render_heatmap(figure, cm.labels(), cm.rows())?;
    Ok(cm)
}

/// Compute, draw and present a confusion matrix with the default configuration.
pub fn show_confusion_matrix<L>(
    y_true: &[L],
    y_pred: &[L],
    target: &PresentTarget,
) -> Result<(ConfusionMatrix<L>, Presented)>
where
    L: Ord + Clone + Display,
{
    show_confusion_matrix_with(y_true, y_pred, HeatmapConfig::default(), target)
}

/// Compute, draw and present a confusion matrix.
///
/// The figure format follows the target: a `.png` file gets a bitmap figure,
/// everything else SVG. The figure is dropped once presented.
pub fn show_confusion_matrix_with<L>(
    y_true: &[L],
    y_pred: &[L],
    config: HeatmapConfig,
    target: &PresentTarget,
) -> Result<(ConfusionMatrix<L>, Presented)>
where
    L: Ord + Clone + Display,
{
    let format = match target {
        PresentTarget::File(path) => FigureFormat::from_path(path),
        PresentTarget::Stdout | PresentTarget::Memory => FigureFormat::Svg,
    };
    let cm = confusion_matrix(y_true, y_pred)?;
    let mut figure = Figure::new(format, config)?;
    render_heatmap(&mut figure, cm.labels(), cm.rows())?;
    let presented = figure.present(target)?;
    Ok((cm, presented))
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use confmat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        confusion_matrix, plot_confusion_matrix, render_heatmap, show_confusion_matrix,
        show_confusion_matrix_with, Colormap, ConfusionMatrix, Error, Figure, FigureFormat,
        HeatmapConfig, PresentTarget, Presented, Result,
    };
}
