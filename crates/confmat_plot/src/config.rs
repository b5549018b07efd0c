//! Heatmap rendering configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colormap::Colormap;
use crate::error::{PlotError, Result};

/// Configuration for drawing a confusion matrix heatmap.
///
/// Sizes are in pixels. The defaults reproduce a 12 x 6 inch figure at 100 dpi
/// with 8 pt cell annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Figure width.
    pub width: u32,
    /// Figure height.
    pub height: u32,
    /// Font size of the numbers drawn inside cells.
    pub annotation_font_size: u32,
    /// Font size of the class tick labels.
    pub tick_font_size: u32,
    /// Font size of the axis descriptions.
    pub axis_font_size: u32,
    /// Description of the x (column) axis.
    pub x_label: String,
    /// Description of the y (row) axis.
    pub y_label: String,
    /// Optional caption above the chart.
    pub title: Option<String>,
    /// Colour scale for cells.
    pub colormap: Colormap,
    /// Draw counts inside cells.
    pub annotate: bool,
    /// Draw a colour bar next to the matrix.
    pub colorbar: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            annotation_font_size: 11,
            tick_font_size: 14,
            axis_font_size: 16,
            x_label: "Predicted".to_string(),
            y_label: "Observed".to_string(),
            title: None,
            colormap: Colormap::blues(),
            annotate: true,
            colorbar: true,
        }
    }
}

impl HeatmapConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| PlotError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce a figure.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::InvalidConfig(format!(
                "Figure size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.annotation_font_size == 0 || self.tick_font_size == 0 || self.axis_font_size == 0 {
            return Err(PlotError::InvalidConfig(
                "Font sizes must be non-zero".to_string(),
            ));
        }
        self.colormap.validate()
    }

    /// Set the figure size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the annotation font size.
    pub fn with_annotation_font_size(mut self, size: u32) -> Self {
        self.annotation_font_size = size;
        self
    }

    /// Set the axis descriptions.
    pub fn with_axis_labels(
        mut self,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Set the chart caption.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the colour scale.
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Enable/disable cell annotations.
    pub fn with_annotations(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Enable/disable the colour bar.
    pub fn with_colorbar(mut self, colorbar: bool) -> Self {
        self.colorbar = colorbar;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::{ColorStop, RgbColor};

    #[test]
    fn test_defaults() {
        let config = HeatmapConfig::default();
        assert_eq!((config.width, config.height), (1200, 600));
        assert_eq!(config.x_label, "Predicted");
        assert_eq!(config.y_label, "Observed");
        assert_eq!(config.colormap.name(), "Blues");
        assert!(config.annotate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"width": 640, "title": "Validation"}"#;
        let config: HeatmapConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 600);
        assert_eq!(config.title.as_deref(), Some("Validation"));
        assert_eq!(config.colormap, Colormap::blues());
    }

    #[test]
    fn test_from_json_file() {
        let name = format!("confmat_config_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let json = r#"{"annotation_font_size": 9, "colorbar": false}"#;
        std::fs::write(&path, json).unwrap();

        let config = HeatmapConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.annotation_font_size, 9);
        assert!(!config.colorbar);
    }

    #[test]
    fn test_validate_rejects_empty_figure() {
        let config = HeatmapConfig::default().with_size(0, 600);
        assert!(matches!(config.validate(), Err(PlotError::InvalidConfig(_))));
        let config = HeatmapConfig::default().with_annotation_font_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_colormap() {
        let json = r#"{"colormap": {"name": "flat", "stops": []}}"#;
        let config: HeatmapConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(PlotError::InvalidConfig(_))));
    }

    #[test]
    fn test_builders() {
        let white = ColorStop {
            position: 0.0,
            color: RgbColor::new(255, 255, 255),
        };
        let red = ColorStop {
            position: 1.0,
            color: RgbColor::new(200, 0, 0),
        };
        let reds = Colormap::new("Reds", vec![white, red]).unwrap();

        let config = HeatmapConfig::default()
            .with_axis_labels("Guess", "Truth")
            .with_colormap(reds.clone());

        assert_eq!(config.x_label, "Guess");
        assert_eq!(config.y_label, "Truth");
        assert_eq!(config.colormap, reds);
        assert!(config.validate().is_ok());
    }
}
