//! Sequential colour scales.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl RgbColor {
    /// Create a colour from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Perceived brightness in `[0, 255]`.
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.red) + 0.587 * f64::from(self.green) + 0.114 * f64::from(self.blue)
    }

    /// Mix `self` towards `other` by `factor` in `[0, 1]`.
    fn lerp(self, other: Self, factor: f64) -> Self {
        let mix = |a: u8, b: u8| {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * factor).round() as u8
        };
        Self::new(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
        )
    }
}

impl From<RgbColor> for RGBColor {
    fn from(c: RgbColor) -> Self {
        RGBColor(c.red, c.green, c.blue)
    }
}

/// A colour pinned to a position of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub position: f64,
    /// Colour at this position.
    pub color: RgbColor,
}

/// A sequential colour scale that linearly interpolates between stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colormap {
    name: String,
    stops: Vec<ColorStop>,
}

/// ColorBrewer 9-class "Blues", light to dark.
const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

impl Colormap {
    /// Create a colour scale from stops sorted by position.
    ///
    /// Requires at least two stops, positions inside `[0, 1]` and strictly
    /// increasing.
    pub fn new(name: impl Into<String>, stops: Vec<ColorStop>) -> Result<Self> {
        let colormap = Self {
            name: name.into(),
            stops,
        };
        colormap.validate()?;
        Ok(colormap)
    }

    /// Check the stops; needed for scales that were deserialized.
    pub fn validate(&self) -> Result<()> {
        if self.stops.len() < 2 {
            return Err(PlotError::InvalidConfig(
                "A colormap must have at least two stops".to_string(),
            ));
        }
        if self.stops.iter().any(|s| !(0.0..=1.0).contains(&s.position)) {
            return Err(PlotError::InvalidConfig(
                "Colormap stop positions must lie in [0, 1]".to_string(),
            ));
        }
        if self.stops.windows(2).any(|w| w[0].position >= w[1].position) {
            return Err(PlotError::InvalidConfig(
                "Colormap stop positions must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }

    /// The blue sequential scale used for confusion matrices.
    pub fn blues() -> Self {
        let last = (BLUES.len() - 1) as f64;
        let stops = BLUES
            .iter()
            .enumerate()
            .map(|(i, &(r, g, b))| ColorStop {
                position: i as f64 / last,
                color: RgbColor::new(r, g, b),
            })
            .collect();
        Self {
            name: "Blues".to_string(),
            stops,
        }
    }

    /// Name of the scale.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stops of the scale.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Colour at position `t`, clamped to the scale's range.
    pub fn color_at(&self, t: f64) -> RgbColor {
        let (Some(&first), Some(&last)) = (self.stops.first(), self.stops.last()) else {
            return RgbColor::new(255, 255, 255);
        };
        if t.is_nan() || t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        // `t` is strictly inside the range, so some window brackets it.
        for w in self.stops.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            if t <= hi.position {
                let factor = (t - lo.position) / (hi.position - lo.position);
                return lo.color.lerp(hi.color, factor);
            }
        }
        last.color
    }

    /// Colour for `value` on the range `[min, max]`.
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> RgbColor {
        self.color_at(Self::normalize(value, min, max))
    }

    /// Map `value` onto `[0, 1]`; a degenerate range maps everything to 0.
    pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
        if max <= min {
            0.0
        } else {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        }
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::blues()
    }
}
