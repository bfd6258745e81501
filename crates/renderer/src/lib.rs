//! Geometry for the dashboard charts.
//!
//! Everything here is pure: values and a canvas size go in, points and
//! rectangles come out.  `mindflex-widgets` turns them into canvas paths.

pub mod line;
pub mod spectrum;

pub use line::{series_points, y_ticks, Y_RANGE};
pub use spectrum::{Bar, SpectrumLayout};

use mindflex_config::ChartConfig;

/// Sizes and scaling shared by both charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Height of each chart canvas in logical pixels.
    pub height:   f32,
    pub spectrum: SpectrumLayout,
}

impl ChartLayout {
    /// Build a [`ChartLayout`] from the loaded configuration.
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            height:   config.chart_height,
            spectrum: SpectrumLayout {
                bar_width: config.bar_width,
                bar_pitch: config.bar_pitch,
                scale:     config.spectrum_scale,
            },
        }
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}
