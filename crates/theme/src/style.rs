use crate::colors::Color;
use mindflex_core::BadgeClass;

/// Colours of the connection quality badge.
#[derive(Debug, Clone, Copy)]
pub struct BadgeStyle {
    pub good: Color,
    pub bad:  Color,
    /// Badge text colour (both classes).
    pub text: Color,
}

impl BadgeStyle {
    pub fn background(&self, class: BadgeClass) -> Color {
        match class {
            BadgeClass::Good => self.good,
            BadgeClass::Bad  => self.bad,
        }
    }
}

/// Four-stop vertical fill of the spectrum bars.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumGradient {
    pub bottom: Color,
    /// Stop at 75% of the canvas height (measured from the top).
    pub low:    Color,
    /// Stop at 25% of the canvas height.
    pub high:   Color,
    pub top:    Color,
}

impl SpectrumGradient {
    /// `(offset, colour)` pairs from the top of the canvas (offset 0) to the
    /// bottom (offset 1).
    pub fn stops(&self) -> [(f32, Color); 4] {
        [
            (0.0,  self.top),
            (0.25, self.high),
            (0.75, self.low),
            (1.0,  self.bottom),
        ]
    }
}

/// Line colours of the two metric series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesStyle {
    pub attention:  Color,
    pub meditation: Color,
}
