use iced::{Point, Rectangle, Size};
use mindflex_core::BAND_LABELS;

/// Geometry rules of the spectrum bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumLayout {
    /// Drawn width of one bar.
    pub bar_width: f32,
    /// Distance between the left edges of neighbouring bars.
    pub bar_pitch: f32,
    /// Raw band value per pixel of offset from the canvas top.
    pub scale: f64,
}

/// One bar, ready to fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub index: usize,
    /// `value / scale`: where the bar starts, measured down from the top.
    pub offset: f32,
    /// Fill rectangle from `offset` to the canvas bottom.
    pub rect: Rectangle,
}

impl SpectrumLayout {
    /// Lay out one bar per value.
    ///
    /// Bar `i` starts at `x = i * bar_pitch` and at `y = value / scale`, then
    /// runs down to the bottom edge, so larger raw values give shorter bars.
    pub fn bars(&self, values: &[f64], canvas: Size) -> Vec<Bar> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let offset = self.offset(value);
                Bar {
                    index,
                    offset,
                    rect: Rectangle::new(
                        Point::new(index as f32 * self.bar_pitch, offset),
                        Size::new(self.bar_width, (canvas.height - offset).max(0.0)),
                    ),
                }
            })
            .collect()
    }

    /// Canvas width needed to show `count` bars.
    pub fn width_for(&self, count: usize) -> f32 {
        match count {
            0 => 0.0,
            n => (n - 1) as f32 * self.bar_pitch + self.bar_width,
        }
    }

    /// Band name for bar `index` when the standard eight bands are shown.
    pub fn label(&self, index: usize, count: usize) -> Option<&'static str> {
        (count == BAND_LABELS.len())
            .then(|| BAND_LABELS.get(index).copied())
            .flatten()
    }

    /// Endpoints of the vertical gradient: canvas top → canvas bottom.
    pub fn gradient_span(&self, canvas: Size) -> (Point, Point) {
        (Point::ORIGIN, Point::new(0.0, canvas.height))
    }

    fn offset(&self, value: f64) -> f32 {
        if !value.is_finite() || self.scale == 0.0 {
            return 0.0;
        }
        (value / self.scale) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SpectrumLayout {
        SpectrumLayout { bar_width: 73.0, bar_pitch: 75.0, scale: 100_000.0 }
    }

    #[test]
    fn bar_offset_is_value_over_scale() {
        let bars = layout().bars(&[100_000.0, 200_000.0], Size::new(600.0, 300.0));

        assert_eq!(bars[0].offset, 1.0);
        assert_eq!(bars[1].offset, 2.0);
        assert_eq!(bars[0].rect, Rectangle::new(Point::new(0.0, 1.0), Size::new(73.0, 299.0)));
        assert_eq!(bars[1].rect, Rectangle::new(Point::new(75.0, 2.0), Size::new(73.0, 298.0)));
    }

    #[test]
    fn zero_placeholder_fills_to_top() {
        let bars = layout().bars(&[0.0; 7], Size::new(600.0, 300.0));

        assert_eq!(bars.len(), 7);
        assert!(bars.iter().all(|b| b.offset == 0.0 && b.rect.height == 300.0));
        assert_eq!(bars[6].rect.x, 450.0);
    }

    #[test]
    fn huge_values_collapse_to_nothing() {
        let bars = layout().bars(&[1e9], Size::new(100.0, 300.0));
        assert_eq!(bars[0].rect.height, 0.0);
    }

    #[test]
    fn labels_only_for_eight_bands() {
        let layout = layout();
        assert_eq!(layout.label(2, 8), Some("lowAlpha"));
        assert_eq!(layout.label(2, 7), None);
        assert_eq!(layout.label(8, 8), None);
    }

    #[test]
    fn width_covers_last_bar() {
        assert_eq!(layout().width_for(8), 7.0 * 75.0 + 73.0);
        assert_eq!(layout().width_for(0), 0.0);
    }
}
