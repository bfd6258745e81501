use iced::{Point, Size};

/// Fixed value range of the attention / meditation axis.
pub const Y_RANGE: (f64, f64) = (0.0, 100.0);

/// Map a series onto `size`, index 0 at the left edge and the last sample at
/// the right edge.
///
/// The y axis is fixed to [`Y_RANGE`] whatever the data; out-of-range values
/// are clamped to the chart edge, never dropped.  A one-sample series sits on
/// the left edge.
pub fn series_points<'a>(values: impl ExactSizeIterator<Item = &'a f64>, size: Size) -> Vec<Point> {
    let count = values.len();
    let step = if count > 1 {
        size.width / (count - 1) as f32
    } else {
        0.0
    };

    values
        .enumerate()
        .map(|(i, &v)| Point::new(i as f32 * step, value_to_y(v, size.height)))
        .collect()
}

/// Horizontal grid lines: `(y, label value)` every 25 units.
pub fn y_ticks(height: f32) -> Vec<(f32, f64)> {
    (0..=4)
        .map(|i| {
            let value = Y_RANGE.0 + (Y_RANGE.1 - Y_RANGE.0) * i as f64 / 4.0;
            (value_to_y(value, height), value)
        })
        .collect()
}

fn value_to_y(value: f64, height: f32) -> f32 {
    let (lo, hi) = Y_RANGE;
    let value = if value.is_finite() { value.clamp(lo, hi) } else { lo };
    let fraction = (value - lo) / (hi - lo);
    height * (1.0 - fraction as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_full_width() {
        let values = [0.0, 50.0, 100.0];
        let points = series_points(values.iter(), Size::new(200.0, 100.0));

        assert_eq!(points[0], Point::new(0.0, 100.0));
        assert_eq!(points[1], Point::new(100.0, 50.0));
        assert_eq!(points[2], Point::new(200.0, 0.0));
    }

    #[test]
    fn out_of_range_is_clamped_not_dropped() {
        let values = [-20.0, 150.0, f64::NAN];
        let points = series_points(values.iter(), Size::new(10.0, 100.0));

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].y, 100.0);
        assert_eq!(points[1].y, 0.0);
        assert_eq!(points[2].y, 100.0);
    }

    #[test]
    fn single_sample_sits_on_left_edge() {
        let points = series_points([25.0].iter(), Size::new(300.0, 100.0));
        assert_eq!(points, vec![Point::new(0.0, 75.0)]);
    }

    #[test]
    fn ticks_cover_axis() {
        let ticks = y_ticks(200.0);
        assert_eq!(ticks.first(), Some(&(200.0, 0.0)));
        assert_eq!(ticks.last(), Some(&(0.0, 100.0)));
        assert_eq!(ticks.len(), 5);
    }
}
