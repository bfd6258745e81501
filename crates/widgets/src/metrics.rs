use mindflex_core::{Dashboard, Message};
use mindflex_renderer::{series_points, y_ticks, ChartLayout};
use mindflex_theme::{Color, Theme};
use iced::{
    mouse,
    widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke},
    Element, Length, Point, Rectangle, Renderer, Size,
};

const LINE_WIDTH: f32 = 2.0;

/// Attention / meditation line chart over the rolling windows.
///
/// Geometry is cached; call [`clear`](Self::clear) whenever the dashboard's
/// revision changes.
#[derive(Default)]
pub struct MetricChart {
    cache: Cache,
}

impl MetricChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate the cached geometry so the next frame redraws.
    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn view<'a>(
        &'a self,
        dashboard: &'a Dashboard,
        theme: &'a Theme,
        layout: &'a ChartLayout,
    ) -> Element<'a, Message> {
        Canvas::new(MetricPlot { cache: &self.cache, dashboard, theme })
            .width(Length::Fill)
            .height(Length::Fixed(layout.height))
            .into()
    }
}

struct MetricPlot<'a> {
    cache:     &'a Cache,
    dashboard: &'a Dashboard,
    theme:     &'a Theme,
}

impl canvas::Program<Message> for MetricPlot<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            draw_grid(frame, self.theme);

            let series = [
                ("Attention", self.dashboard.attention(), self.theme.series.attention),
                ("Meditation", self.dashboard.meditation(), self.theme.series.meditation),
            ];

            for (_, buffer, color) in &series {
                let points = series_points(buffer.iter(), frame.size());
                stroke_polyline(frame, &points, *color);
            }

            draw_legend(frame, self.theme, &series.map(|(label, _, color)| (label, color)));
        });

        vec![geometry]
    }
}

/// Horizontal lines at 0, 25, 50, 75 and 100 with their values.
fn draw_grid(frame: &mut Frame, theme: &Theme) {
    let grid = theme.foreground.with_alpha(0.15).to_iced();
    let label = theme.foreground.with_alpha(0.6).to_iced();
    let width = frame.width();

    for (y, value) in y_ticks(frame.height()) {
        frame.stroke(
            &Path::line(Point::new(0.0, y), Point::new(width, y)),
            Stroke::default().with_color(grid).with_width(1.0),
        );
        frame.fill_text(canvas::Text {
            content: format!("{value:.0}"),
            position: Point::new(4.0, (y - theme.font_size).max(0.0)),
            color: label,
            size: (theme.font_size - 2.0).into(),
            ..canvas::Text::default()
        });
    }
}

fn stroke_polyline(frame: &mut Frame, points: &[Point], color: Color) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    let path = Path::new(|b| {
        b.move_to(*first);
        for p in rest {
            b.line_to(*p);
        }
    });

    frame.stroke(
        &path,
        Stroke::default().with_color(color.to_iced()).with_width(LINE_WIDTH),
    );
}

/// Colour swatch + name per series, stacked in the top-right corner.
fn draw_legend(frame: &mut Frame, theme: &Theme, entries: &[(&str, Color)]) {
    let swatch = Size::new(12.0, 12.0);
    let line_height = theme.font_size + 6.0;
    let x = frame.width() - 120.0;

    for (i, (label, color)) in entries.iter().enumerate() {
        let y = 8.0 + i as f32 * line_height;
        frame.fill_rectangle(Point::new(x, y + 2.0), swatch, color.to_iced());
        frame.fill_text(canvas::Text {
            content: (*label).to_string(),
            position: Point::new(x + swatch.width + 6.0, y),
            color: theme.foreground.to_iced(),
            size: theme.font_size.into(),
            ..canvas::Text::default()
        });
    }
}
