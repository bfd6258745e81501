use mindflex_core::{Dashboard, Message};
use mindflex_renderer::ChartLayout;
use mindflex_theme::Theme;
use iced::{
    mouse,
    widget::canvas::{self, gradient, Cache, Canvas, Fill, Frame, Geometry},
    Element, Length, Point, Rectangle, Renderer,
};

/// Band-power bar chart.
///
/// Bars share a single canvas-wide vertical gradient, so a bar's colour at a
/// given height does not depend on its value.
#[derive(Default)]
pub struct SpectrumChart {
    cache: Cache,
}

impl SpectrumChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn view<'a>(
        &'a self,
        dashboard: &'a Dashboard,
        theme: &'a Theme,
        layout: &'a ChartLayout,
    ) -> Element<'a, Message> {
        let label_room = theme.font_size + 8.0;
        let width = layout.spectrum.width_for(dashboard.spectrum().len());

        Canvas::new(SpectrumPlot { cache: &self.cache, dashboard, theme, layout, label_room })
            .width(Length::Fixed(width.max(1.0)))
            .height(Length::Fixed(layout.height + label_room))
            .into()
    }
}

struct SpectrumPlot<'a> {
    cache:      &'a Cache,
    dashboard:  &'a Dashboard,
    theme:      &'a Theme,
    layout:     &'a ChartLayout,
    /// Strip below the bars reserved for band names.
    label_room: f32,
}

impl canvas::Program<Message> for SpectrumPlot<'_> {
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
            let mut plot = bounds.size();
            plot.height = (plot.height - self.label_room).max(0.0);

            let spectrum = &self.layout.spectrum;
            let values = self.dashboard.spectrum();
            let fill = bar_fill(self.theme, spectrum.gradient_span(plot));

            for bar in spectrum.bars(values, plot) {
                frame.fill_rectangle(bar.rect.position(), bar.rect.size(), fill.clone());

                if let Some(name) = spectrum.label(bar.index, values.len()) {
                    draw_label(frame, self.theme, name, Point::new(bar.rect.x, plot.height + 4.0));
                }
            }
        });

        vec![geometry]
    }
}

fn bar_fill(theme: &Theme, (start, end): (Point, Point)) -> Fill {
    let linear = theme
        .gradient
        .stops()
        .into_iter()
        .fold(gradient::Linear::new(start, end), |g, (offset, color)| {
            g.add_stop(offset, color.to_iced())
        });
    Fill::from(linear)
}

fn draw_label(frame: &mut Frame, theme: &Theme, name: &str, position: Point) {
    frame.fill_text(canvas::Text {
        content: name.to_string(),
        position,
        color: theme.foreground.with_alpha(0.8).to_iced(),
        size: (theme.font_size - 2.0).into(),
        ..canvas::Text::default()
    });
}
