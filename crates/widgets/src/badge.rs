use mindflex_core::{Dashboard, Message};
use mindflex_theme::Theme;
use iced::{
    widget::{container, row, text},
    Alignment, Background, Border, Element, Length,
};

/// Connection quality indicator: a coloured pill with the status text, plus
/// the time of the last accepted sample.
#[derive(Debug, Default)]
pub struct QualityBadge;

impl QualityBadge {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, dashboard: &'a Dashboard, theme: &'a Theme) -> Element<'a, Message> {
        let badge = dashboard.badge();
        let bg = theme.badge.background(badge.class).to_iced();
        let fg = theme.badge.text.to_iced();

        let pill = container(text(badge.text.clone()).size(theme.font_size).color(fg))
            .padding(theme.font_size as u16)
            .width(Length::Fill)
            .style(move |_: &iced::Theme| container::Style {
                background: Some(Background::Color(bg)),
                border: Border { radius: 4.0.into(), ..Default::default() },
                ..Default::default()
            });

        let last = match dashboard.last_sample() {
            Some(ts) => format!("last sample {}", ts.format("%H:%M:%S")),
            None => String::new(),
        };

        row![
            pill,
            text(last)
                .size(theme.font_size - 2.0)
                .color(theme.foreground.with_alpha(0.6).to_iced()),
        ]
        .spacing(theme.gap as f32)
        .align_y(Alignment::Center)
        .into()
    }
}
