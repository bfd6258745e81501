pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{BadgeStyle, SeriesStyle, SpectrumGradient};

use mindflex_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible: invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub badge:      BadgeStyle,
    pub series:     SeriesStyle,
    pub gradient:   SpectrumGradient,
    pub font_size:  f32,
    pub padding:    u16,
    pub gap:        u16,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let parse = |hex: &str, fallback: Color| Color::from_hex(hex).unwrap_or(fallback);

        Self {
            background: parse(&cfg.background, Color::CHARCOAL),
            foreground: parse(&cfg.foreground, Color::SILVER),
            badge: BadgeStyle {
                good: parse(&cfg.good, Color::GREEN),
                bad:  parse(&cfg.bad, Color::RED),
                text: Color::WHITE,
            },
            series: SeriesStyle {
                attention:  parse(&cfg.attention, Color::GOLD),
                meditation: parse(&cfg.meditation, Color::SKY),
            },
            gradient: SpectrumGradient {
                bottom: parse(&cfg.gradient_bottom, Color::LIME),
                low:    parse(&cfg.gradient_low, Color::BLUE),
                high:   parse(&cfg.gradient_high, Color::VIOLET_RED),
                top:    parse(&cfg.gradient_top, Color::WHITE),
            },
            font_size: cfg.font_size,
            padding:   cfg.padding,
            gap:       cfg.gap,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_hex_falls_back() {
        let cfg = ThemeConfig {
            good: "not-a-colour".to_string(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.badge.good, Color::GREEN);
        assert_eq!(theme.badge.background(mindflex_core::BadgeClass::Bad), Color::RED);
    }

    #[test]
    fn gradient_runs_white_to_green() {
        let stops = Theme::default().gradient.stops();
        assert_eq!(stops[0], (0.0, Color::WHITE));
        assert_eq!(stops[3], (1.0, Color::LIME));
    }
}
