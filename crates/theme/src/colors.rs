/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CHARCOAL:    Self = Self { r: 0.102, g: 0.102, b: 0.102, a: 1.0 }; // #1a1a1a
    pub const SILVER:      Self = Self { r: 0.827, g: 0.827, b: 0.827, a: 1.0 }; // #d3d3d3
    pub const GREEN:       Self = Self { r: 0.0,   g: 0.502, b: 0.0,   a: 1.0 }; // #008000
    pub const RED:         Self = Self { r: 1.0,   g: 0.0,   b: 0.0,   a: 1.0 }; // #ff0000
    pub const LIME:        Self = Self { r: 0.0,   g: 1.0,   b: 0.0,   a: 1.0 }; // #00ff00
    pub const BLUE:        Self = Self { r: 0.0,   g: 0.0,   b: 1.0,   a: 1.0 }; // #0000ff
    pub const VIOLET_RED:  Self = Self { r: 0.816, g: 0.125, b: 0.565, a: 1.0 }; // #d02090
    pub const WHITE:       Self = Self { r: 1.0,   g: 1.0,   b: 1.0,   a: 1.0 }; // #ffffff
    pub const GOLD:        Self = Self { r: 0.929, g: 0.761, b: 0.251, a: 1.0 }; // #edc240
    pub const SKY:         Self = Self { r: 0.686, g: 0.847, b: 0.973, a: 1.0 }; // #afd8f8

    /// Opaque colour from 8-bit channels.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS-style hex color string (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        // `from_str_radix` would also take a sign.
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };
        // `#abc` is shorthand for `#aabbcc`.
        let nibble = |s: &str| -> Option<u8> { byte(s).map(|v| v * 17) };

        match hex.len() {
            3 => Some(Self::rgb(nibble(&hex[0..1])?, nibble(&hex[1..2])?, nibble(&hex[2..3])?)),
            6 => Some(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Some(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)
                .with_alpha(byte(&hex[6..8])? as f32 / 255.0)),
            _ => None,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_hex_forms() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#00ff0080").map(|c| c.a), Some(128.0 / 255.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
        assert_eq!(Color::from_hex("#+f0000"), None);
        assert_eq!(Color::from_hex("+ff"), None);
    }
}
