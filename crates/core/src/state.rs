use chrono::{DateTime, Local};

/// Raw quality reported when the headset has no skin contact at all.
pub const NO_CONTACT_QUALITY: f64 = 200.0;

/// Names of the eight EEG power bands, in wire order.
pub const BAND_LABELS: [&str; 8] = [
    "delta", "theta", "lowAlpha", "highAlpha", "lowBeta", "highBeta", "lowGamma", "midGamma",
];

/// One decoded `"data"` observation.
///
/// Every field is optional: the headset only reports the values present in
/// the packet it just parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSample {
    /// Attention score (0–100).
    pub attention: Option<f64>,
    /// Meditation score (0–100).
    pub meditation: Option<f64>,
    /// Raw signal-quality value; 0 is a perfect signal, 200 no contact.
    pub quality: Option<f64>,
    /// Band powers, ordered delta → mid-gamma.
    pub eeg: Option<Vec<f64>>,
    /// Server-side timestamp, if the envelope carried one.
    pub timestamp: Option<DateTime<Local>>,
}

impl MetricSample {
    /// Quality with the missing value mapped to "no contact".
    #[must_use]
    pub fn quality_or_worst(&self) -> f64 {
        self.quality.unwrap_or(NO_CONTACT_QUALITY)
    }
}

/// Socket + signal state shown by the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Socket opening, or open and awaiting the first sample.
    Connecting,
    /// Receiving samples with `quality` below the good-signal threshold.
    ConnectedGood,
    /// Receiving samples with a degraded signal, or the socket reported an error.
    ConnectedPoor,
    #[default]
    Disconnected,
}

/// Style class of the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    Good,
    Bad,
}

/// Text + class pair rendered by the connection quality indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub class: BadgeClass,
    pub text:  String,
}

impl StatusBadge {
    fn new(class: BadgeClass, text: impl Into<String>) -> Self {
        Self { class, text: text.into() }
    }

    pub fn disconnected() -> Self {
        Self::new(BadgeClass::Bad, "Disconnected")
    }

    pub fn connecting() -> Self {
        Self::new(BadgeClass::Bad, "Connecting…")
    }

    pub fn awaiting_data() -> Self {
        Self::new(BadgeClass::Good, "Connected (no data yet)")
    }

    pub fn connection_error() -> Self {
        Self::new(BadgeClass::Bad, "Connection error")
    }

    /// Badge for a raw quality value.
    ///
    /// `quality < threshold` is a good signal; the boundary itself is poor.
    pub fn for_quality(quality: f64, threshold: f64) -> Self {
        let percent = quality_percent(quality).round();
        if is_good_signal(quality, threshold) {
            Self::new(BadgeClass::Good, format!("Connected ({percent:.0}%)"))
        } else {
            Self::new(BadgeClass::Bad, format!("Poor signal ({percent:.0}%)"))
        }
    }
}

impl Default for StatusBadge {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// Displayed signal percentage: `(200 - quality) / 2`.
#[inline]
pub fn quality_percent(quality: f64) -> f64 {
    (NO_CONTACT_QUALITY - quality) / 2.0
}

#[inline]
pub fn is_good_signal(quality: f64, threshold: f64) -> bool {
    quality < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_forty_is_eighty() {
        assert_eq!(quality_percent(40.0), 80.0);
        assert_eq!(StatusBadge::for_quality(40.0, 60.0).text, "Connected (80%)");
    }

    #[test]
    fn threshold_boundary_is_poor() {
        let at = StatusBadge::for_quality(60.0, 60.0);
        assert_eq!(at.class, BadgeClass::Bad);
        assert_eq!(at.text, "Poor signal (70%)");

        let below = StatusBadge::for_quality(59.0, 60.0);
        assert_eq!(below.class, BadgeClass::Good);
    }

    #[test]
    fn half_percent_rounds_up() {
        // (200 - 41) / 2 = 79.5
        assert_eq!(StatusBadge::for_quality(41.0, 60.0).text, "Connected (80%)");
    }

    #[test]
    fn missing_quality_is_no_contact() {
        let sample = MetricSample::default();
        assert_eq!(sample.quality_or_worst(), 200.0);
        assert_eq!(StatusBadge::for_quality(sample.quality_or_worst(), 60.0).text, "Poor signal (0%)");
    }
}
