use mindflex_core::{DashboardSettings, ReconnectPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure parsed from `mindflex.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindflexConfig {
    /// Telemetry endpoint and recovery behaviour.
    pub connection: ConnectionConfig,
    /// Chart geometry and signal gating.
    pub charts: ChartConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

impl MindflexConfig {
    /// Runtime settings for [`mindflex_core::Dashboard`].
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            history_len:            self.charts.history_len,
            good_quality_threshold: self.charts.good_quality_threshold,
            placeholder_bars:       self.charts.placeholder_bars,
            reconnect:              self.connection.policy(),
        }
    }
}

/// Where the telemetry server lives and what to do when it goes away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub reconnect: ReconnectMode,
    /// Fixed delay for `reconnect = "reload"`.
    pub reload_delay_ms: u64,
    pub backoff_initial_ms: u64,
    pub backoff_max_ms: u64,
    pub backoff_factor: f64,
}

impl ConnectionConfig {
    /// WebSocket URL; no path, no subprotocol.
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }

    pub fn policy(&self) -> ReconnectPolicy {
        match self.reconnect {
            ReconnectMode::Reload => ReconnectPolicy::Reload {
                delay: Duration::from_millis(self.reload_delay_ms),
            },
            ReconnectMode::Backoff => ReconnectPolicy::Backoff {
                initial: Duration::from_millis(self.backoff_initial_ms),
                max:     Duration::from_millis(self.backoff_max_ms.max(self.backoff_initial_ms)),
                factor:  self.backoff_factor,
            },
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host:               "127.0.0.1".to_string(),
            port:               8081,
            reconnect:          ReconnectMode::Reload,
            reload_delay_ms:    5_000,
            backoff_initial_ms: 500,
            backoff_max_ms:     30_000,
            backoff_factor:     2.0,
        }
    }
}

/// Recovery strategy after the socket closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReconnectMode {
    /// Reset all session state, then reconnect after a fixed delay.
    #[default]
    Reload,
    /// Reconnect in place with capped exponential backoff.
    Backoff,
}

/// Chart geometry and the good-signal gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Samples kept per series.
    pub history_len: usize,
    /// `quality` below this value is a good signal.
    pub good_quality_threshold: f64,
    /// Raw band value per pixel of bar offset.
    pub spectrum_scale: f64,
    /// Drawn width of each spectrum bar (pixels).
    pub bar_width: f32,
    /// Horizontal distance between bar origins (pixels).
    pub bar_pitch: f32,
    /// Bars shown while the signal is poor.
    pub placeholder_bars: usize,
    /// Height of each chart canvas (pixels).
    pub chart_height: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            history_len:            300,
            good_quality_threshold: 60.0,
            spectrum_scale:         100_000.0,
            bar_width:              73.0,
            bar_pitch:              75.0,
            placeholder_bars:       7,
            chart_height:           300.0,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#1a1a1a"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Badge background for a good signal.
    pub good: String,
    /// Badge background for a poor signal or a dead connection.
    pub bad: String,
    /// Line color of the attention series.
    pub attention: String,
    /// Line color of the meditation series.
    pub meditation: String,
    /// Spectrum gradient, bottom → top.
    pub gradient_bottom: String,
    pub gradient_low: String,
    pub gradient_high: String,
    pub gradient_top: String,
    /// Font size in points.
    pub font_size: f32,
    /// Outer padding of the window content (pixels).
    pub padding: u16,
    /// Vertical gap between sections (pixels).
    pub gap: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:      "#1a1a1a".to_string(),
            foreground:      "#d3d3d3".to_string(),
            good:            "#008000".to_string(), // green
            bad:             "#ff0000".to_string(), // red
            attention:       "#edc240".to_string(),
            meditation:      "#afd8f8".to_string(),
            gradient_bottom: "#00ff00".to_string(), // green
            gradient_low:    "#0000ff".to_string(), // blue, 75% down
            gradient_high:   "#d02090".to_string(), // violet-red, 25% down
            gradient_top:    "#ffffff".to_string(),
            font_size:       14.0,
            padding:         24,
            gap:             16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_endpoint() {
        let cfg = MindflexConfig::default();
        assert_eq!(cfg.connection.url(), "ws://127.0.0.1:8081");
        assert_eq!(
            cfg.connection.policy(),
            ReconnectPolicy::Reload { delay: Duration::from_millis(5_000) }
        );
        assert_eq!(cfg.dashboard_settings(), DashboardSettings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: MindflexConfig = toml::from_str(
            r#"
            [connection]
            host = "headset.local"
            reconnect = "backoff"
            backoff_max_ms = 8000

            [charts]
            history_len = 120
            "#,
        )
        .unwrap();

        assert_eq!(cfg.connection.url(), "ws://headset.local:8081");
        assert_eq!(
            cfg.connection.policy(),
            ReconnectPolicy::Backoff {
                initial: Duration::from_millis(500),
                max:     Duration::from_millis(8_000),
                factor:  2.0,
            }
        );
        assert_eq!(cfg.charts.history_len, 120);
        assert_eq!(cfg.charts.spectrum_scale, 100_000.0);
        assert_eq!(cfg.theme, ThemeConfig::default());
    }

    #[test]
    fn unknown_reconnect_mode_is_rejected() {
        let res: Result<MindflexConfig, _> = toml::from_str("[connection]\nreconnect = \"never\"\n");
        assert!(res.is_err());
    }
}
