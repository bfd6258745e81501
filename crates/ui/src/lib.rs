//! Desktop window for `mindflex`.
//!
//! Owns the Iced application loop and wires together all background tasks:
//! - Telemetry WebSocket session (one per dashboard session id)
//! - Config file watcher (live reload on change)
//! - Reconnect timer (only while a reconnect is pending)

use futures::channel::mpsc::Sender;
use futures::SinkExt;
use mindflex_config::{default_path, load as load_config, ConfigWatcher, MindflexConfig};
use mindflex_core::{Dashboard, Message};
use mindflex_renderer::ChartLayout;
use mindflex_telemetry::TelemetryClient;
use mindflex_theme::Theme;
use mindflex_widgets::{MetricChart, QualityBadge, SpectrumChart};
use iced::{
    widget::{column, container, scrollable, text},
    Element, Length, Size, Subscription, Task,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Reconnect timer resolution while a reconnect is pending.
const TICK_INTERVAL_MS: u64 = 100;

const WINDOW_SIZE: Size = Size::new(760.0, 900.0);

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .style(App::style)
        .window_size(WINDOW_SIZE)
        .run()
}

// ── State ─────────────────────────────────────────────────────────────────────

struct App {
    dashboard:  Dashboard,
    config:     MindflexConfig,
    theme:      Theme,
    layout:     ChartLayout,
    badge:      QualityBadge,
    metrics:    MetricChart,
    spectrum:   SpectrumChart,
    /// Dashboard revision the chart caches were last built for.
    drawn:      u64,
    /// Clock of the last processed message, for the reconnect countdown.
    now:        Instant,
}

/// Identity of one transport session.  A new value restarts the socket
/// subscription; the old stream is dropped with its connection.
#[derive(Debug, Clone, Hash)]
struct SessionKey {
    url:     String,
    session: u64,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = match load_config(default_path()) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config load failed, using defaults: {e}");
                MindflexConfig::default()
            }
        };

        let app = Self::with_config(config);
        info!(url = %app.config.connection.url(), "dashboard ready");

        (app, Task::none())
    }

    fn with_config(config: MindflexConfig) -> Self {
        let mut dashboard = Dashboard::new(config.dashboard_settings());
        dashboard.connect();

        Self {
            dashboard,
            theme:    Theme::from_config(&config.theme),
            layout:   ChartLayout::from_config(&config.charts),
            badge:    QualityBadge::new(),
            metrics:  MetricChart::new(),
            spectrum: SpectrumChart::new(),
            drawn:    0,
            now:      Instant::now(),
            config,
        }
    }

    fn title(&self) -> String {
        String::from("MindFlex EEG Dashboard")
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        self.now = Instant::now();

        match message {
            Message::Socket { session, event } => {
                self.dashboard.handle_socket(session, event, self.now);
            }
            Message::Tick => {
                self.dashboard.tick(self.now);
            }
            Message::ConfigReloaded => self.reload_config(),
        }

        self.sync_charts();
        Task::none()
    }

    fn reload_config(&mut self) {
        let cfg = match load_config(default_path()) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };

        info!("Config reloaded");
        self.apply_config(cfg);
    }

    fn apply_config(&mut self, cfg: MindflexConfig) {
        let restart = needs_new_session(&self.config, &cfg);

        self.dashboard.apply_settings(cfg.dashboard_settings());
        self.theme  = Theme::from_config(&cfg.theme);
        self.layout = ChartLayout::from_config(&cfg.charts);
        self.config = cfg;
        self.force_redraw();

        if restart {
            info!(url = %self.config.connection.url(), "telemetry endpoint or history changed; new session");
            self.dashboard.restart();
        }
    }

    /// Drop cached chart geometry if the dashboard changed since last frame.
    fn sync_charts(&mut self) {
        let revision = self.dashboard.revision();
        if revision != self.drawn {
            self.force_redraw();
            self.drawn = revision;
        }
    }

    fn force_redraw(&self) {
        self.metrics.clear();
        self.spectrum.clear();
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let font = self.theme.font_size;
        let heading = |label: &'static str| text(label).size(font * 1.3);

        let status = match self.dashboard.reconnect_in(self.now) {
            Some(left) => format!(
                "{} · reconnecting in {:.1}s",
                self.config.connection.url(),
                left.as_secs_f32()
            ),
            None => self.config.connection.url(),
        };

        let content = column![
            text("MindFlex EEG Dashboard").size(font * 2.0),
            self.badge.view(&self.dashboard, &self.theme),
            heading("Attention & Meditation"),
            self.metrics.view(&self.dashboard, &self.theme, &self.layout),
            heading("EEG Frequency Bands"),
            self.spectrum.view(&self.dashboard, &self.theme, &self.layout),
            text(status)
                .size(font - 2.0)
                .color(self.theme.foreground.with_alpha(0.5).to_iced()),
        ]
        .spacing(self.theme.gap as f32)
        .padding(self.theme.padding);

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![Subscription::run(config_stream)];

        if let Some(session) = self.dashboard.active_session() {
            let key = SessionKey { url: self.config.connection.url(), session };
            subs.push(Subscription::run_with(key, socket_stream));
        }

        if self.dashboard.reconnect_in(self.now).is_some() {
            subs.push(
                iced::time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(|_| Message::Tick),
            );
        }

        Subscription::batch(subs)
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.foreground.to_iced(),
        }
    }
}

/// Whether switching from `old` to `new` requires a fresh session.
fn needs_new_session(old: &MindflexConfig, new: &MindflexConfig) -> bool {
    old.connection.url() != new.connection.url()
        || old.charts.history_len != new.charts.history_len
}

// ── Subscription streams ──────────────────────────────────────────────────────
//
// Each free function acts as both the stream builder AND part of the identity
// key for `Subscription::run` / `run_with`.

/// Runs one telemetry session and forwards its events, tagged with the
/// session id, in delivery order.  The socket lives inside this future, so
/// dropping the subscription closes it.
fn socket_stream(key: &SessionKey) -> impl iced::futures::Stream<Item = Message> {
    let SessionKey { url, session } = key.clone();

    iced::stream::channel(32, move |mut sender: Sender<Message>| async move {
        let client = TelemetryClient::new(url);
        let (tx, mut rx) = mpsc::channel(32);

        let forward = async {
            while let Some(event) = rx.recv().await {
                if sender.send(Message::Socket { session, event }).await.is_err() {
                    break; // subscription dropped
                }
            }
        };
        futures::join!(client.run_session(tx), forward);

        // Session finished; the dashboard decides when the next one starts.
        std::future::pending::<()>().await;
    })
}

/// Watches `~/.config/mindflex/mindflex.toml` for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        std::future::pending::<()>().await;
    })
}
