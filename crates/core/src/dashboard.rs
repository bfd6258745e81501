//! The dashboard's whole mutable state, owned by one value.
//!
//! Lifecycle: [`Dashboard::new`] → [`connect`](Dashboard::connect) →
//! socket events via [`handle_socket`](Dashboard::handle_socket) → on close the
//! reconnect timer is armed → [`tick`](Dashboard::tick) fires it, optionally
//! resets the session, and connects again.  [`restart`](Dashboard::restart)
//! does the reset immediately.  [`dispose`](Dashboard::dispose)
//! stops everything.
//!
//! Nothing here performs I/O or reads the clock for scheduling; the caller
//! supplies `now`, so the whole lifecycle is testable without a transport.

use crate::buffer::RollingBuffer;
use crate::event::SocketEvent;
use crate::reconnect::{ReconnectPolicy, ReconnectTimer};
use crate::state::{is_good_signal, ConnectionState, MetricSample, StatusBadge};
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Tunables the dashboard needs at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Length of the attention / meditation windows.
    pub history_len: usize,
    /// `quality` strictly below this value counts as a good signal.
    pub good_quality_threshold: f64,
    /// Number of zero bars shown while the signal is poor.
    pub placeholder_bars: usize,
    pub reconnect: ReconnectPolicy,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            history_len: 300,
            good_quality_threshold: 60.0,
            placeholder_bars: 7,
            reconnect: ReconnectPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    settings:    DashboardSettings,
    attention:   RollingBuffer<f64>,
    meditation:  RollingBuffer<f64>,
    /// Bars currently on screen (already quality-gated).
    spectrum:    Vec<f64>,
    quality:     Option<f64>,
    connection:  ConnectionState,
    badge:       StatusBadge,
    session:     u64,
    /// A transport for `session` is supposed to be running.
    live:        bool,
    /// Consecutive closes without a sample in between.
    attempts:    u32,
    timer:       ReconnectTimer,
    last_sample: Option<DateTime<Local>>,
    /// Bumped on every change that requires the charts to be redrawn.
    revision:    u64,
}

impl Dashboard {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            attention:   RollingBuffer::new(settings.history_len),
            meditation:  RollingBuffer::new(settings.history_len),
            spectrum:    vec![0.0; settings.placeholder_bars],
            quality:     None,
            connection:  ConnectionState::Disconnected,
            badge:       StatusBadge::disconnected(),
            session:     0,
            live:        false,
            attempts:    0,
            timer:       ReconnectTimer::default(),
            last_sample: None,
            revision:    0,
            settings,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn attention(&self) -> &RollingBuffer<f64> {
        &self.attention
    }

    pub fn meditation(&self) -> &RollingBuffer<f64> {
        &self.meditation
    }

    pub fn spectrum(&self) -> &[f64] {
        &self.spectrum
    }

    /// Latest raw quality value, `None` until the first sample.
    pub fn quality(&self) -> Option<f64> {
        self.quality
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn badge(&self) -> &StatusBadge {
        &self.badge
    }

    pub fn last_sample(&self) -> Option<DateTime<Local>> {
        self.last_sample
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Id of the session whose transport should be running, if any.
    pub fn active_session(&self) -> Option<u64> {
        self.live.then_some(self.session)
    }

    /// Time left before the next reconnect, if one is pending.
    pub fn reconnect_in(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Start a new session and return its id.
    pub fn connect(&mut self) -> u64 {
        self.session += 1;
        self.live = true;
        self.timer.cancel();
        self.connection = ConnectionState::Connecting;
        self.badge = StatusBadge::connecting();
        info!(session = self.session, "starting telemetry session");
        self.session
    }

    /// Stop the current session without scheduling a reconnect.
    pub fn dispose(&mut self) {
        self.live = false;
        self.timer.cancel();
        self.connection = ConnectionState::Disconnected;
        self.badge = StatusBadge::disconnected();
    }

    /// Drop all session state and start over on a fresh session.
    pub fn restart(&mut self) -> u64 {
        self.reset();
        self.connect()
    }

    /// Route a transport event.  Returns `true` when the charts must redraw.
    pub fn handle_socket(&mut self, session: u64, event: SocketEvent, now: Instant) -> bool {
        if !self.live || session != self.session {
            debug!(session, current = self.session, "dropping event from stale session");
            return false;
        }

        match event {
            SocketEvent::Opened => {
                self.on_open();
                false
            }
            SocketEvent::Greeting => {
                self.on_greeting();
                false
            }
            SocketEvent::Sample(sample) => self.on_sample(sample),
            SocketEvent::Error(err) => {
                self.on_error(&err);
                false
            }
            SocketEvent::Closed => {
                self.on_close(now);
                false
            }
        }
    }

    pub fn on_open(&mut self) {
        self.connection = ConnectionState::Connecting;
        info!(session = self.session, "telemetry socket open; awaiting first sample");
    }

    pub fn on_greeting(&mut self) {
        debug!("server greeting received");
        self.badge = StatusBadge::awaiting_data();
    }

    /// Fold one sample into the buffers.  Always redraws.
    pub fn on_sample(&mut self, sample: MetricSample) -> bool {
        let threshold = self.settings.good_quality_threshold;
        let quality = sample.quality_or_worst();

        if let Some(attention) = sample.attention {
            self.attention.push(attention);
        }
        if let Some(meditation) = sample.meditation {
            self.meditation.push(meditation);
        }

        let good = is_good_signal(quality, threshold);
        self.connection = if good {
            ConnectionState::ConnectedGood
        } else {
            ConnectionState::ConnectedPoor
        };
        self.badge = StatusBadge::for_quality(quality, threshold);

        if !good {
            self.spectrum = vec![0.0; self.settings.placeholder_bars];
        } else if let Some(eeg) = sample.eeg {
            self.spectrum = eeg;
        }

        self.quality = Some(quality);
        self.last_sample = Some(sample.timestamp.unwrap_or_else(Local::now));
        self.attempts = 0;
        self.revision += 1;
        true
    }

    pub fn on_error(&mut self, err: &str) {
        warn!(error = %err, "telemetry socket error");
        self.connection = ConnectionState::ConnectedPoor;
        self.badge = StatusBadge::connection_error();
    }

    /// Mark the session dead and arm the reconnect timer.  Returns the delay.
    pub fn on_close(&mut self, now: Instant) -> Duration {
        let delay = self.settings.reconnect.delay_for(self.attempts);
        self.attempts = self.attempts.saturating_add(1);
        self.live = false;
        self.connection = ConnectionState::Disconnected;
        self.badge = StatusBadge::disconnected();
        self.timer.schedule(now, delay);
        warn!(
            session = self.session,
            delay_ms = delay.as_millis() as u64,
            "telemetry socket closed; reconnect scheduled"
        );
        delay
    }

    /// Fire the reconnect timer if due.  Returns `true` when a new session
    /// was started.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.fire(now) {
            return false;
        }
        if self.settings.reconnect.resets_session() {
            self.reset();
        }
        self.connect();
        true
    }

    /// Apply new settings.  Buffers are resized in place; a new policy takes
    /// effect on the next close.
    pub fn apply_settings(&mut self, settings: DashboardSettings) {
        if settings.history_len != self.settings.history_len {
            self.attention.resize(settings.history_len);
            self.meditation.resize(settings.history_len);
            self.revision += 1;
        }
        self.settings = settings;
    }

    /// Drop every piece of session state, as a fresh start would.
    fn reset(&mut self) {
        info!("resetting dashboard state");
        self.attention.clear();
        self.meditation.clear();
        self.spectrum = vec![0.0; self.settings.placeholder_bars];
        self.quality = None;
        self.last_sample = None;
        self.attempts = 0;
        self.revision += 1;
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardSettings::default())
    }
}
