use crate::state::MetricSample;

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Telemetry socket task → `Socket`
/// - Config watcher task   → `ConfigReloaded`
/// - Timer subscription    → `Tick`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Telemetry socket ──────────────────────────────────────────────────────
    /// A lifecycle or data event from the transport task of session `session`.
    ///
    /// Events from a session that is no longer current are dropped by the
    /// dashboard, so a late frame from an abandoned socket cannot leak into
    /// a freshly reset session.
    Socket { session: u64, event: SocketEvent },

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Timer tick; drives the reconnect countdown.
    Tick,
}

/// What the WebSocket transport observed, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    /// Handshake completed.
    Opened,
    /// Server greeting (`"event": "connect"`), sent before any data.
    Greeting,
    /// A decoded `"event": "data"` envelope.
    Sample(MetricSample),
    /// Transport-level error; always followed by `Closed`.
    Error(String),
    /// Connection closed, cleanly or not.
    Closed,
}
