use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use mindflex_core::{DashboardError, MetricSample, Result, SocketEvent};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Outer JSON shape of every server → client text frame.
///
/// `data` stays untyped until the event name is known: the greeting carries
/// a plain string there, data frames an object.
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// JSON shape of the `data` object of a `"data"` envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WireSample {
    pub attention:  Option<f64>,
    pub meditation: Option<f64>,
    pub quality:    Option<f64>,
    pub eeg:        Option<WireBands>,
}

/// Band powers arrive either as an ordered array or keyed by band name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireBands {
    Ordered(Vec<f64>),
    Named(NamedBands),
}

/// Keyed form of the eight band powers; absent bands read as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamedBands {
    pub delta:      f64,
    pub theta:      f64,
    pub low_alpha:  f64,
    pub high_alpha: f64,
    pub low_beta:   f64,
    pub high_beta:  f64,
    pub low_gamma:  f64,
    pub mid_gamma:  f64,
}

impl WireBands {
    /// Flatten to the canonical delta → mid-gamma ordering.
    pub fn into_ordered(self) -> Vec<f64> {
        match self {
            Self::Ordered(values) => values,
            Self::Named(b) => vec![
                b.delta, b.theta, b.low_alpha, b.high_alpha,
                b.low_beta, b.high_beta, b.low_gamma, b.mid_gamma,
            ],
        }
    }
}

/// A decoded text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// `"event": "data"`.
    Data(MetricSample),
    /// `"event": "connect"`, the server's hello.
    Greeting,
    /// Any other event name; carries the name for logging.
    Ignored(String),
}

impl Frame {
    /// The dashboard event this frame produces, if any.
    pub fn into_event(self) -> Option<SocketEvent> {
        match self {
            Self::Data(sample) => Some(SocketEvent::Sample(sample)),
            Self::Greeting => Some(SocketEvent::Greeting),
            Self::Ignored(event) => {
                debug!(event = %event, "ignoring non-data envelope");
                None
            }
        }
    }
}

/// Decode one JSON text frame.
///
/// Only the envelope is validated for non-data events; a `"data"` envelope
/// must carry an object whose known fields have the right types.
pub fn decode_frame(text: &str) -> Result<Frame> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| DashboardError::Decode(format!("envelope: {e}")))?;

    match envelope.event.as_str() {
        "data" => {
            let data = envelope
                .data
                .ok_or_else(|| DashboardError::Decode("data envelope without payload".into()))?;
            let wire: WireSample = serde_json::from_value(data)
                .map_err(|e| DashboardError::Decode(format!("payload: {e}")))?;

            let timestamp = envelope.timestamp.as_deref().and_then(parse_timestamp);
            Ok(Frame::Data(wire_to_core_sample(wire, timestamp)))
        }
        "connect" => Ok(Frame::Greeting),
        _ => Ok(Frame::Ignored(envelope.event)),
    }
}

fn wire_to_core_sample(wire: WireSample, timestamp: Option<DateTime<Local>>) -> MetricSample {
    MetricSample {
        attention:  wire.attention,
        meditation: wire.meditation,
        quality:    wire.quality,
        eeg:        wire.eeg.map(WireBands::into_ordered),
        timestamp,
    }
}

/// Accept RFC 3339 timestamps as well as offset-less ISO-8601 local times.
fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).single());
    if parsed.is_none() {
        debug!(timestamp = raw, "unparseable envelope timestamp");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use mindflex_core::{Dashboard, BAND_LABELS};
    use std::time::Instant;

    #[test]
    fn decodes_ordered_data_frame() {
        let frame = decode_frame(
            r#"{"event":"data","data":{"attention":61,"meditation":47,"quality":0,"eeg":[1,2,3]}}"#,
        )
        .unwrap();

        let Frame::Data(sample) = frame else {
            panic!("wrong variant");
        };
        assert_eq!(sample.attention, Some(61.0));
        assert_eq!(sample.meditation, Some(47.0));
        assert_eq!(sample.quality, Some(0.0));
        assert_eq!(sample.eeg, Some(vec![1.0, 2.0, 3.0]));
        assert!(sample.timestamp.is_none());
    }

    #[test]
    fn named_bands_are_ordered() {
        let frame = decode_frame(
            r#"{"event":"data","data":{"quality":26,"eeg":{"midGamma":8,"delta":1,"lowAlpha":3,"theta":2}}}"#,
        )
        .unwrap();

        let Frame::Data(sample) = frame else {
            panic!("wrong variant");
        };
        let eeg = sample.eeg.unwrap();
        assert_eq!(eeg.len(), BAND_LABELS.len());
        assert_eq!(eeg, vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 8.0]);
        assert_eq!(sample.attention, None);
    }

    #[test]
    fn greeting_and_other_events() {
        assert_eq!(
            decode_frame(r#"{"event":"connect","data":"Connected"}"#).unwrap(),
            Frame::Greeting
        );
        assert_eq!(
            decode_frame(r#"{"event":"heartbeat"}"#).unwrap(),
            Frame::Ignored("heartbeat".into())
        );
        assert_eq!(Frame::Ignored("heartbeat".into()).into_event(), None);
    }

    #[test]
    fn malformed_frames_are_decode_errors() {
        for text in [
            "not json",
            r#"{"data":{}}"#,
            r#"{"event":"data"}"#,
            r#"{"event":"data","data":"Connected"}"#,
            r#"{"event":"data","data":{"attention":"high"}}"#,
        ] {
            assert!(
                matches!(decode_frame(text), Err(DashboardError::Decode(_))),
                "accepted {text}"
            );
        }
    }

    #[test]
    fn naive_timestamp_is_read_as_local_time() {
        let frame = decode_frame(
            r#"{"event":"data","timestamp":"2024-03-01T12:34:56.250000","data":{"quality":0}}"#,
        )
        .unwrap();

        let Frame::Data(sample) = frame else {
            panic!("wrong variant");
        };
        let ts = sample.timestamp.unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (12, 34, 56));
    }

    #[test]
    fn heartbeat_leaves_dashboard_untouched() {
        let mut dash = Dashboard::default();
        let session = dash.connect();
        let before = dash.clone();

        let event = decode_frame(r#"{"event":"heartbeat","data":{"attention":99}}"#)
            .unwrap()
            .into_event();
        if let Some(event) = event {
            dash.handle_socket(session, event, Instant::now());
        }

        assert_eq!(dash.revision(), before.revision());
        assert_eq!(dash.attention(), before.attention());
        assert_eq!(dash.badge(), before.badge());
    }
}
