pub mod client;
pub mod envelope;

pub use client::TelemetryClient;
pub use envelope::{decode_frame, Frame, NamedBands, WireBands, WireSample};
