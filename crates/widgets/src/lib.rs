pub mod badge;
pub mod metrics;
pub mod spectrum;

pub use badge::QualityBadge;
pub use metrics::MetricChart;
pub use spectrum::SpectrumChart;
