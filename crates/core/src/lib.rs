pub mod buffer;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod reconnect;
pub mod state;

pub use buffer::RollingBuffer;
pub use dashboard::{Dashboard, DashboardSettings};
pub use error::{DashboardError, Result};
pub use event::{Message, SocketEvent};
pub use reconnect::{ReconnectPolicy, ReconnectTimer};
pub use state::{BadgeClass, BAND_LABELS, ConnectionState, MetricSample, StatusBadge};
