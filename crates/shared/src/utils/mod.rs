mod logs;
mod metrics;
mod otel;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::otel::{ServiceTelemetry, Telemetry, TracingContext};
pub use self::shutdown::shutdown_signal;
