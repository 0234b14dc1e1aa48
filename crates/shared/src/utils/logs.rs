use anyhow::{Context, Result};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logger(
    sdk_logger_provider: Option<&SdkLoggerProvider>,
    component: &str,
    is_dev: bool,
    enable_file: bool,
) -> Result<()> {
    let file_layer = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(format!("rust_app_{component}"))
            .filename_suffix("log")
            .build(log_dir)
            .with_context(|| format!("Failed to create log appender in {log_dir}"))?;
        let (file_writer, guard) = non_blocking(file_appender);

        // the writer must outlive main
        std::mem::forget(guard);

        Some(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new("info")),
        )
    } else {
        None
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let otel_layer = match sdk_logger_provider {
        Some(provider) => {
            let otel_filter = EnvFilter::new("info")
                .add_directive("hyper=off".parse()?)
                .add_directive("opentelemetry=off".parse()?)
                .add_directive("tonic=off".parse()?)
                .add_directive("h2=off".parse()?)
                .add_directive("sqlx=warn".parse()?);

            Some(OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .try_init()
        .with_context(|| format!("Failed to install logger for {component}"))?;

    Ok(())
}
