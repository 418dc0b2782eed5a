//! Logging (tracing) related code.

use tracing_subscriber::EnvFilter;

/// Boilerplate logging initialization.
///
/// Events go to stderr; stdout is reserved for the rename report.
pub fn tracing_subscribe_boilerplate(env_min: impl Into<String>) {
        let env_min = env_min.into();
        let filter = std::env::var("RUST_LOG").ok()
                                              .and_then(|directive| EnvFilter::try_new(directive).ok())
                                              .unwrap_or_else(|| EnvFilter::new(env_min));

        tracing_subscriber::fmt().with_env_filter(filter)
                                 .with_writer(std::io::stderr)
                                 .with_file(true)
                                 .with_line_number(true)
                                 .with_target(true)
                                 .init();
}
