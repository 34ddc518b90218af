use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber once at process start.
/// - Respects `RUST_LOG` if set, falls back to `info,tower_http=info,axum=info`
/// - `LOG_FORMAT=json` switches to structured JSON output for container logs
/// - Writes to stdout to improve visibility in environments that hide stderr
///
/// Repeated calls are no-ops, so binaries and library startup may both
/// invoke this.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(|| io::stdout());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.compact().try_init();
    }
}
