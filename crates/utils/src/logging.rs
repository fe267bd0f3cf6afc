use pagewarm_core::constants::PAGEWARM_LOG_VAR;
use tracing::{span, Level, Span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// The filter comes from `PAGEWARM_LOG`, then `RUST_LOG`, then `info`.
/// Events go to stderr so stdout stays reserved for per-file reports.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = resolve_filter(std::env::var(PAGEWARM_LOG_VAR).ok());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_names(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn resolve_filter(explicit: Option<String>) -> EnvFilter {
    explicit
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Check if stderr is attached to a terminal
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span covering the warming phase of a run
pub fn warm_span(files: usize, workers: usize) -> Span {
    span!(Level::INFO, "warm", files = %files, workers = %workers)
}
