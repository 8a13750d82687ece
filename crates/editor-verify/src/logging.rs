use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_logging(verbosity: u8) {
    // 0 = errors only (chromiumoxide protocol noise suppressed entirely)
    // 1 (-v) = info for the driver, warn for chromiumoxide
    // 2+ (-vv) = debug for everything
    let filter = match verbosity {
        0 => "error,chromiumoxide=off",
        1 => "info,chromiumoxide=warn",
        _ => "debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Log to stderr; stdout carries the step confirmation lines
    let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(stderr)
        .with_target(true)
        .with_level(true)
        .compact()
        .init();
}
