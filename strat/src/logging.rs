use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Install a stderr subscriber at the given level.
///
/// `RUST_LOG` directives refine the level when set. Nothing is installed for
/// [`LogLevel::Off`], so stdout stays clean for piping documents.
pub(crate) fn setup(level: LogLevel) {
    let Some(tracing_level) = level.to_tracing_level() else {
        return;
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(tracing_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    tracing::debug!(level = ?level, "logging enabled");
}
