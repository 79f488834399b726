use crate::cli::{actions::Action, commands, dispatch::handler};
use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Parse arguments, install the log subscriber and return the action to run.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity = matches.get_one::<u8>("verbosity").copied().unwrap_or(0);
    init_logging(level_for(verbosity))?;

    handler(&matches)
}

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(level: Level) -> Result<()> {
    // stdout belongs to the console session
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // RUST_LOG still wins when set
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing::subscriber::set_global_default(Registry::default().with(fmt_layer).with(env_filter))
        .context("Failed to install the log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_onto_levels() {
        assert_eq!(level_for(0), Level::ERROR);
        assert_eq!(level_for(2), Level::INFO);
        assert_eq!(level_for(4), Level::TRACE);
        assert_eq!(level_for(9), Level::TRACE);
    }
}
