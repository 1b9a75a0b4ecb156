use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(level: &str, verbose: bool) -> EnvFilter {
    let default = if verbose {
        "internmatch=debug,info".to_string()
    } else {
        format!("internmatch={level}")
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to stderr. Used by the headless `recommend` command.
pub fn init_cli_logger(level: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Logs to `path` so the terminal front end keeps the screen to itself.
pub fn init_file_logger(path: &Path, level: &str, verbose: bool) -> std::io::Result<()> {
    let file = File::options().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(env_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
    Ok(())
}
