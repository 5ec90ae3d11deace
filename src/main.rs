use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lifesync::{app::AppContext, storage::config::Config};

mod cli;
use cli::{parse_cli_mode, print_config_report, CliMode, USAGE};
mod tui;
use tui::run_tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let calendar = match cli_mode {
        CliMode::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliMode::ConfigCheck => {
            let config = Config::load_or_create().context("Failed to load config")?;
            print_config_report(&config);
            return Ok(());
        }
        CliMode::Interactive { calendar } => calendar,
    };

    setup_logging();

    let config = Config::load_or_create().context("Failed to load config")?;
    let ctx = AppContext::connect(config).context("Failed to set up backend client")?;

    run_tui(&ctx, calendar).await?;

    tracing::info!("lifesync exited");
    Ok(())
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "lifesync.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("lifesync started");
}
