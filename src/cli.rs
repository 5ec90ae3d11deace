use std::env;

use lifesync::{storage::config::Config, ui::theme::Theme};

pub const USAGE: &str = "Usage: lifesync [--calendar <id>] [--config-check] [--help]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliMode {
    Interactive { calendar: Option<String> },
    ConfigCheck,
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

fn parse_args<I>(args: I) -> Result<CliMode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut calendar = None;
    let mut config_check = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--calendar" => match args.next() {
                Some(id) if !id.starts_with("--") && !id.trim().is_empty() => calendar = Some(id),
                _ => return Err("--calendar needs a calendar id".to_string()),
            },
            "--config-check" => config_check = true,
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    if config_check {
        Ok(CliMode::ConfigCheck)
    } else {
        Ok(CliMode::Interactive { calendar })
    }
}

/// Prints the effective configuration without touching the network.
pub fn print_config_report(config: &Config) {
    println!("Config file:      {}", Config::config_path().display());
    println!("Backend:          {}", config.api.base_url);
    println!("Timeout:          {}s", config.api.timeout_seconds);

    let theme = Theme::get_by_name(&config.ui.theme);
    if theme.name == config.ui.theme.to_lowercase() {
        println!("Theme:            {}", theme.name);
    } else {
        println!(
            "Theme:            {} (unknown, using {}; available: {})",
            config.ui.theme,
            theme.name,
            Theme::available_themes().join(", ")
        );
    }

    match config.initial_calendar(None) {
        Some(id) => println!("Default calendar: {}", id),
        None => println!("Default calendar: none"),
    }
    if config.ui.calendars.is_empty() {
        println!("Calendars:        none configured");
    } else {
        println!("Calendars:        {}", config.ui.calendars.join(", "));
    }
    if let Some(dir) = &config.session.storage_dir {
        println!("Session storage:  {}", dir.display());
    }
}
