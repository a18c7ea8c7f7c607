//! Config validation CLI tool
//!
//! Validates a windowd configuration file and reports any errors.

use std::path::PathBuf;
use std::process::ExitCode;
use windowd_util::{default_config_path, format_duration};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a windowd configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    match windowd_config::load_config(&config_path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", windowd_config::CURRENT_CONFIG_VERSION);
            println!("  Window: {}", config.window);
            println!(
                "  Check interval: {}",
                format_duration(config.schedule.check_interval)
            );
            println!(
                "  Wake epsilon: {}",
                format_duration(config.schedule.wake_epsilon)
            );
            println!("  Unit: {}", config.service.unit);
            println!("  systemctl: {}", config.service.systemctl.display());

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                windowd_config::ConfigError::NotFound(path) => {
                    eprintln!("Configuration file not found: {}", path.display());
                }
                windowd_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                windowd_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                windowd_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                windowd_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        windowd_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
