use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a config file with the default values
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        match &config.config_file {
                            Some(path) => println!("Config file: {}", path.display()),
                            None => println!(
                                "Config file: {} (not found)",
                                config_path
                                    .unwrap_or_else(Config::default_config_path)
                                    .display()
                            ),
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("auth_delay_ms: {}", config.auth_delay_ms.value);
                        println!("  source: {}", config.auth_delay_ms.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let path = config_path.unwrap_or_else(Config::default_config_path);

                if path.exists() {
                    println!("Config file already exists: {}", path.display());
                    println!("Use 'platejoy config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&path)?;
                writeln!(file, "# PlateJoy configuration")?;
                writeln!(file)?;
                writeln!(file, "# Where accounts, the session and meal plans are kept")?;
                writeln!(file, "data_dir: {}", Config::default_data_dir().display())?;
                writeln!(file)?;
                writeln!(file, "# Simulated delay of signup and login, in milliseconds")?;
                writeln!(file, "auth_delay_ms: {}", config.auth_delay_ms.value)?;

                println!("Created config file: {}", path.display());
                Ok(())
            }
        }
    }
}
