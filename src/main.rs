use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    ConfigCommand, DashboardCommand, LoginCommand, PlanCommand, ProfileCommand, RecipeCommand,
    SignupCommand, Store,
};
use config::Config;
use platejoy_core::{AccountStore, FileStore};

#[derive(Parser)]
#[command(name = "platejoy")]
#[command(version)]
#[command(about = "Plan your meals for the week", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup(SignupCommand),

    /// Log in to an existing account
    Login(LoginCommand),

    /// Log out
    Logout,

    /// Show who is logged in
    Whoami,

    /// View and edit your profile
    Profile(ProfileCommand),

    /// Browse recipes
    Recipe(RecipeCommand),

    /// Manage the weekly meal plan
    Plan(PlanCommand),

    /// Show today's overview
    Dashboard(DashboardCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "platejoy=warn,platejoy_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for the config command
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Signup(cmd)) => cmd.run(&mut open_store(&config)?).await?,
        Some(Commands::Login(cmd)) => cmd.run(&mut open_store(&config)?).await?,
        Some(Commands::Logout) => commands::logout(&mut open_store(&config)?)?,
        Some(Commands::Whoami) => commands::whoami(&open_store(&config)?),
        Some(Commands::Profile(cmd)) => cmd.run(&mut open_store(&config)?)?,
        Some(Commands::Recipe(cmd)) => cmd.run(&mut open_store(&config)?)?,
        Some(Commands::Plan(cmd)) => cmd.run(&mut open_store(&config)?)?,
        Some(Commands::Dashboard(cmd)) => cmd.run(&open_store(&config)?)?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<Store, Box<dyn std::error::Error>> {
    tracing::debug!("Data directory: {}", config.data_dir.value.display());
    let store = AccountStore::open(FileStore::new(config.data_dir.value.clone()))?
        .with_auth_delay(config.auth_delay());
    Ok(store)
}
