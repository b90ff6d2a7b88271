mod account;
mod config_cmd;
mod dashboard;
mod plan;
mod profile;
mod recipe;

use clap::ValueEnum;
use platejoy_core::{AccountStore, FileStore, Session};

pub use account::{logout, whoami, LoginCommand, SignupCommand};
pub use config_cmd::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use plan::PlanCommand;
pub use profile::ProfileCommand;
pub use recipe::RecipeCommand;

/// The account store used by every command.
pub type Store = AccountStore<FileStore>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The logged-in session, or an error telling the user to log in.
fn require_session(store: &Store) -> Result<Session, Box<dyn std::error::Error>> {
    store
        .current_session()
        .cloned()
        .ok_or_else(|| "Not logged in. Run 'platejoy login' or 'platejoy signup' first.".into())
}
