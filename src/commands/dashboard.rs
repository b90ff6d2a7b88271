use clap::Args;

use platejoy_core::{Catalog, Dashboard, Favorites, WeekPlan};

use super::{require_session, OutputFormat, Store};

#[derive(Args)]
pub struct DashboardCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DashboardCommand {
    pub fn run(&self, store: &Store) -> Result<(), Box<dyn std::error::Error>> {
        let session = require_session(store)?;
        let plan = WeekPlan::load(store.storage(), session.id)?;
        let favorites = Favorites::load(store.storage(), session.id)?;
        let catalog = Catalog::builtin()?;
        let today = chrono::Local::now().date_naive();

        let dashboard = Dashboard::build(&session, &plan, &favorites, &catalog, today);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            }
            OutputFormat::Text => print!("{}", dashboard),
        }
        Ok(())
    }
}
