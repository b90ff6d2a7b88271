use clap::{Args, Subcommand};

use platejoy_core::{ProfilePatch, COMMON_ALLERGIES, DIETARY_OPTIONS};

use super::{require_session, OutputFormat, Store};

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show your profile
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update your profile
    Update {
        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New email
        #[arg(long)]
        email: Option<String>,

        /// Dietary preference (can be repeated, replaces the current list)
        #[arg(long = "diet", value_name = "PREFERENCE")]
        dietary_preferences: Vec<String>,

        /// Allergy (can be repeated, replaces the current list)
        #[arg(long = "allergy", value_name = "ALLERGY")]
        allergies: Vec<String>,

        /// Remove every dietary preference
        #[arg(long, conflicts_with = "dietary_preferences")]
        clear_diet: bool,

        /// Remove every allergy
        #[arg(long, conflicts_with = "allergies")]
        clear_allergies: bool,
    },

    /// List the suggested dietary preferences and allergies
    Options,
}

impl ProfileCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProfileSubcommand::Show { format } => {
                let session = require_session(store)?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&session)?);
                    }
                    OutputFormat::Text => print!("{}", session),
                }
                Ok(())
            }
            ProfileSubcommand::Update {
                name,
                email,
                dietary_preferences,
                allergies,
                clear_diet,
                clear_allergies,
            } => {
                require_session(store)?;

                let mut patch = ProfilePatch::new();
                if let Some(name) = name {
                    patch = patch.name(name.trim());
                }
                if let Some(email) = email {
                    patch = patch.email(email.trim());
                }
                if *clear_diet || !dietary_preferences.is_empty() {
                    patch = patch.dietary_preferences(dietary_preferences.clone());
                }
                if *clear_allergies || !allergies.is_empty() {
                    patch = patch.allergies(allergies.clone());
                }

                if patch.is_empty() {
                    println!("Nothing to update. See 'platejoy profile update --help'.");
                    return Ok(());
                }

                store.update_profile(patch)?;
                if let Some(session) = store.current_session() {
                    println!("Profile updated.\n");
                    print!("{}", session);
                }
                Ok(())
            }
            ProfileSubcommand::Options => {
                println!("Dietary preferences:");
                for option in DIETARY_OPTIONS {
                    println!("  {}", option);
                }
                println!("\nCommon allergies:");
                for allergy in COMMON_ALLERGIES {
                    println!("  {}", allergy);
                }
                Ok(())
            }
        }
    }
}
