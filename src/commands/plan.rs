use clap::{Args, Subcommand};

use platejoy_core::{Catalog, Day, MealType, PlanError, PlannedMeal, WeekPlan};

use super::{require_session, OutputFormat, Store};

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show the weekly plan
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Plan a recipe from the catalog
    Add {
        /// Day of the week (monday..sunday or mon..sun)
        day: Day,

        /// Meal type (breakfast, lunch, dinner)
        meal_type: MealType,

        /// Recipe id or name
        recipe: String,
    },

    /// Plan a meal that is not in the catalog
    Custom {
        /// Day of the week (monday..sunday or mon..sun)
        day: Day,

        /// Meal type (breakfast, lunch, dinner)
        meal_type: MealType,

        /// Name of the meal
        name: String,

        /// Cook time, e.g. "20 min"
        #[arg(long)]
        cook_time: Option<String>,

        /// Number of servings
        #[arg(long)]
        servings: Option<u32>,
    },

    /// Remove the meal from a slot
    Remove {
        /// Day of the week (monday..sunday or mon..sun)
        day: Day,

        /// Meal type (breakfast, lunch, dinner)
        meal_type: MealType,
    },

    /// Remove every planned meal
    Clear,

    /// List the ingredients of every planned recipe
    ShoppingList,
}

impl PlanCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        let session = require_session(store)?;
        let mut plan = WeekPlan::load(store.storage(), session.id)?;

        match &self.command {
            PlanSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&plan)?);
                    }
                    OutputFormat::Text => {
                        println!("Meal plan for {}\n", session.name);
                        print!("{}", plan);
                    }
                }
                Ok(())
            }
            PlanSubcommand::Add {
                day,
                meal_type,
                recipe,
            } => {
                let catalog = Catalog::builtin()?;
                let recipe = catalog
                    .find(recipe)
                    .ok_or_else(|| format!("Recipe not found: {}", recipe))?;

                let replaced = plan.assign(*day, *meal_type, PlannedMeal::from_recipe(recipe));
                plan.save(store.storage_mut(), session.id)?;

                println!("Planned {} for {} {}", recipe.name, day, meal_type);
                if let Some(old) = replaced {
                    println!("  (replaced {})", old.name);
                }
                Ok(())
            }
            PlanSubcommand::Custom {
                day,
                meal_type,
                name,
                cook_time,
                servings,
            } => {
                let meal = PlannedMeal::custom(name, cook_time.as_deref(), *servings)?;
                let planned = meal.to_string();

                let replaced = plan.assign(*day, *meal_type, meal);
                plan.save(store.storage_mut(), session.id)?;

                println!("Planned {} for {} {}", planned, day, meal_type);
                if let Some(old) = replaced {
                    println!("  (replaced {})", old.name);
                }
                Ok(())
            }
            PlanSubcommand::Remove { day, meal_type } => {
                match plan.remove(*day, *meal_type) {
                    Some(meal) => {
                        plan.save(store.storage_mut(), session.id)?;
                        println!("Removed {} from {} {}", meal.name, day, meal_type);
                    }
                    None => println!("Nothing planned for {} {}", day, meal_type),
                }
                Ok(())
            }
            PlanSubcommand::Clear => {
                plan.clear();
                plan.save(store.storage_mut(), session.id)?;
                println!("Cleared the meal plan");
                Ok(())
            }
            PlanSubcommand::ShoppingList => {
                let catalog = Catalog::builtin()?;
                match plan.shopping_list(&catalog) {
                    Ok(items) if items.is_empty() => {
                        println!("Your planned meals have no catalog ingredients");
                    }
                    Ok(items) => {
                        println!("Shopping list ({} items)\n", items.len());
                        for item in items {
                            println!("  [ ] {}", item);
                        }
                    }
                    Err(PlanError::NothingPlanned) => {
                        println!("Nothing planned yet. Add meals with 'platejoy plan add'.");
                    }
                    Err(e) => return Err(e.into()),
                }
                Ok(())
            }
        }
    }
}
