use clap::{Args, Subcommand};

use platejoy_core::{Catalog, CategoryFilter, Favorites, CATEGORIES};

use super::{require_session, OutputFormat, Store};

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// List recipes
    List {
        /// Match against recipe names and ingredients
        #[arg(long, short, default_value = "")]
        search: String,

        /// Only show recipes in this category
        #[arg(long, default_value = "All")]
        category: CategoryFilter,

        /// Only show your favorites
        #[arg(long)]
        favorites: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe by id or name
    Show {
        /// Recipe id or name
        recipe: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a recipe to your favorites, or remove it if it is one already
    Favorite {
        /// Recipe id or name
        recipe: String,
    },

    /// List recipe categories
    Categories,
}

impl RecipeCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        let catalog = Catalog::builtin()?;

        match &self.command {
            RecipeSubcommand::List {
                search,
                category,
                favorites,
                format,
            } => {
                if *favorites {
                    require_session(store)?;
                }
                let favorite_ids = match store.current_session() {
                    Some(session) => Favorites::load(store.storage(), session.id)?,
                    None => Favorites::default(),
                };

                let recipes: Vec<_> = catalog
                    .filter(search, category)
                    .into_iter()
                    .filter(|r| !*favorites || favorite_ids.contains(r.id))
                    .collect();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        if recipes.is_empty() {
                            println!("No recipes found");
                        } else {
                            println!(
                                "{:<4} {:<28} {:<8} {:<8} {:<6} CATEGORIES",
                                "ID", "NAME", "TIME", "LEVEL", "RATING"
                            );
                            println!("{}", "-".repeat(80));
                            for recipe in recipes {
                                let marker = if favorite_ids.contains(recipe.id) { "*" } else { "" };
                                println!(
                                    "{:<4} {:<28} {:<8} {:<8} {:<6.1} {}",
                                    format!("{}{}", recipe.id, marker),
                                    truncate(&recipe.name, 28),
                                    format!("{} min", recipe.cook_time),
                                    recipe.difficulty.to_string(),
                                    recipe.rating,
                                    recipe.categories.join(", ")
                                );
                            }
                        }
                    }
                }
                Ok(())
            }
            RecipeSubcommand::Show { recipe, format } => {
                let recipe = catalog
                    .find(recipe)
                    .ok_or_else(|| format!("Recipe not found: {}", recipe))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipe)?);
                    }
                    OutputFormat::Text => print!("{}", recipe),
                }
                Ok(())
            }
            RecipeSubcommand::Favorite { recipe } => {
                let session = require_session(store)?;
                let recipe = catalog
                    .find(recipe)
                    .ok_or_else(|| format!("Recipe not found: {}", recipe))?;

                let mut favorites = Favorites::load(store.storage(), session.id)?;
                let added = favorites.toggle(recipe.id);
                favorites.save(store.storage_mut(), session.id)?;

                if added {
                    println!("Added '{}' to favorites", recipe.name);
                } else {
                    println!("Removed '{}' from favorites", recipe.name);
                }
                Ok(())
            }
            RecipeSubcommand::Categories => {
                for category in CATEGORIES {
                    println!("{}", category);
                }
                Ok(())
            }
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}
