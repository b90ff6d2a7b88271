use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Nutrition per serving. Macros are in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl fmt::Display for Nutrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cal, {}g protein, {}g carbs, {}g fat",
            self.calories, self.protein, self.carbs, self.fat
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    pub cook_time: u32, // minutes
    pub servings: u32,
    pub difficulty: Difficulty,
    pub rating: f32,
    pub categories: Vec<String>,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: Nutrition,
}

impl Recipe {
    /// Case-insensitive match against the name or any ingredient.
    /// An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(&term))
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "Time: {} min", self.cook_time)?;
        writeln!(f, "Servings: {}", self.servings)?;
        writeln!(f, "Difficulty: {}", self.difficulty)?;
        writeln!(f, "Rating: {:.1}", self.rating)?;

        if !self.categories.is_empty() {
            writeln!(f, "Categories: {}", self.categories.join(", "))?;
        }

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:")?;
            for (step, instruction) in self.instructions.iter().enumerate() {
                writeln!(f, "  {}. {}", step + 1, instruction)?;
            }
        }

        writeln!(f, "\nNutrition (per serving): {}", self.nutrition)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast() -> Recipe {
        Recipe {
            id: 5,
            name: "Avocado Toast Supreme".to_string(),
            cook_time: 8,
            servings: 2,
            difficulty: Difficulty::Easy,
            rating: 4.5,
            categories: vec!["Vegetarian".into(), "Breakfast".into()],
            description: "Elevated avocado toast.".to_string(),
            ingredients: vec!["2 slices sourdough bread".into(), "1 large ripe avocado".into()],
            instructions: vec!["Toast bread.".into(), "Spread avocado.".into()],
            nutrition: Nutrition {
                calories: 280,
                protein: 8,
                carbs: 32,
                fat: 14,
            },
        }
    }

    #[test]
    fn test_matches_search_name_and_ingredients() {
        let recipe = toast();
        assert!(recipe.matches_search("avocado"));
        assert!(recipe.matches_search("SOURDOUGH"));
        assert!(recipe.matches_search(""));
        assert!(!recipe.matches_search("salmon"));
    }

    #[test]
    fn test_has_category_is_exact() {
        let recipe = toast();
        assert!(recipe.has_category("Vegetarian"));
        assert!(!recipe.has_category("vegetarian"));
        assert!(!recipe.has_category("Vegan"));
    }

    #[test]
    fn test_recipe_display() {
        let output = format!("{}", toast());
        assert!(output.contains("Avocado Toast Supreme"));
        assert!(output.contains("Time: 8 min"));
        assert!(output.contains("  1. Toast bread."));
        assert!(output.contains("280 cal, 8g protein"));
    }
}
