//! Recipe catalog, search filtering and per-account favorites.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::Recipe;
use crate::storage::{read_json, write_json, KeyValueStore, StorageError, StorageKey};

const BUILTIN_RECIPES: &str = include_str!("../data/recipes.json");

/// Categories offered by the recipe browser, "All" first.
pub const CATEGORIES: &[&str] = &[
    "All",
    "Vegetarian",
    "Vegan",
    "Seafood",
    "High Protein",
    "Quick",
    "Healthy",
    "Keto",
];

/// Category selection for [`Catalog::filter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => recipe.has_category(category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    /// Resolves a name against [`CATEGORIES`] ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = CATEGORIES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}'. Valid options: {}",
                    s,
                    CATEGORIES.join(", ")
                )
            })?;

        if *known == "All" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(known.to_string()))
        }
    }
}

/// A read-only collection of recipes.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        let recipes: Vec<Recipe> = serde_json::from_str(BUILTIN_RECIPES)?;
        Ok(Self::new(recipes))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Looks up a recipe by id, or by name ignoring case.
    pub fn find(&self, identifier: &str) -> Option<&Recipe> {
        match identifier.parse::<u32>() {
            Ok(id) => self.get(id),
            Err(_) => self
                .recipes
                .iter()
                .find(|r| r.name.eq_ignore_ascii_case(identifier.trim())),
        }
    }

    /// Recipes matching both the search term and the category, in catalog order.
    pub fn filter(&self, search: &str, category: &CategoryFilter) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.matches_search(search) && category.matches(r))
            .collect()
    }

    /// The `count` best rated recipes. Equal ratings keep the lower id first.
    pub fn featured(&self, count: usize) -> Vec<&Recipe> {
        let mut ranked: Vec<&Recipe> = self.recipes.iter().collect();
        ranked.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        ranked.truncate(count);
        ranked
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Favorite recipe ids of one account, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    recipe_ids: Vec<u32>,
}

impl Favorites {
    /// Loads the favorites of an account; an account without any starts empty.
    pub fn load<S: KeyValueStore + ?Sized>(
        storage: &S,
        account_id: Uuid,
    ) -> Result<Self, StorageError> {
        Ok(read_json(storage, &StorageKey::Favorites(account_id))?.unwrap_or_default())
    }

    pub fn save<S: KeyValueStore + ?Sized>(
        &self,
        storage: &mut S,
        account_id: Uuid,
    ) -> Result<(), StorageError> {
        write_json(storage, &StorageKey::Favorites(account_id), self)
    }

    /// Adds the recipe if absent, removes it otherwise.
    /// Returns true if the recipe is a favorite afterwards.
    pub fn toggle(&mut self, recipe_id: u32) -> bool {
        if self.contains(recipe_id) {
            self.recipe_ids.retain(|id| *id != recipe_id);
            false
        } else {
            self.recipe_ids.push(recipe_id);
            true
        }
    }

    pub fn contains(&self, recipe_id: u32) -> bool {
        self.recipe_ids.contains(&recipe_id)
    }

    pub fn ids(&self) -> &[u32] {
        &self.recipe_ids
    }

    pub fn len(&self) -> usize {
        self.recipe_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn names(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get(1).unwrap().name, "Rainbow Buddha Bowl");
        assert_eq!(catalog.get(6).unwrap().name, "Chicken Stir Fry");
        assert!(catalog.get(7).is_none());
    }

    #[test]
    fn test_filter_everything() {
        let catalog = catalog();
        assert_eq!(catalog.filter("", &CategoryFilter::All).len(), 6);
    }

    #[test]
    fn test_filter_by_search_matches_ingredients() {
        let catalog = catalog();
        let found = catalog.filter("quinoa", &CategoryFilter::All);
        assert_eq!(
            names(&found),
            vec!["Rainbow Buddha Bowl", "Grilled Salmon Delight"]
        );
    }

    #[test]
    fn test_filter_by_search_is_case_insensitive() {
        let catalog = catalog();
        let found = catalog.filter("SALMON", &CategoryFilter::All);
        assert_eq!(names(&found), vec!["Grilled Salmon Delight"]);
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = catalog();
        let found = catalog.filter("", &CategoryFilter::Only("Quick".to_string()));
        assert_eq!(
            names(&found),
            vec![
                "Garden Fresh Pasta",
                "Avocado Toast Supreme",
                "Chicken Stir Fry"
            ]
        );
    }

    #[test]
    fn test_filter_combines_search_and_category() {
        let catalog = catalog();
        let found = catalog.filter("avocado", &CategoryFilter::Only("Vegan".to_string()));
        assert_eq!(names(&found), vec!["Green Smoothie Bowl"]);

        let none = catalog.filter("salmon", &CategoryFilter::Only("Vegan".to_string()));
        assert!(none.is_empty());
    }

    #[test]
    fn test_category_filter_from_str() {
        assert_eq!(
            CategoryFilter::from_str("all").unwrap(),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::from_str("high protein").unwrap(),
            CategoryFilter::Only("High Protein".to_string())
        );
        assert!(CategoryFilter::from_str("Dessert").is_err());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let catalog = catalog();
        assert_eq!(catalog.find("3").unwrap().name, "Garden Fresh Pasta");
        assert_eq!(catalog.find("chicken stir fry").unwrap().id, 6);
        assert!(catalog.find("Pizza").is_none());
    }

    #[test]
    fn test_featured_orders_by_rating_then_id() {
        let catalog = catalog();
        let featured = catalog.featured(3);
        let ids: Vec<u32> = featured.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 6]);
    }

    #[test]
    fn test_favorites_toggle() {
        let mut favorites = Favorites::default();

        assert!(favorites.toggle(3));
        assert!(favorites.toggle(1));
        assert_eq!(favorites.ids(), &[3, 1]);

        assert!(!favorites.toggle(3));
        assert_eq!(favorites.ids(), &[1]);
        assert!(!favorites.contains(3));
    }

    #[test]
    fn test_favorites_persist_per_account() {
        let mut storage = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut favorites = Favorites::load(&storage, alice).unwrap();
        assert!(favorites.is_empty());
        favorites.toggle(2);
        favorites.save(&mut storage, alice).unwrap();

        assert_eq!(Favorites::load(&storage, alice).unwrap().ids(), &[2]);
        assert!(Favorites::load(&storage, bob).unwrap().is_empty());
    }
}
