//! Dashboard summary for the logged-in account.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::catalog::{Catalog, Favorites};
use crate::models::{Day, MealType, Recipe, Session};
use crate::planner::WeekPlan;

const QUOTES: &[&str] = &[
    "Let food be thy medicine and medicine be thy food. - Hippocrates",
    "Cooking is love made visible. - Author Unknown",
    "The groundwork for all happiness is good health. - Leigh Hunt",
    "Take care of your body. It's the only place you have to live. - Jim Rohn",
    "A recipe has no soul. You, as the cook, must bring soul to the recipe. - Thomas Keller",
];

/// Number of featured recipes shown.
const FEATURED_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayMeal {
    pub meal_type: MealType,
    pub name: String,
    pub cook_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub meals_planned: usize,
    /// Average over planned meals with a known cook time.
    pub avg_cook_minutes: Option<u32>,
    pub favorite_recipes: usize,
    pub dietary_preferences: usize,
    pub allergies: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub name: String,
    pub date: NaiveDate,
    pub today: Day,
    pub todays_meals: Vec<TodayMeal>,
    pub stats: Stats,
    pub featured: Vec<Recipe>,
    pub quote: &'static str,
}

impl Dashboard {
    pub fn build(
        session: &Session,
        plan: &WeekPlan,
        favorites: &Favorites,
        catalog: &Catalog,
        date: NaiveDate,
    ) -> Self {
        let today = Day::of(date);

        let todays_meals = plan
            .day(today)
            .into_iter()
            .map(|slot| TodayMeal {
                meal_type: slot.meal_type,
                name: slot.meal.name.clone(),
                cook_time: slot.meal.cook_time.clone(),
            })
            .collect();

        let planned = plan.planned_meals();
        let minutes: Vec<u64> = planned
            .iter()
            .filter_map(|slot| slot.meal.cook_minutes())
            .map(u64::from)
            .collect();
        // The average never exceeds the largest u32 input.
        let avg_cook_minutes = if minutes.is_empty() {
            None
        } else {
            let avg = minutes.iter().sum::<u64>() / minutes.len() as u64;
            Some(u32::try_from(avg).unwrap_or(u32::MAX))
        };

        let stats = Stats {
            meals_planned: planned.len(),
            avg_cook_minutes,
            favorite_recipes: favorites.len(),
            dietary_preferences: session.dietary_preferences.len(),
            allergies: session.allergies.len(),
        };

        Self {
            name: session.name.clone(),
            date,
            today,
            todays_meals,
            stats,
            featured: catalog
                .featured(FEATURED_COUNT)
                .into_iter()
                .cloned()
                .collect(),
            quote: quote_for(date),
        }
    }
}

/// One quote per calendar day, cycling through the list.
fn quote_for(date: NaiveDate) -> &'static str {
    QUOTES[date.ordinal0() as usize % QUOTES.len()]
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome back, {}!", self.name)?;
        writeln!(f, "\"{}\"", self.quote)?;

        writeln!(f, "\nToday ({}, {})", self.today, self.date)?;
        if self.todays_meals.is_empty() {
            writeln!(f, "  Nothing planned. Try 'platejoy plan add'.")?;
        }
        for meal in &self.todays_meals {
            match &meal.cook_time {
                Some(time) => writeln!(f, "  {:<10} {} ({})", meal.meal_type, meal.name, time)?,
                None => writeln!(f, "  {:<10} {}", meal.meal_type, meal.name)?,
            }
        }

        writeln!(f, "\nThis week")?;
        writeln!(f, "  Meals planned:    {}", self.stats.meals_planned)?;
        match self.stats.avg_cook_minutes {
            Some(avg) => writeln!(f, "  Avg prep time:    {} min", avg)?,
            None => writeln!(f, "  Avg prep time:    -")?,
        }
        writeln!(f, "  Favorite recipes: {}", self.stats.favorite_recipes)?;
        writeln!(
            f,
            "  Preferences:      {} dietary, {} allergies",
            self.stats.dietary_preferences, self.stats.allergies
        )?;

        if !self.featured.is_empty() {
            writeln!(f, "\nFeatured recipes")?;
            for recipe in &self.featured {
                writeln!(
                    f,
                    "  {:>2}. {} ({} min, {} cal)",
                    recipe.id, recipe.name, recipe.cook_time, recipe.nutrition.calories
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, NewAccount};
    use crate::planner::PlannedMeal;

    fn session() -> Session {
        Account::new(
            NewAccount::new("Alice", "alice@x.com", "pw")
                .with_dietary_preferences(vec!["Vegan".into(), "Keto".into()]),
        )
        .session()
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_empty_dashboard() {
        let catalog = Catalog::builtin().unwrap();
        let dashboard = Dashboard::build(
            &session(),
            &WeekPlan::new(),
            &Favorites::default(),
            &catalog,
            wednesday(),
        );

        assert_eq!(dashboard.name, "Alice");
        assert_eq!(dashboard.today, Day::Wednesday);
        assert!(dashboard.todays_meals.is_empty());
        assert_eq!(dashboard.stats.meals_planned, 0);
        assert_eq!(dashboard.stats.avg_cook_minutes, None);
        assert_eq!(dashboard.stats.dietary_preferences, 2);
        assert_eq!(dashboard.stats.allergies, 0);
        assert_eq!(dashboard.featured.len(), 3);
    }

    #[test]
    fn test_dashboard_with_plan() {
        let catalog = Catalog::builtin().unwrap();
        let mut plan = WeekPlan::new();
        plan.assign(
            Day::Wednesday,
            MealType::Dinner,
            PlannedMeal::from_recipe(catalog.get(6).unwrap()),
        );
        plan.assign(
            Day::Wednesday,
            MealType::Breakfast,
            PlannedMeal::from_recipe(catalog.get(4).unwrap()),
        );
        plan.assign(
            Day::Friday,
            MealType::Lunch,
            PlannedMeal::custom("Leftovers", None, None).unwrap(),
        );
        let mut favorites = Favorites::default();
        favorites.toggle(1);

        let dashboard = Dashboard::build(&session(), &plan, &favorites, &catalog, wednesday());

        let today: Vec<(MealType, &str)> = dashboard
            .todays_meals
            .iter()
            .map(|m| (m.meal_type, m.name.as_str()))
            .collect();
        assert_eq!(
            today,
            vec![
                (MealType::Breakfast, "Green Smoothie Bowl"),
                (MealType::Dinner, "Chicken Stir Fry"),
            ]
        );
        assert_eq!(dashboard.stats.meals_planned, 3);
        // (18 + 10) / 2; the custom meal has no cook time
        assert_eq!(dashboard.stats.avg_cook_minutes, Some(14));
        assert_eq!(dashboard.stats.favorite_recipes, 1);
    }

    #[test]
    fn test_average_of_huge_cook_times() {
        let catalog = Catalog::builtin().unwrap();
        let mut plan = WeekPlan::new();
        for meal_type in MealType::ALL.into_iter().take(2) {
            plan.assign(
                Day::Monday,
                meal_type,
                PlannedMeal::custom("Slow roast", Some("4000000000 min"), None).unwrap(),
            );
        }

        let dashboard = Dashboard::build(
            &session(),
            &plan,
            &Favorites::default(),
            &catalog,
            wednesday(),
        );
        assert_eq!(dashboard.stats.avg_cook_minutes, Some(4_000_000_000));
    }

    #[test]
    fn test_quote_cycles_by_day() {
        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let jan6 = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();

        assert_eq!(quote_for(jan1), QUOTES[0]);
        assert_eq!(quote_for(jan2), QUOTES[1]);
        assert_eq!(quote_for(jan6), QUOTES[0]);
    }

    #[test]
    fn test_dashboard_display() {
        let catalog = Catalog::builtin().unwrap();
        let dashboard = Dashboard::build(
            &session(),
            &WeekPlan::new(),
            &Favorites::default(),
            &catalog,
            wednesday(),
        );

        let output = format!("{}", dashboard);
        assert!(output.contains("Welcome back, Alice!"));
        assert!(output.contains("Today (Wednesday, 2025-01-01)"));
        assert!(output.contains("Nothing planned"));
        assert!(output.contains("Grilled Salmon Delight"));
    }
}
