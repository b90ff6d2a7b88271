//! Weekly meal planner.
//!
//! A plan is a fixed grid of 7 days × 3 meals. Each slot is empty or holds a
//! [`PlannedMeal`], either taken from the recipe catalog or entered by hand.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::{Day, MealType, Recipe};
use crate::storage::{read_json, write_json, KeyValueStore, StorageError, StorageKey};

/// Errors that can occur during planner operations.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Please enter a meal name")]
    EmptyMealName,

    #[error("No meals planned. Add some meals to generate a shopping list")]
    NothingPlanned,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A meal placed in a planner slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub id: Uuid,
    pub name: String,
    /// Free-form duration as entered, e.g. "25 min".
    pub cook_time: Option<String>,
    pub servings: Option<u32>,
    /// Catalog recipe this meal came from, if any.
    pub recipe_id: Option<u32>,
}

impl PlannedMeal {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: recipe.name.clone(),
            cook_time: Some(format!("{} min", recipe.cook_time)),
            servings: Some(recipe.servings),
            recipe_id: Some(recipe.id),
        }
    }

    /// A hand-entered meal. The name must not be blank; a blank cook time
    /// is treated as absent.
    pub fn custom(
        name: &str,
        cook_time: Option<&str>,
        servings: Option<u32>,
    ) -> Result<Self, PlanError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::EmptyMealName);
        }

        let cook_time = cook_time
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            cook_time,
            servings,
            recipe_id: None,
        })
    }

    /// Cook time in minutes, read from the leading number of `cook_time`.
    pub fn cook_minutes(&self) -> Option<u32> {
        let text = self.cook_time.as_deref()?.trim_start();
        let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

impl fmt::Display for PlannedMeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        let details: Vec<String> = [
            self.cook_time.clone(),
            self.servings.map(|s| format!("serves {}", s)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !details.is_empty() {
            write!(f, " ({})", details.join(", "))?;
        }
        Ok(())
    }
}

/// An occupied slot of the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSlot<'a> {
    pub day: Day,
    pub meal_type: MealType,
    pub meal: &'a PlannedMeal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct DayMeals {
    breakfast: Option<PlannedMeal>,
    lunch: Option<PlannedMeal>,
    dinner: Option<PlannedMeal>,
}

impl DayMeals {
    fn slot(&self, meal_type: MealType) -> &Option<PlannedMeal> {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    fn slot_mut(&mut self, meal_type: MealType) -> &mut Option<PlannedMeal> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }
}

/// A weekly plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    days: [DayMeals; 7],
}

impl WeekPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the plan of an account; an account without one starts empty.
    pub fn load<S: KeyValueStore + ?Sized>(
        storage: &S,
        account_id: Uuid,
    ) -> Result<Self, PlanError> {
        Ok(read_json(storage, &StorageKey::WeekPlan(account_id))?.unwrap_or_default())
    }

    pub fn save<S: KeyValueStore + ?Sized>(
        &self,
        storage: &mut S,
        account_id: Uuid,
    ) -> Result<(), PlanError> {
        write_json(storage, &StorageKey::WeekPlan(account_id), self)?;
        Ok(())
    }

    pub fn get(&self, day: Day, meal_type: MealType) -> Option<&PlannedMeal> {
        self.days[day.index()].slot(meal_type).as_ref()
    }

    /// Puts a meal in a slot. Returns the meal it replaced, if any.
    pub fn assign(
        &mut self,
        day: Day,
        meal_type: MealType,
        meal: PlannedMeal,
    ) -> Option<PlannedMeal> {
        self.days[day.index()].slot_mut(meal_type).replace(meal)
    }

    /// Empties a slot. Returns the meal that was there, if any.
    pub fn remove(&mut self, day: Day, meal_type: MealType) -> Option<PlannedMeal> {
        self.days[day.index()].slot_mut(meal_type).take()
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.days = Default::default();
    }

    /// Occupied slots of one day, breakfast first.
    pub fn day(&self, day: Day) -> Vec<PlannedSlot<'_>> {
        MealType::ALL
            .into_iter()
            .filter_map(|meal_type| {
                self.get(day, meal_type).map(|meal| PlannedSlot {
                    day,
                    meal_type,
                    meal,
                })
            })
            .collect()
    }

    /// Every occupied slot, Monday breakfast first.
    pub fn planned_meals(&self) -> Vec<PlannedSlot<'_>> {
        Day::ALL.into_iter().flat_map(|day| self.day(day)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.planned_meals().is_empty()
    }

    /// Ingredients of every planned catalog recipe, without duplicates,
    /// in the order they are first needed. Hand-entered meals contribute
    /// nothing.
    pub fn shopping_list(&self, catalog: &Catalog) -> Result<Vec<String>, PlanError> {
        let planned = self.planned_meals();
        if planned.is_empty() {
            return Err(PlanError::NothingPlanned);
        }

        let mut items: Vec<String> = Vec::new();
        for slot in planned {
            let Some(recipe) = slot.meal.recipe_id.and_then(|id| catalog.get(id)) else {
                continue;
            };
            for ingredient in &recipe.ingredients {
                if !items.contains(ingredient) {
                    items.push(ingredient.clone());
                }
            }
        }

        Ok(items)
    }
}

impl fmt::Display for WeekPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in Day::ALL {
            writeln!(f, "{}", day)?;
            for meal_type in MealType::ALL {
                match self.get(day, meal_type) {
                    Some(meal) => writeln!(f, "  {:<10} {}", meal_type, meal)?,
                    None => writeln!(f, "  {:<10} -", meal_type)?,
                }
            }
        }
        Ok(())
    }
}
