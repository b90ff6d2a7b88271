//! PlateJoy Core Library
//!
//! Accounts and sessions, the recipe catalog and the weekly meal planner,
//! all persisted through a local key-value medium.

pub mod account_store;
pub mod catalog;
pub mod dashboard;
pub mod models;
pub mod planner;
pub mod storage;

pub use account_store::{AccountError, AccountStore, DEFAULT_AUTH_DELAY};
pub use catalog::{Catalog, CategoryFilter, Favorites, CATEGORIES};
pub use dashboard::{Dashboard, Stats, TodayMeal};
pub use models::{
    Account, Credential, Day, Difficulty, MealType, NewAccount, Nutrition, ProfilePatch, Recipe,
    Session, COMMON_ALLERGIES, DIETARY_OPTIONS,
};
pub use planner::{PlanError, PlannedMeal, PlannedSlot, WeekPlan};
pub use storage::{BatchOp, FileStore, KeyValueStore, MemoryStore, StorageError, StorageKey};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
