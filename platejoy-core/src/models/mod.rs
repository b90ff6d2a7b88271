mod account;
mod credential;
mod day;
mod meal_type;
mod recipe;

pub use account::{
    dedup_labels, Account, NewAccount, ProfilePatch, Session, COMMON_ALLERGIES, DIETARY_OPTIONS,
};
pub use credential::Credential;
pub use day::Day;
pub use meal_type::MealType;
pub use recipe::{Difficulty, Nutrition, Recipe};
