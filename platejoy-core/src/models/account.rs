use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::credential::Credential;

/// Dietary preference labels offered by the profile editor.
pub const DIETARY_OPTIONS: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "Keto",
    "Paleo",
    "Low Carb",
    "Mediterranean",
    "Pescatarian",
    "Raw Food",
];

/// Allergy labels offered by the profile editor.
pub const COMMON_ALLERGIES: &[&str] = &[
    "Nuts",
    "Peanuts",
    "Shellfish",
    "Fish",
    "Eggs",
    "Dairy",
    "Soy",
    "Wheat",
    "Sesame",
    "Sulfites",
];

/// Drops duplicate labels, keeping the first occurrence of each.
pub fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !unique.contains(&label) {
            unique.push(label);
        }
    }
    unique
}

/// A registered account, as persisted in the account collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub credential: Credential,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates an account from a registration candidate with a fresh id.
    pub fn new(candidate: NewAccount) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: candidate.name,
            email: candidate.email,
            credential: Credential::new(&candidate.secret),
            dietary_preferences: dedup_labels(candidate.dietary_preferences),
            allergies: dedup_labels(candidate.allergies),
            created_at: Utc::now(),
        }
    }

    /// Returns the session projection of this account.
    pub fn session(&self) -> Session {
        Session {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            dietary_preferences: self.dietary_preferences.clone(),
            allergies: self.allergies.clone(),
        }
    }

    pub fn apply(&mut self, patch: &ProfilePatch) {
        patch.merge(
            &mut self.name,
            &mut self.email,
            &mut self.dietary_preferences,
            &mut self.allergies,
        );
    }
}

/// The logged-in view of an account. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl Session {
    pub fn apply(&mut self, patch: &ProfilePatch) {
        patch.merge(
            &mut self.name,
            &mut self.email,
            &mut self.dietary_preferences,
            &mut self.allergies,
        );
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Member ID: {}", self.id)?;

        if self.dietary_preferences.is_empty() {
            writeln!(f, "\nDietary preferences: none set")?;
        } else {
            writeln!(
                f,
                "\nDietary preferences: {}",
                self.dietary_preferences.join(", ")
            )?;
        }

        if self.allergies.is_empty() {
            writeln!(f, "Allergies: none listed")?;
        } else {
            writeln!(f, "Allergies: {}", self.allergies.join(", "))?;
        }

        Ok(())
    }
}

/// A registration candidate.
#[derive(Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub secret: String,
    pub dietary_preferences: Vec<String>,
    pub allergies: Vec<String>,
}

impl NewAccount {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            secret: secret.into(),
            dietary_preferences: Vec::new(),
            allergies: Vec::new(),
        }
    }

    pub fn with_dietary_preferences(mut self, preferences: Vec<String>) -> Self {
        self.dietary_preferences = preferences;
        self
    }

    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = allergies;
        self
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("dietary_preferences", &self.dietary_preferences)
            .field("allergies", &self.allergies)
            .finish_non_exhaustive()
    }
}

/// Partial profile update. Present fields replace the current value,
/// absent fields leave it alone. The secret cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dietary_preferences: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn dietary_preferences(mut self, preferences: Vec<String>) -> Self {
        self.dietary_preferences = Some(preferences);
        self
    }

    pub fn allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = Some(allergies);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.dietary_preferences.is_none()
            && self.allergies.is_none()
    }

    fn merge(
        &self,
        name: &mut String,
        email: &mut String,
        dietary_preferences: &mut Vec<String>,
        allergies: &mut Vec<String>,
    ) {
        if let Some(value) = &self.name {
            *name = value.clone();
        }
        if let Some(value) = &self.email {
            *email = value.clone();
        }
        if let Some(value) = &self.dietary_preferences {
            *dietary_preferences = dedup_labels(value.clone());
        }
        if let Some(value) = &self.allergies {
            *allergies = dedup_labels(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Account {
        Account::new(
            NewAccount::new("Alice", "alice@x.com", "secret1")
                .with_dietary_preferences(vec!["Vegan".into()])
                .with_allergies(vec!["Nuts".into()]),
        )
    }

    #[test]
    fn test_dedup_labels_keeps_first_occurrence() {
        let labels = vec![
            "Keto".to_string(),
            "Vegan".to_string(),
            "Keto".to_string(),
            "Paleo".to_string(),
        ];
        assert_eq!(dedup_labels(labels), vec!["Keto", "Vegan", "Paleo"]);
    }

    #[test]
    fn test_new_account() {
        let account = alice();
        assert_eq!(account.name, "Alice");
        assert_eq!(account.email, "alice@x.com");
        assert!(account.credential.verify("secret1"));
        assert_eq!(account.dietary_preferences, vec!["Vegan"]);
        assert_eq!(account.allergies, vec!["Nuts"]);
    }

    #[test]
    fn test_new_accounts_get_distinct_ids() {
        assert_ne!(alice().id, alice().id);
    }

    #[test]
    fn test_session_projection() {
        let account = alice();
        let session = account.session();

        assert_eq!(session.id, account.id);
        assert_eq!(session.name, account.name);
        assert_eq!(session.email, account.email);
        assert_eq!(session.dietary_preferences, account.dietary_preferences);
        assert_eq!(session.allergies, account.allergies);

        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("credential"));
        assert!(!json.contains("secret1"));
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut session = alice().session();
        session.apply(&ProfilePatch::new().name("X"));

        assert_eq!(session.name, "X");
        assert_eq!(session.email, "alice@x.com");
        assert_eq!(session.dietary_preferences, vec!["Vegan"]);
        assert_eq!(session.allergies, vec!["Nuts"]);
    }

    #[test]
    fn test_patch_can_clear_labels() {
        let mut account = alice();
        account.apply(&ProfilePatch::new().allergies(Vec::new()));

        assert!(account.allergies.is_empty());
        assert_eq!(account.dietary_preferences, vec!["Vegan"]);
    }

    #[test]
    fn test_patch_dedups_labels() {
        let mut account = alice();
        account.apply(
            &ProfilePatch::new().dietary_preferences(vec!["Keto".into(), "Keto".into()]),
        );
        assert_eq!(account.dietary_preferences, vec!["Keto"]);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProfilePatch::new().is_empty());
        assert!(!ProfilePatch::new().email("a@b.c").is_empty());
    }

    #[test]
    fn test_new_account_debug_hides_secret() {
        let candidate = NewAccount::new("Alice", "alice@x.com", "secret1");
        assert!(!format!("{:?}", candidate).contains("secret1"));
    }

    #[test]
    fn test_session_display() {
        let output = format!("{}", alice().session());
        assert!(output.contains("Alice"));
        assert!(output.contains("Email: alice@x.com"));
        assert!(output.contains("Dietary preferences: Vegan"));
        assert!(output.contains("Allergies: Nuts"));
    }

    #[test]
    fn test_account_json_roundtrip_keeps_credential() {
        let account = alice();
        let json = serde_json::to_string(&account).unwrap();
        let parsed: Account = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, account.id);
        assert!(parsed.credential.verify("secret1"));
    }
}
