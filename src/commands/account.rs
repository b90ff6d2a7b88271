use clap::Args;
use std::io::{self, Write};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use platejoy_core::NewAccount;

use super::Store;

#[derive(Args)]
pub struct SignupCommand {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Email address used to log in
    #[arg(long)]
    pub email: String,

    /// Password (prompted for if omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Dietary preference (can be repeated)
    #[arg(long = "diet", value_name = "PREFERENCE")]
    pub dietary_preferences: Vec<String>,

    /// Allergy (can be repeated)
    #[arg(long = "allergy", value_name = "ALLERGY")]
    pub allergies: Vec<String>,
}

impl SignupCommand {
    pub async fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        let password = match &self.password {
            Some(p) => p.clone(),
            None => prompt("Password: ")?,
        };
        if password.is_empty() {
            return Err("Password cannot be empty".into());
        }

        let candidate = NewAccount::new(&self.name, &self.email, &password)
            .with_dietary_preferences(self.dietary_preferences.clone())
            .with_allergies(self.allergies.clone());

        let progress = show_progress(store.loading(), "Creating your account...");
        let result = store.register(candidate).await;
        progress.abort();

        let session = result?;
        println!("Welcome to PlateJoy, {}!", session.name);
        println!("Logged in as {}", session.email);
        Ok(())
    }
}

#[derive(Args)]
pub struct LoginCommand {
    /// Email address (prompted for if omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted for if omitted)
    #[arg(long)]
    pub password: Option<String>,
}

impl LoginCommand {
    pub async fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(session) = store.current_session() {
            println!("Already logged in as {}", session.email);
            println!("Run 'platejoy logout' first to switch accounts.");
            return Ok(());
        }

        let email = match &self.email {
            Some(e) => e.clone(),
            None => prompt("Email: ")?,
        };
        let password = match &self.password {
            Some(p) => p.clone(),
            None => prompt("Password: ")?,
        };

        let progress = show_progress(store.loading(), "Signing in...");
        let result = store.authenticate(&email, &password).await;
        progress.abort();

        let session = result?;
        println!("Welcome back, {}!", session.name);
        Ok(())
    }
}

pub fn logout(store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
    match store.current_session().map(|s| s.email.clone()) {
        Some(email) => {
            store.terminate_session()?;
            println!("Logged out {}", email);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

pub fn whoami(store: &Store) {
    match store.current_session() {
        Some(session) => println!("{} <{}>", session.name, session.email),
        None => println!("Not logged in"),
    }
}

/// Prints `message` to stderr each time the loading flag goes up.
fn show_progress(mut loading: watch::Receiver<bool>, message: &'static str) -> JoinHandle<()> {
    tokio::spawn(async move {
        while loading.changed().await.is_ok() {
            if *loading.borrow_and_update() {
                eprintln!("{}", message);
            }
        }
    })
}

fn prompt(label: &str) -> Result<String, io::Error> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
