//! Local account store and session model.
//!
//! The store owns the account collection and the current session, and writes
//! both through a [`KeyValueStore`]. Consumers receive the store explicitly.
//!
//! # Session States
//!
//! 1. **Absent** - nobody is logged in (initial state)
//! 2. **Active** - a session projection of exactly one account
//!
//! `register` and `authenticate` move Absent → Active, `terminate_session`
//! moves Active → Absent and `update_profile` keeps Active with new field
//! values. On open the store rehydrates the persisted session, if any.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

use crate::models::{Account, NewAccount, ProfilePatch, Session};
use crate::storage::{encode_json, read_json, BatchOp, KeyValueStore, StorageError, StorageKey};

/// Artificial latency of `register` and `authenticate`.
pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);

/// Errors that can occur during account operations.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Registration conflict: the email already belongs to an account.
    #[error("An account with email '{0}' already exists")]
    EmailTaken(String),

    /// No account matches the email and secret. Unknown email and wrong
    /// secret are not told apart.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Account store over a durable key-value medium.
#[derive(Debug)]
pub struct AccountStore<S: KeyValueStore> {
    storage: S,
    session: Option<Session>,
    auth_delay: Duration,
    loading: Arc<watch::Sender<bool>>,
}

impl<S: KeyValueStore> AccountStore<S> {
    /// Opens the store and rehydrates the persisted session.
    ///
    /// Returns an error if the persisted session is unreadable.
    pub fn open(storage: S) -> Result<Self, AccountError> {
        let (loading, _) = watch::channel(true);
        let loading = Arc::new(loading);

        let session: Option<Session> = read_json(&storage, &StorageKey::CurrentSession)?;
        match &session {
            Some(s) => tracing::info!("Restored session for {}", s.email),
            None => tracing::debug!("No persisted session"),
        }
        loading.send_replace(false);

        Ok(Self {
            storage,
            session,
            auth_delay: DEFAULT_AUTH_DELAY,
            loading,
        })
    }

    /// Sets the artificial latency of `register` and `authenticate`.
    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.auth_delay = delay;
        self
    }

    /// The logged-in account, if any.
    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// True while a `register` or `authenticate` call is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Subscribes to changes of the loading flag.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Every registered account.
    pub fn accounts(&self) -> Result<Vec<Account>, AccountError> {
        Ok(read_json(&self.storage, &StorageKey::AccountCollection)?.unwrap_or_default())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Registers a new account and logs it in.
    ///
    /// Fails with [`AccountError::EmailTaken`] if the email (compared
    /// exactly) is already registered; nothing is written in that case.
    pub async fn register(&mut self, candidate: NewAccount) -> Result<Session, AccountError> {
        let _loading = LoadingGuard::raise(&self.loading);
        tokio::time::sleep(self.auth_delay).await;
        self.register_now(candidate)
    }

    /// Logs in the account whose email and secret both match.
    pub async fn authenticate(
        &mut self,
        email: &str,
        secret: &str,
    ) -> Result<Session, AccountError> {
        let _loading = LoadingGuard::raise(&self.loading);
        tokio::time::sleep(self.auth_delay).await;
        self.authenticate_now(email, secret)
    }

    /// Logs out. Does nothing if nobody is logged in.
    pub fn terminate_session(&mut self) -> Result<(), AccountError> {
        self.storage.remove(&StorageKey::CurrentSession)?;
        if let Some(session) = self.session.take() {
            tracing::info!("Logged out {}", session.email);
        }
        Ok(())
    }

    /// Applies a patch to the session and to the matching account.
    ///
    /// Returns `Ok(false)` without writing anything if nobody is logged in.
    /// The email is not checked for uniqueness here.
    pub fn update_profile(&mut self, patch: ProfilePatch) -> Result<bool, AccountError> {
        let Some(current) = &self.session else {
            return Ok(false);
        };

        let mut session = current.clone();
        session.apply(&patch);

        let mut accounts = self.accounts()?;
        match accounts.iter_mut().find(|a| a.id == session.id) {
            Some(account) => account.apply(&patch),
            None => tracing::warn!("Session {} has no matching account", session.id),
        }

        self.storage.write_batch(vec![
            BatchOp::Set(
                StorageKey::CurrentSession,
                encode_json(&StorageKey::CurrentSession, &session)?,
            ),
            BatchOp::Set(
                StorageKey::AccountCollection,
                encode_json(&StorageKey::AccountCollection, &accounts)?,
            ),
        ])?;

        tracing::info!("Updated profile of {}", session.email);
        self.session = Some(session);
        Ok(true)
    }

    fn register_now(&mut self, candidate: NewAccount) -> Result<Session, AccountError> {
        let mut accounts = self.accounts()?;

        if accounts.iter().any(|a| a.email == candidate.email) {
            tracing::info!("Rejected registration for taken email {}", candidate.email);
            return Err(AccountError::EmailTaken(candidate.email));
        }

        let account = Account::new(candidate);
        let session = account.session();
        accounts.push(account);

        self.storage.write_batch(vec![
            BatchOp::Set(
                StorageKey::AccountCollection,
                encode_json(&StorageKey::AccountCollection, &accounts)?,
            ),
            BatchOp::Set(
                StorageKey::CurrentSession,
                encode_json(&StorageKey::CurrentSession, &session)?,
            ),
        ])?;

        tracing::info!("Registered {} ({} account(s))", session.email, accounts.len());
        self.session = Some(session.clone());
        Ok(session)
    }

    fn authenticate_now(&mut self, email: &str, secret: &str) -> Result<Session, AccountError> {
        let accounts = self.accounts()?;

        let Some(account) = accounts
            .iter()
            .find(|a| a.email == email && a.credential.verify(secret))
        else {
            tracing::warn!("Failed login for {}", email);
            return Err(AccountError::InvalidCredentials);
        };

        let session = account.session();
        let raw = encode_json(&StorageKey::CurrentSession, &session)?;
        self.storage.set(&StorageKey::CurrentSession, &raw)?;

        tracing::info!("Logged in {}", session.email);
        self.session = Some(session.clone());
        Ok(session)
    }
}

/// Holds the loading flag up until dropped, including when the
/// operation future is dropped mid-delay.
struct LoadingGuard {
    loading: Arc<watch::Sender<bool>>,
}

impl LoadingGuard {
    fn raise(loading: &Arc<watch::Sender<bool>>) -> Self {
        loading.send_replace(true);
        Self {
            loading: Arc::clone(loading),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.loading.send_replace(false);
    }
}
