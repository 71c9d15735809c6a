//! Blog service: entry operations and session transitions.

use crate::domain::{AuthState, Entry, EntryId, SessionState};
use crate::error::FlaskrError;
use crate::persistence::EntryStore;

use super::Credentials;

/// Flash shown after a successful post.
pub const FLASH_POSTED: &str = "New entry was successfully posted";
/// Flash shown after a successful delete.
pub const FLASH_DELETED: &str = "The entry was deleted.";
/// Flash shown after login.
pub const FLASH_LOGGED_IN: &str = "You were logged in";
/// Flash shown after logout.
pub const FLASH_LOGGED_OUT: &str = "You were logged out";

/// Orchestration layer for every user-visible operation.
///
/// Owns the [`EntryStore`] and the configured [`Credentials`]. Session
/// state is never stored here; each call receives the caller's
/// [`SessionState`] and applies the transition and flash to it.
#[derive(Debug, Clone)]
pub struct BlogService {
    store: EntryStore,
    credentials: Credentials,
}

impl BlogService {
    /// Creates a new `BlogService`.
    #[must_use]
    pub fn new(store: EntryStore, credentials: Credentials) -> Self {
        Self { store, credentials }
    }

    /// All entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] on database failure.
    pub async fn list(&self) -> Result<Vec<Entry>, FlaskrError> {
        self.store.list().await
    }

    /// Entries matching `query`, or all entries when it is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] on database failure.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<Entry>, FlaskrError> {
        let entries = self.store.find_by_text_contains(query).await?;
        tracing::debug!(query, hits = entries.len(), "search");
        Ok(entries)
    }

    /// Posts a new entry on behalf of a logged-in session.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Unauthorized`] for an anonymous session and
    /// [`FlaskrError::Storage`] on database failure.
    pub async fn add_entry(
        &self,
        session: &mut SessionState,
        title: &str,
        text: &str,
    ) -> Result<EntryId, FlaskrError> {
        ensure_logged_in(session)?;
        let id = self.store.add(title, text).await?;
        session.flash(FLASH_POSTED);
        tracing::info!(%id, "entry posted");
        Ok(id)
    }

    /// Deletes an entry on behalf of a logged-in session.
    ///
    /// Deleting an id that does not exist succeeds; the return value is
    /// the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Unauthorized`] for an anonymous session and
    /// [`FlaskrError::Storage`] on database failure.
    pub async fn delete_entry(
        &self,
        session: &mut SessionState,
        id: EntryId,
    ) -> Result<u64, FlaskrError> {
        ensure_logged_in(session)?;
        let removed = self.store.delete_by_id(id).await?;
        session.flash(FLASH_DELETED);
        tracing::info!(%id, removed, "entry deleted");
        Ok(removed)
    }

    /// Checks the credentials and marks the session as logged in.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::InvalidUsername`] or
    /// [`FlaskrError::InvalidPassword`]; the session is left unchanged.
    pub fn login(
        &self,
        session: &mut SessionState,
        username: &str,
        password: &str,
    ) -> Result<(), FlaskrError> {
        if let Err(err) = self.credentials.verify(username, password) {
            tracing::info!(reason = %err, "login rejected");
            return Err(err);
        }
        session.log_in();
        session.flash(FLASH_LOGGED_IN);
        tracing::info!("login");
        Ok(())
    }

    /// Clears the logged-in flag. Succeeds for anonymous sessions too.
    pub fn logout(&self, session: &mut SessionState) {
        session.log_out();
        session.flash(FLASH_LOGGED_OUT);
        tracing::info!("logout");
    }
}

fn ensure_logged_in(session: &SessionState) -> Result<(), FlaskrError> {
    match session.auth_state() {
        AuthState::Authenticated => Ok(()),
        AuthState::Anonymous => Err(FlaskrError::Unauthorized),
    }
}
