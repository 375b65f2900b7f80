//! Login page controller: submits credentials, persists the returned session
//! and navigates to the protected page.
//!
//! State machine: `Idle -> Submitting -> {Succeeded, Failed}`. `Failed` accepts
//! a new submission just like `Idle`; nothing is retried automatically. A
//! submission that arrives while another is in flight is dropped without any
//! network call.

use crate::{
    app::routes::{NavigateOptions, Navigator, Route},
    auth::{
        client::AuthClient,
        session,
        storage::{SessionStore, StorageError},
        types::Credentials,
    },
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Shown for every failed attempt; the cause is only logged.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid credentials or authentication error.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Submitting,
    Succeeded,
    Failed { message: String },
}

impl LoginState {
    /// Message the form should display, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Session stored and navigation to `/` issued.
    LoggedIn,
    /// The attempt failed; the form stays interactive.
    Rejected { message: String },
    /// Another submission is still in flight; this one was ignored.
    InFlight,
}

pub struct LoginController {
    client: Arc<AuthClient>,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<LoginState>,
}

impl LoginController {
    #[must_use]
    pub fn new(
        client: Arc<AuthClient>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            store,
            navigator,
            state: Mutex::new(LoginState::Idle),
        }
    }

    fn state_mut(&self) -> MutexGuard<'_, LoginState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn state(&self) -> LoginState {
        self.state_mut().clone()
    }

    /// Runs one login attempt.
    ///
    /// The store is only written after the identity service accepted the
    /// credentials, so a rejected attempt leaves it untouched.
    #[instrument(skip_all)]
    pub async fn submit(&self, credentials: Credentials) -> SubmitOutcome {
        {
            let mut state = self.state_mut();
            if state.is_submitting() {
                return SubmitOutcome::InFlight;
            }
            // clears any previous error
            *state = LoginState::Submitting;
        }

        let result = match self.client.login(&credentials).await {
            Ok(response) => {
                if let Some(message) = response.message.as_deref() {
                    debug!(reply = message, "login accepted");
                }
                session::persist(self.store.as_ref(), &response)
                    .map_err(|err| warn!("failed to store session: {err}"))
            }
            Err(err) => {
                warn!("login failed: {err}");
                Err(())
            }
        };

        if result.is_ok() {
            *self.state_mut() = LoginState::Succeeded;
            info!("login succeeded");
            self.navigator.navigate(Route::Home, NavigateOptions::replace());
            SubmitOutcome::LoggedIn
        } else {
            let message = LOGIN_FAILED_MESSAGE.to_string();
            *self.state_mut() = LoginState::Failed {
                message: message.clone(),
            };
            SubmitOutcome::Rejected { message }
        }
    }
}

/// Signs out: asks the identity service to revoke the token (best effort),
/// then clears every session key and returns to `/login`.
///
/// # Errors
/// Returns an error only if the session store cannot be cleared.
#[instrument(skip_all)]
pub async fn logout(
    client: &AuthClient,
    store: &dyn SessionStore,
    navigator: &dyn Navigator,
) -> Result<(), StorageError> {
    match session::access_token(store) {
        Ok(Some(token)) => {
            if let Err(err) = client.logout(&token).await {
                warn!("remote logout failed: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => warn!("cannot read session storage: {err}"),
    }

    session::clear(store)?;
    info!("session cleared");
    navigator.navigate(Route::Login, NavigateOptions::replace());
    Ok(())
}
