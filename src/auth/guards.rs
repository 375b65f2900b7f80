//! Protected page guard. Runs once per mount: no token means an immediate
//! redirect to `/login`; a token is checked with `GET /me`, and any failure
//! clears the session and redirects.
//!
//! UX-only guard; real access control must live on the API.

use crate::{
    app::routes::{NavigateOptions, Navigator, Route},
    auth::{client::AuthClient, session, storage::SessionStore, types::UserRecord},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum GuardState {
    /// Validation in progress; content is withheld.
    Checking,
    Authorized(UserRecord),
    Redirecting,
}

pub struct SessionGuard {
    client: Arc<AuthClient>,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<GuardState>,
}

impl SessionGuard {
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
            state: Mutex::new(GuardState::Checking),
        }
    }

    fn state_mut(&self) -> MutexGuard<'_, GuardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state_mut().clone()
    }

    /// Decides whether the protected page may render and returns the final state.
    #[instrument(skip_all)]
    pub async fn mount(&self) -> GuardState {
        *self.state_mut() = GuardState::Checking;

        let token = match session::access_token(self.store.as_ref()) {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no stored access token");
                return self.redirect();
            }
            Err(err) => {
                warn!("cannot read session storage: {err}");
                return self.redirect();
            }
        };

        match self.client.me(&token).await {
            Ok(user) => {
                info!("session validated");
                let state = GuardState::Authorized(user);
                *self.state_mut() = state.clone();
                state
            }
            Err(err) => {
                warn!(status = ?err.status(), "session rejected: {err}");
                if let Err(err) = session::invalidate(self.store.as_ref()) {
                    warn!("failed to clear session storage: {err}");
                }
                self.redirect()
            }
        }
    }

    fn redirect(&self) -> GuardState {
        *self.state_mut() = GuardState::Redirecting;
        self.navigator.navigate(Route::Login, NavigateOptions::replace());
        GuardState::Redirecting
    }
}
