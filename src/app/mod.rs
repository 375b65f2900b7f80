//! Terminal front end: the route loop that renders `/` behind the guard and
//! `/login` with the form, following navigations until the protected page is
//! shown or the form runs out of input.

pub mod form;
pub mod pages;
pub mod routes;

use crate::auth::{
    self, AuthClient, GuardState, LoginController, SessionGuard, SessionStore, StorageError,
    UserRecord,
};
use anyhow::Result;
use form::FormInput;
use routes::{History, Route};
use std::{io::Write, sync::Arc};
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The protected page was rendered for this user.
    Authorized(UserRecord),
    /// The run ended on the login form without a session.
    SignedOut,
}

pub struct App {
    client: Arc<AuthClient>,
    store: Arc<dyn SessionStore>,
    history: Arc<History>,
}

impl App {
    #[must_use]
    pub fn new(client: Arc<AuthClient>, store: Arc<dyn SessionStore>, start: Route) -> Self {
        Self {
            client,
            store,
            history: Arc::new(History::new(start)),
        }
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    fn guard(&self) -> SessionGuard {
        SessionGuard::new(
            self.client.clone(),
            self.store.clone(),
            self.history.clone(),
        )
    }

    /// Follows routes from the current one until the protected page renders or
    /// the login form gives up.
    ///
    /// # Errors
    /// Returns an error if reading input or writing output fails.
    pub async fn run<I: FormInput, W: Write>(&self, input: &mut I, out: &mut W) -> Result<Outcome> {
        loop {
            let route = self.history.current();
            debug!(route = %route, "rendering");

            match route {
                Route::Home => {
                    let cached = auth::session::user(self.store.as_ref()).ok().flatten();
                    pages::render_loading(out, cached.as_ref())?;
                    if let GuardState::Authorized(user) = self.guard().mount().await {
                        pages::render_protected(out, &user)?;
                        return Ok(Outcome::Authorized(user));
                    }
                }
                Route::Login => {
                    let controller = LoginController::new(
                        self.client.clone(),
                        self.store.clone(),
                        self.history.clone(),
                    );
                    let logged_in =
                        form::run(input, out, |credentials| controller.submit(credentials))
                            .await?;
                    if !logged_in {
                        return Ok(Outcome::SignedOut);
                    }
                }
            }
        }
    }

    /// Runs the guard alone, without rendering or prompting.
    pub async fn whoami(&self) -> GuardState {
        self.guard().mount().await
    }

    /// # Errors
    /// Returns an error if the session store cannot be cleared.
    pub async fn logout(&self) -> Result<(), StorageError> {
        auth::logout(&self.client, self.store.as_ref(), &*self.history).await
    }
}
