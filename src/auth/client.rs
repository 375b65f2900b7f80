//! Client wrappers for the identity service endpoints. Failures from the
//! HTTP wrapper are propagated unchanged: no retry, no backoff.

use crate::{
    api::{ApiClient, AppError, RequestOptions},
    auth::types::{Credentials, LoginResponse, UserRecord},
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::instrument;

pub const LOGIN_PATH: &str = "/login";
pub const ME_PATH: &str = "/me";
pub const LOGOUT_PATH: &str = "/logout";

#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /login` with the JSON-encoded credentials.
    ///
    /// # Errors
    /// Any `AppError` from the wrapper, including a body without `access_token`.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AppError> {
        self.api
            .post_json(LOGIN_PATH, &credentials.as_request())
            .await
    }

    /// `GET /me` with the access token as bearer credential.
    ///
    /// # Errors
    /// Any `AppError` from the wrapper; a rejected token is `AppError::Http`.
    #[instrument(skip_all)]
    pub async fn me(&self, access_token: &SecretString) -> Result<UserRecord, AppError> {
        self.api
            .request(
                ME_PATH,
                RequestOptions::get().bearer(access_token.expose_secret()),
            )
            .await
    }

    /// `GET /logout`, revoking the access token server side.
    ///
    /// # Errors
    /// Any `AppError` from the wrapper.
    #[instrument(skip_all)]
    pub async fn logout(&self, access_token: &SecretString) -> Result<(), AppError> {
        let _: Value = self
            .api
            .request(
                LOGOUT_PATH,
                RequestOptions::get().bearer(access_token.expose_secret()),
            )
            .await?;
        Ok(())
    }
}
