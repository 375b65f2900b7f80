use crate::{
    api::ApiClient,
    app::{App, routes::Route},
    auth::{AuthClient, FileStorage},
    config::AppConfig,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: AppConfig,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::in_dir(&self.config.session_dir)
    }

    /// Wires the HTTP client, the session file and the route history.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn app(&self, start: Route) -> Result<App> {
        let api = ApiClient::new(&self.config.api_base_url, self.config.timeout)?;
        let store = self.storage();
        debug!(
            base_url = %api.base_url(),
            session = %store.path().display(),
            "client configured"
        );
        Ok(App::new(Arc::new(AuthClient::new(api)), Arc::new(store), start))
    }
}
