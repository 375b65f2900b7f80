//! Session gate: the login flow, the session store and the protected page
//! guard. This module touches security boundaries and must avoid logging
//! passwords or token material.
//!
//! Flow Overview: the login controller posts credentials through
//! [`client::AuthClient`], writes the returned session with [`session::persist`]
//! and navigates to `/`. The guard reads the stored token on every mount,
//! validates it with `GET /me`, and clears the session when it is rejected.

pub mod client;
pub mod guards;
pub mod login;
pub mod session;
pub mod storage;
pub mod types;

pub use client::AuthClient;
pub use guards::{GuardState, SessionGuard};
pub use login::{LOGIN_FAILED_MESSAGE, LoginController, LoginState, SubmitOutcome, logout};
pub use storage::{FileStorage, MemoryStorage, SessionStore, StorageError};
pub use types::{Credentials, UserRecord};
