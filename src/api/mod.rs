//! Transport layer: the JSON HTTP wrapper and its error type. Feature code goes
//! through [`ApiClient`] so timeouts, headers and error bodies are handled the
//! same way for every endpoint.

pub mod errors;
pub mod http;

pub use errors::AppError;
pub use http::{ApiClient, DEFAULT_TIMEOUT, RequestOptions};
