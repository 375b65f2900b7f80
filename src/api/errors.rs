use thiserror::Error;

/// Failures of a single call to the identity service.
///
/// Callers that render UI collapse every variant into one message; the variants
/// exist for logs and tests.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl AppError {
    /// HTTP status of the failed response, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_includes_status_and_message() {
        let err = AppError::Http {
            status: 403,
            message: "Invalid Email or Password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed (403): Invalid Email or Password"
        );
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(AppError::Network("refused".to_string()).status(), None);
        assert_eq!(AppError::Parse("eof".to_string()).status(), None);
    }
}
