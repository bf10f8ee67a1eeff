use thiserror::Error;

/// Why a catalog load failed. `Clone` so a single in-flight result can be
/// handed to every caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The request never produced an HTTP response (DNS, connect, timeout,
    /// broken body stream).
    #[error("network error: {message}")]
    Network { message: String },
    /// The server answered with a non-2xx status.
    #[error("server error: HTTP {code}")]
    Server { code: u16 },
    /// The body was not JSON or lacked the expected sections.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

impl LoadError {
    pub fn network(message: impl Into<String>) -> Self {
        LoadError::Network {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        LoadError::MalformedResponse {
            message: message.into(),
        }
    }
}
