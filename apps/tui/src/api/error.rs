use thiserror::Error;

/// Failure taxonomy for calls against the analytics backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport never produced a response.
    #[error("backend unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx status, with the server's message when the body had one.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// 2xx with `success: false` or a body that does not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    pub fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            return Self::Timeout(timeout_secs);
        }
        if let Some(status) = err.status() {
            return Self::Server {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return Self::Malformed(err.to_string());
        }
        Self::NetworkUnreachable(err.to_string())
    }

    pub const fn is_network(&self) -> bool {
        matches!(self, Self::NetworkUnreachable(_) | Self::Timeout(_))
    }
}
