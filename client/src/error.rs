use thiserror::Error;

/// Failure taxonomy for every call that crosses the network boundary.
///
/// The pipeline and the `BankingClient` facade only ever propagate these;
/// converting one into user-facing state is the wizard's (or session's) job.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed request path. Programmer error, not user-recoverable.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 401. The caller should re-authenticate, not retry silently.
    #[error("Unauthorized access. Please login again.")]
    Unauthorized,

    /// Any other non-2xx status.
    #[error("Server returned error code: {0}")]
    Server(u16),

    /// Response body did not match the expected shape or format.
    #[error("Failed to decode response: {0}")]
    Decoding(String),
}
