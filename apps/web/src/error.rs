use thiserror::Error;

/// Failures the drops pipeline can surface. The `Display` text is shown
/// verbatim in the failed state, so each variant carries the detail an
/// operator needs to diagnose it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropsError {
    /// Both catalog endpoints answered with a non-success status.
    #[error("HTTP {status}")]
    Retrieval { status: u16 },
    /// The response body was not a product list.
    #[error("{message}")]
    Format { message: String },
    /// The browser could not complete the request at all.
    #[error("request failed: {detail}")]
    Transport { detail: String },
    /// The grid container is absent from the page. Logged only; there is
    /// nowhere to show it.
    #[error("new drops grid container not found")]
    ContainerMissing,
}
