/// Convenience result type used across Bluesquare.
pub type BluesquareResult<T> = Result<T, BluesquareError>;

/// Top-level error taxonomy used by the rendering and lookup APIs.
#[derive(thiserror::Error, Debug)]
pub enum BluesquareError {
    /// Invalid caller-provided data (matrix shape, canvas size, profile reference).
    #[error("validation error: {0}")]
    Validation(String),

    /// The handle or DID could not be resolved to an identity.
    #[error("not found: {0}")]
    NotFound(String),

    /// Errors while producing a QR symbol or an encoded image.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BluesquareError {
    /// Build a [`BluesquareError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BluesquareError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`BluesquareError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// HTTP-style status code this error maps to at a request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Encode(_) | Self::Other(_) => 500,
        }
    }
}

/// Failure while fetching or decoding a remote icon.
///
/// Always recovered by the pipeline: a failed fetch renders the code without an overlay.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or other transport failure.
    #[error("transport error fetching {url}: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("unexpected status {status} fetching {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body exceeded the configured byte limit.
    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge {
        /// Requested URL.
        url: String,
        /// Configured maximum body size.
        limit: u64,
    },

    /// The body was not a decodable raster image.
    #[error("decode error: {0}")]
    Decode(String),
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
