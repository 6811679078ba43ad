use std::{io::Read, time::Duration};

use crate::{
    assets::decode::{DecodedImage, decode_image},
    foundation::{config::ServiceConfig, error::FetchError},
};

/// Loads an icon from a URL.
///
/// Implementations perform one request per call with no retry and no caching.
pub trait IconFetcher {
    /// Fetch and decode the image at `url`.
    fn fetch(&self, url: &str) -> Result<DecodedImage, FetchError>;
}

impl<F: IconFetcher + ?Sized> IconFetcher for &F {
    fn fetch(&self, url: &str) -> Result<DecodedImage, FetchError> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP [`IconFetcher`] with a per-request timeout and a body size cap.
#[derive(Clone)]
pub struct HttpIconFetcher {
    agent: ureq::Agent,
    max_bytes: u64,
}

impl std::fmt::Debug for HttpIconFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIconFetcher")
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

impl HttpIconFetcher {
    /// Create a fetcher; `timeout` bounds the whole request.
    pub fn new(timeout: Duration, max_bytes: u64) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, max_bytes }
    }

    /// Fetcher using the timeout and size cap from `cfg`.
    pub fn from_config(cfg: &ServiceConfig) -> Self {
        Self::new(cfg.fetch_timeout(), cfg.max_icon_bytes)
    }
}

impl IconFetcher for HttpIconFetcher {
    #[tracing::instrument(skip(self))]
    fn fetch(&self, url: &str) -> Result<DecodedImage, FetchError> {
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: url.to_owned(),
                status,
            },
            ureq::Error::Transport(t) => FetchError::Transport {
                url: url.to_owned(),
                message: t.to_string(),
            },
        })?;

        let mut body = Vec::new();
        response
            .into_reader()
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut body)
            .map_err(|e| FetchError::Transport {
                url: url.to_owned(),
                message: e.to_string(),
            })?;
        if body.len() as u64 > self.max_bytes {
            return Err(FetchError::TooLarge {
                url: url.to_owned(),
                limit: self.max_bytes,
            });
        }

        let icon = decode_image(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        tracing::debug!(width = icon.width, height = icon.height, "fetched icon");
        Ok(icon)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
