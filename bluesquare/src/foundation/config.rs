use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::foundation::{
    core::DEFAULT_CANVAS_SIZE,
    error::{BluesquareError, BluesquareResult},
};

/// Which public base URL share links point at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    /// Development server on the local machine.
    Local,
    /// Deployed public site.
    #[default]
    Public,
}

/// Process-wide settings, injected once at startup.
///
/// Every field has a default, so a config file only needs to list overrides.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Selects between `local_base_url` and `public_base_url`.
    pub deployment: Deployment,
    /// Base URL used when `deployment` is `local`. Must end with `/`.
    pub local_base_url: String,
    /// Base URL used when `deployment` is `public`. Must end with `/`.
    pub public_base_url: String,
    /// Directory service host answering `com.atproto.repo.listRecords`.
    pub directory_base_url: String,
    /// Prefix for avatar image URLs (`{prefix}/{did}/{cid}@jpeg`).
    pub avatar_cdn_base_url: String,
    /// Prefix for profile deep links (`{prefix}/{did}`).
    pub profile_base_url: String,
    /// Output edge length in pixels.
    pub canvas_size: u32,
    /// Light border around the QR symbol, in modules.
    pub quiet_zone: u32,
    /// Timeout applied to each icon and directory request.
    pub icon_fetch_timeout_ms: u64,
    /// Largest icon response body accepted.
    pub max_icon_bytes: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            deployment: Deployment::Public,
            local_base_url: "http://localhost:8000/".to_owned(),
            public_base_url: "https://bluesquare.deno.dev/".to_owned(),
            directory_base_url: "https://bsky.social".to_owned(),
            avatar_cdn_base_url: "https://cdn.bsky.app/img/avatar/plain".to_owned(),
            profile_base_url: "https://bsky.app/profile".to_owned(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            quiet_zone: 4,
            icon_fetch_timeout_ms: 10_000,
            max_icon_bytes: 8 * 1024 * 1024,
        }
    }
}

impl ServiceConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> BluesquareResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse service config json")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check numeric bounds: `canvas_size` in `1..=65535` and a quiet zone that leaves room
    /// for the symbol (`2 * quiet_zone < canvas_size`).
    pub fn validate(&self) -> BluesquareResult<()> {
        if self.canvas_size == 0 || self.canvas_size > u32::from(u16::MAX) {
            return Err(BluesquareError::validation(format!(
                "canvas_size must be in 1..={}, got {}",
                u16::MAX,
                self.canvas_size
            )));
        }
        if u64::from(self.quiet_zone) * 2 >= u64::from(self.canvas_size) {
            return Err(BluesquareError::validation(format!(
                "quiet_zone {} leaves no room for the symbol on a {}px canvas",
                self.quiet_zone, self.canvas_size
            )));
        }
        Ok(())
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> BluesquareResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read service config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Base URL selected by [`ServiceConfig::deployment`].
    pub fn base_url(&self) -> &str {
        match self.deployment {
            Deployment::Local => &self.local_base_url,
            Deployment::Public => &self.public_base_url,
        }
    }

    /// Network timeout for icon and directory requests.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.icon_fetch_timeout_ms)
    }

    /// Deep link encoded into the QR symbol for `did`.
    pub fn profile_url(&self, did: &str) -> String {
        format!("{}/{did}", self.profile_base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
