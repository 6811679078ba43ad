use crate::{foundation::config::ServiceConfig, identity::resolve::Identity};

const ICON_REPO_BASE: &str = "https://raw.githubusercontent.com/bluesky-social/social-app/";
const ICON_PATH: &str = "/assets/icon.png";

const CLOUD_COMMIT: &str = "56cf890debeb9872f791ccb992a5587f2c05fd9e";
const CLOUD_BUTTERFLY_COMMIT: &str = "dd074371cfbcdc778dba3877fa3dda07a0f5d418";
const BUTTERFLY_COMMIT: &str = "781410690944b5efc826ccc36660f86565107d92";

/// Request-level icon choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconSelector {
    /// First-generation cloud app icon.
    Cloud,
    /// Transitional cloud-and-butterfly icon.
    CloudButterfly,
    /// Butterfly app icon.
    Butterfly,
    /// The profile's own avatar.
    User,
}

impl IconSelector {
    /// Selector used when the request names none.
    pub const DEFAULT: Self = Self::Cloud;

    /// Parse a request value. A missing value selects [`IconSelector::DEFAULT`]; an unknown
    /// value selects no icon at all.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") => Some(Self::DEFAULT),
            Some("cloud") => Some(Self::Cloud),
            Some("cloudButterfly") => Some(Self::CloudButterfly),
            Some("butterfly") => Some(Self::Butterfly),
            Some("user") => Some(Self::User),
            Some(other) => {
                tracing::debug!(selector = other, "unknown icon selector; rendering without icon");
                None
            }
        }
    }

    /// Wire name, as accepted by [`IconSelector::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::CloudButterfly => "cloudButterfly",
            Self::Butterfly => "butterfly",
            Self::User => "user",
        }
    }
}

/// Icon to composite, resolved against an identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconSpec {
    /// Plain code, no overlay.
    None,
    /// Bundled cloud icon.
    Cloud,
    /// Bundled cloud-and-butterfly icon.
    CloudButterfly,
    /// Bundled butterfly icon.
    Butterfly,
    /// Avatar blob of `did`.
    User {
        /// Account DID.
        did: String,
        /// Avatar blob content id.
        cid: String,
    },
}

impl IconSpec {
    /// Combine a selector with the resolved identity. `User` without an avatar yields
    /// [`IconSpec::None`].
    pub fn select(selector: Option<IconSelector>, identity: &Identity) -> Self {
        match selector {
            None => Self::None,
            Some(IconSelector::Cloud) => Self::Cloud,
            Some(IconSelector::CloudButterfly) => Self::CloudButterfly,
            Some(IconSelector::Butterfly) => Self::Butterfly,
            Some(IconSelector::User) => match &identity.avatar_cid {
                Some(cid) => Self::User {
                    did: identity.did.clone(),
                    cid: cid.clone(),
                },
                None => Self::None,
            },
        }
    }

    /// Fetchable URL for this icon, or `None` for [`IconSpec::None`].
    pub fn url(&self, cfg: &ServiceConfig) -> Option<String> {
        let bundled = |commit: &str| format!("{ICON_REPO_BASE}{commit}{ICON_PATH}");
        match self {
            Self::None => None,
            Self::Cloud => Some(bundled(CLOUD_COMMIT)),
            Self::CloudButterfly => Some(bundled(CLOUD_BUTTERFLY_COMMIT)),
            Self::Butterfly => Some(bundled(BUTTERFLY_COMMIT)),
            Self::User { did, cid } => Some(format!(
                "{}/{did}/{cid}@jpeg",
                cfg.avatar_cdn_base_url.trim_end_matches('/')
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/icons/select.rs"]
mod tests;
