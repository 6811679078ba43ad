use std::time::Duration;

use crate::{
    foundation::{
        config::ServiceConfig,
        error::{BluesquareError, BluesquareResult},
    },
    session::links::validate_profile_ref,
};

const LIST_RECORDS_PATH: &str = "/xrpc/com.atproto.repo.listRecords";
const PROFILE_COLLECTION: &str = "app.bsky.actor.profile";

/// Account identity needed to build a profile code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Decentralized identifier, e.g. `did:plc:...`.
    pub did: String,
    /// Content id of the avatar blob, when the profile has one.
    pub avatar_cid: Option<String>,
}

/// Resolves a handle or DID to an [`Identity`].
pub trait IdentityResolver {
    /// Resolve `handle_or_did`. Lookup failures are reported as [`BluesquareError::NotFound`].
    fn resolve(&self, handle_or_did: &str) -> BluesquareResult<Identity>;
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for &R {
    fn resolve(&self, handle_or_did: &str) -> BluesquareResult<Identity> {
        (**self).resolve(handle_or_did)
    }
}

#[derive(Debug, serde::Deserialize)]
struct ListRecords {
    records: Vec<ProfileRecord>,
}

#[derive(Debug, serde::Deserialize)]
struct ProfileRecord {
    uri: String,
    value: ProfileValue,
}

#[derive(Debug, serde::Deserialize)]
struct ProfileValue {
    #[serde(default)]
    avatar: Option<BlobRef>,
}

/// Avatar blob reference; older records carry a bare `cid`, newer ones `ref.$link`.
#[derive(Debug, serde::Deserialize)]
struct BlobRef {
    #[serde(default)]
    cid: Option<String>,
    #[serde(default, rename = "ref")]
    link: Option<CidLink>,
}

#[derive(Debug, serde::Deserialize)]
struct CidLink {
    #[serde(rename = "$link")]
    link: String,
}

/// Extract the identity from a `com.atproto.repo.listRecords` response body.
pub fn parse_profile_records(body: &str) -> BluesquareResult<Identity> {
    let list: ListRecords = serde_json::from_str(body)
        .map_err(|e| BluesquareError::not_found(format!("malformed profile records: {e}")))?;
    identity_from_records(list)
}

fn identity_from_records(list: ListRecords) -> BluesquareResult<Identity> {
    let record = list
        .records
        .into_iter()
        .next()
        .ok_or_else(|| BluesquareError::not_found("no profile record"))?;

    let did = did_from_at_uri(&record.uri)
        .ok_or_else(|| BluesquareError::not_found(format!("bad record uri '{}'", record.uri)))?;
    let avatar_cid = record
        .value
        .avatar
        .and_then(|a| a.cid.or(a.link.map(|l| l.link)));

    Ok(Identity {
        did: did.to_owned(),
        avatar_cid,
    })
}

/// `at://did:plc:abc/app.bsky.actor.profile/self` -> `did:plc:abc`.
fn did_from_at_uri(uri: &str) -> Option<&str> {
    let rest = uri.strip_prefix("at://").unwrap_or(uri);
    let did = rest.split('/').next()?;
    (!did.is_empty()).then_some(did)
}

/// [`IdentityResolver`] that lists the profile collection on a directory server.
///
/// Percent-encoded references are decoded before the lookup; references outside handle/DID
/// syntax are a [`BluesquareError::Validation`] error and no request is made.
#[derive(Clone)]
pub struct DirectoryResolver {
    agent: ureq::Agent,
    endpoint: String,
}

impl std::fmt::Debug for DirectoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryResolver")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl DirectoryResolver {
    /// Resolver against `base_url` (e.g. `https://bsky.social`).
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: format!("{}{LIST_RECORDS_PATH}", base_url.trim_end_matches('/')),
        }
    }

    /// Resolver using the directory URL and timeout from `cfg`.
    pub fn from_config(cfg: &ServiceConfig) -> Self {
        Self::new(&cfg.directory_base_url, cfg.fetch_timeout())
    }
}

impl IdentityResolver for DirectoryResolver {
    #[tracing::instrument(skip(self))]
    fn resolve(&self, handle_or_did: &str) -> BluesquareResult<Identity> {
        let handle_or_did = validate_profile_ref(handle_or_did)?;
        let handle_or_did = handle_or_did.as_ref();
        let response = self
            .agent
            .get(&self.endpoint)
            .query("collection", PROFILE_COLLECTION)
            .query("repo", handle_or_did)
            .call()
            .map_err(|e| {
                tracing::warn!(err = %e, "profile lookup failed");
                BluesquareError::not_found(format!("{handle_or_did}: {e}"))
            })?;

        let list: ListRecords = response.into_json().map_err(|e| {
            tracing::warn!(err = %e, "profile lookup returned malformed json");
            BluesquareError::not_found(format!("{handle_or_did}: {e}"))
        })?;

        let identity = identity_from_records(list)?;
        tracing::info!(did = %identity.did, has_avatar = identity.avatar_cid.is_some(), "resolved identity");
        Ok(identity)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/identity/resolve.rs"]
mod tests;
