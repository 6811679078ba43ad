use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::foundation::{
    config::ServiceConfig,
    error::{BluesquareError, BluesquareResult},
};

/// Longest accepted handle or DID.
const MAX_PROFILE_REF_LEN: usize = 2048;

/// Query value bytes left as-is in share links (RFC 3986 unreserved).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-decode `profile_ref` and check the result is a handle or DID.
///
/// The decoded text is returned; it contains only `[A-Za-z0-9._:-]` and can be placed in a
/// URL path or query verbatim.
pub fn validate_profile_ref(profile_ref: &str) -> BluesquareResult<Cow<'_, str>> {
    if profile_ref.is_empty() {
        return Err(BluesquareError::validation("profile reference is empty"));
    }
    if profile_ref.len() > MAX_PROFILE_REF_LEN {
        return Err(BluesquareError::validation("profile reference is too long"));
    }
    let decoded = percent_decode_str(profile_ref).decode_utf8().map_err(|e| {
        BluesquareError::validation(format!("profile reference '{profile_ref}': {e}"))
    })?;
    let ok = decoded
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_' | b':'));
    if !ok {
        return Err(BluesquareError::validation(format!(
            "profile reference '{profile_ref}' contains characters outside handle/DID syntax"
        )));
    }
    Ok(decoded)
}

/// Public URLs for one profile code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLinks {
    /// Landing page for the profile code.
    pub page_url: String,
    /// URL of the rendered PNG.
    pub image_url: String,
    /// Profile page on the social network.
    pub profile_url: String,
}

impl ShareLinks {
    /// Build links for `profile_ref` under the configured base URL.
    ///
    /// `selector` is the caller's raw `type` value and is carried into the links unchanged,
    /// including values that select no icon. `None` leaves the `type` parameter out.
    pub fn new(
        cfg: &ServiceConfig,
        profile_ref: &str,
        selector: Option<&str>,
    ) -> BluesquareResult<Self> {
        let profile_ref = validate_profile_ref(profile_ref)?;
        let base = cfg.base_url();
        let (page_url, image_url) = match selector {
            Some(sel) => {
                let sel = utf8_percent_encode(sel, QUERY_VALUE);
                (
                    format!("{base}{profile_ref}?type={sel}"),
                    format!("{base}qr.png?type={sel}&path={profile_ref}"),
                )
            }
            None => (
                format!("{base}{profile_ref}"),
                format!("{base}qr.png?path={profile_ref}"),
            ),
        };
        Ok(Self {
            page_url,
            image_url,
            profile_url: cfg.profile_url(&profile_ref),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/links.rs"]
mod tests;
