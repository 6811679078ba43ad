use std::cell::RefCell;

use super::*;
use crate::{
    foundation::error::{BluesquareError, FetchError},
    identity::resolve::Identity,
};

const PAYLOAD: &str = "https://example.com/profile/alice";

#[derive(Default)]
struct StubFetcher {
    icon: Option<DecodedImage>,
    requested: RefCell<Vec<String>>,
}

impl IconFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<DecodedImage, FetchError> {
        self.requested.borrow_mut().push(url.to_owned());
        self.icon.clone().ok_or_else(|| FetchError::Transport {
            url: url.to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}

struct StubResolver(Option<Identity>);

impl IdentityResolver for StubResolver {
    fn resolve(&self, handle_or_did: &str) -> BluesquareResult<Identity> {
        self.0
            .clone()
            .ok_or_else(|| BluesquareError::not_found(handle_or_did.to_owned()))
    }
}

#[derive(Default)]
struct RecordingSource {
    payloads: RefCell<Vec<String>>,
}

impl MatrixSource for RecordingSource {
    fn encode(&self, payload: &str) -> BluesquareResult<ModuleMatrix> {
        self.payloads.borrow_mut().push(payload.to_owned());
        QrMatrixSource::default().encode(payload)
    }
}

fn alice() -> Identity {
    Identity {
        did: "did:plc:alice".to_owned(),
        avatar_cid: Some("bafkreiavatar".to_owned()),
    }
}

fn green_icon() -> DecodedImage {
    let mut bytes = Vec::new();
    for _ in 0..200 * 200 {
        bytes.extend_from_slice(&[0, 200, 0, 255]);
    }
    DecodedImage::from_straight_rgba8(200, 200, bytes).unwrap()
}

fn service(
    fetcher: StubFetcher,
) -> Bluesquare<StubResolver, StubFetcher, RecordingSource> {
    Bluesquare::new(
        ServiceConfig::default(),
        StubResolver(Some(alice())),
        fetcher,
        RecordingSource::default(),
    )
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

fn assert_close(actual: [u8; 4], expected: [u8; 4]) {
    for c in 0..4 {
        assert!(
            actual[c].abs_diff(expected[c]) <= 2,
            "pixel {actual:?} not close to {expected:?}"
        );
    }
}

fn is_black_or_white(px: &image::Rgba<u8>) -> bool {
    px.0 == [0, 0, 0, 255] || px.0 == [255, 255, 255, 255]
}

#[test]
fn no_icon_scenario_is_plain_black_and_white() {
    let svc = service(StubFetcher::default());
    let out = svc.render_payload(PAYLOAD, &IconSpec::None).unwrap();
    assert_eq!(out.size, 600);
    assert_eq!(out.content_type(), "image/png");

    let img = decode(&out.bytes);
    assert_eq!(img.dimensions(), (600, 600));
    assert!(img.pixels().all(is_black_or_white));
    assert!(svc.fetcher.requested.borrow().is_empty());
}

#[test]
fn user_icon_scenario_overlays_rounded_icon() {
    let svc = service(StubFetcher {
        icon: Some(green_icon()),
        ..StubFetcher::default()
    });
    let out = svc.render_profile("alice.bsky.social", Some(IconSelector::User)).unwrap();
    let img = decode(&out.bytes);

    assert_close(img.get_pixel(300, 300).0, [0, 200, 0, 255]);
    assert_close(img.get_pixel(240, 240).0, [0, 200, 0, 255]);
    assert_close(img.get_pixel(300, 223).0, [255, 255, 255, 255]);
    assert!(is_black_or_white(img.get_pixel(225, 225)));
    for (x, y) in [(10, 10), (219, 300), (300, 381), (599, 599)] {
        assert!(is_black_or_white(img.get_pixel(x, y)), "pixel ({x}, {y})");
    }

    assert_eq!(
        svc.fetcher.requested.borrow().as_slice(),
        ["https://cdn.bsky.app/img/avatar/plain/did:plc:alice/bafkreiavatar@jpeg"]
    );
    assert_eq!(
        svc.matrix_source.payloads.borrow().as_slice(),
        ["https://bsky.app/profile/did:plc:alice"]
    );
}

#[test]
fn fetch_failure_matches_no_icon_output() {
    let svc = service(StubFetcher::default());
    let plain = svc.render_payload(PAYLOAD, &IconSpec::None).unwrap();
    let degraded = svc.render_payload(PAYLOAD, &IconSpec::Cloud).unwrap();
    assert_eq!(plain, degraded);
    assert_eq!(svc.fetcher.requested.borrow().len(), 1);
}

#[test]
fn unknown_selector_renders_without_icon() {
    let svc = service(StubFetcher {
        icon: Some(green_icon()),
        ..StubFetcher::default()
    });
    let selector = IconSelector::parse(Some("sparkles"));
    let out = svc.render_profile("alice.bsky.social", selector).unwrap();
    assert!(decode(&out.bytes).pixels().all(is_black_or_white));
    assert!(svc.fetcher.requested.borrow().is_empty());
}

#[test]
fn unresolved_identity_is_not_found() {
    let svc = Bluesquare::new(
        ServiceConfig::default(),
        StubResolver(None),
        StubFetcher::default(),
        RecordingSource::default(),
    );
    let err = svc.render_profile("ghost.example", None).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(svc.matrix_source.payloads.borrow().is_empty());
}

#[test]
fn percent_encoded_ref_is_decoded_before_lookup() {
    let svc = Bluesquare::new(
        ServiceConfig::default(),
        StubResolver(None),
        StubFetcher::default(),
        RecordingSource::default(),
    );
    let err = svc.render_profile("did%3Aplc%3Aghost", None).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("did:plc:ghost"), "{msg}");
    assert!(!msg.contains("%3A"), "{msg}");
}

#[test]
fn invalid_profile_ref_is_rejected_before_lookup() {
    let svc = service(StubFetcher::default());
    let err = svc.render_profile("../etc/passwd", None).unwrap_err();
    assert!(matches!(err, BluesquareError::Validation(_)));
}

#[test]
fn rendering_is_byte_deterministic() {
    let svc = service(StubFetcher {
        icon: Some(green_icon()),
        ..StubFetcher::default()
    });
    let a = svc.render_payload(PAYLOAD, &IconSpec::Butterfly).unwrap();
    let b = svc.render_payload(PAYLOAD, &IconSpec::Butterfly).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn render_code_without_icon_equals_raster() {
    let m = QrMatrixSource::default().encode(PAYLOAD).unwrap();
    let composed = render_code(&m, 300, None).unwrap();
    assert_eq!(composed, rasterize(&m, 300).unwrap());
}
