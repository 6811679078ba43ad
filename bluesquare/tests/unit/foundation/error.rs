use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BluesquareError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BluesquareError::not_found("x")
            .to_string()
            .contains("not found:")
    );
    assert!(
        BluesquareError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BluesquareError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn status_codes_follow_boundary_mapping() {
    assert_eq!(BluesquareError::not_found("alice").status_code(), 404);
    assert_eq!(BluesquareError::validation("x").status_code(), 400);
    assert_eq!(BluesquareError::encode("x").status_code(), 500);
}

#[test]
fn fetch_error_messages_name_the_url() {
    let err = FetchError::Status {
        url: "https://cdn.example/icon.png".to_owned(),
        status: 503,
    };
    let msg = err.to_string();
    assert!(msg.contains("503"));
    assert!(msg.contains("https://cdn.example/icon.png"));
}
