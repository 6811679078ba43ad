use super::*;

#[test]
fn defaults_match_public_deployment() {
    let cfg = ServiceConfig::default();
    assert_eq!(cfg.deployment, Deployment::Public);
    assert_eq!(cfg.base_url(), "https://bluesquare.deno.dev/");
    assert_eq!(cfg.canvas_size, 600);
    assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let cfg = ServiceConfig::from_json_str(r#"{ "deployment": "local", "canvas_size": 300 }"#)
        .unwrap();
    assert_eq!(cfg.deployment, Deployment::Local);
    assert_eq!(cfg.base_url(), "http://localhost:8000/");
    assert_eq!(cfg.canvas_size, 300);
    assert_eq!(cfg.quiet_zone, 4);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(ServiceConfig::from_json_str(r#"{ "canvas": 300 }"#).is_err());
}

#[test]
fn profile_url_joins_without_double_slash() {
    let cfg = ServiceConfig {
        profile_base_url: "https://bsky.app/profile/".to_owned(),
        ..ServiceConfig::default()
    };
    assert_eq!(
        cfg.profile_url("did:plc:abc"),
        "https://bsky.app/profile/did:plc:abc"
    );
}

#[test]
fn from_path_reports_missing_file() {
    let err = ServiceConfig::from_path(Path::new("definitely/missing/config.json")).unwrap_err();
    assert!(err.to_string().contains("read service config"));
}

#[test]
fn out_of_range_sizes_are_rejected_at_load() {
    for doc in [
        r#"{ "quiet_zone": 4294967295 }"#,
        r#"{ "quiet_zone": 300 }"#,
        r#"{ "canvas_size": 0 }"#,
        r#"{ "canvas_size": 70000 }"#,
    ] {
        let err = ServiceConfig::from_json_str(doc).unwrap_err();
        assert!(matches!(err, BluesquareError::Validation(_)), "{doc}: {err}");
    }
    let cfg = ServiceConfig::from_json_str(r#"{ "quiet_zone": 299 }"#).unwrap();
    assert_eq!(cfg.quiet_zone, 299);
    assert!(ServiceConfig::default().validate().is_ok());
}
