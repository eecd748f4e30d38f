use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = resolve_settings(None, no_env).expect("defaults");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.transport, TransportKind::Direct);
    assert_eq!(settings.model, "gemini-2.5-flash");
    assert_eq!(
        settings.api_base_url,
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(settings.request_timeout(), Duration::from_secs(120));
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
transport = "relay"
relay_url = "https://relay.example.com/api/analyze"
model = "gemini-2.0-flash"
request_timeout_secs = 30
"#;
    let settings = resolve_settings(Some(raw), no_env).expect("file settings");

    assert_eq!(settings.transport, TransportKind::Relay);
    assert_eq!(
        settings.relay_url.as_deref(),
        Some("https://relay.example.com/api/analyze")
    );
    assert_eq!(settings.model, "gemini-2.0-flash");
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn env_overrides_file_and_gemini_key_wins() {
    let raw = r#"
api_key = "from-file"
model = "file-model"
"#;
    let env = env_from(&[
        ("API_KEY", "legacy-key"),
        ("GEMINI_API_KEY", "gemini-key"),
        ("GEMINI_MODEL", "env-model"),
        ("WIZARD_TRANSPORT", "RELAY"),
        ("WIZARD_RELAY_URL", "http://127.0.0.1:8787/relay"),
        ("WIZARD_REQUEST_TIMEOUT_SECS", "45"),
    ]);
    let settings = resolve_settings(Some(raw), env).expect("layered settings");

    assert_eq!(settings.api_key.as_deref(), Some("gemini-key"));
    assert_eq!(settings.model, "env-model");
    assert_eq!(settings.transport, TransportKind::Relay);
    assert_eq!(
        settings.relay_url.as_deref(),
        Some("http://127.0.0.1:8787/relay")
    );
    assert_eq!(settings.request_timeout_secs, 45);
}

#[test]
fn legacy_api_key_is_used_when_gemini_key_absent() {
    let settings =
        resolve_settings(None, env_from(&[("API_KEY", "legacy-key")])).expect("settings");
    assert_eq!(settings.api_key.as_deref(), Some("legacy-key"));
}

#[test]
fn invalid_env_values_are_ignored() {
    let env = env_from(&[
        ("WIZARD_TRANSPORT", "carrier-pigeon"),
        ("WIZARD_REQUEST_TIMEOUT_SECS", "soon"),
    ]);
    let settings = resolve_settings(Some("request_timeout_secs = 15"), env).expect("settings");

    assert_eq!(settings.transport, TransportKind::Direct);
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn blank_key_and_relay_url_count_as_missing() {
    let env = env_from(&[("GEMINI_API_KEY", "   "), ("WIZARD_RELAY_URL", "")]);
    let settings = resolve_settings(None, env).expect("settings");

    assert_eq!(settings.api_key, None);
    assert_eq!(settings.relay_url, None);
}

#[test]
fn zero_timeout_is_rejected() {
    let err = resolve_settings(Some("request_timeout_secs = 0"), no_env)
        .expect_err("zero timeout must fail");
    assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn unknown_file_key_is_rejected() {
    let err = resolve_settings(Some("api_secret = \"oops\""), no_env)
        .expect_err("unknown key must fail");
    assert!(format!("{err:#}").contains("api_secret"));
}

#[test]
fn direct_target_requires_api_key() {
    let settings = Settings::default();
    let err = settings
        .transport_target()
        .expect_err("missing key must fail");
    assert!(err.to_string().contains("API key"));

    let settings = Settings {
        api_key: Some("key-123".to_string()),
        ..Settings::default()
    };
    assert_eq!(
        settings.transport_target().expect("direct target"),
        TransportTarget::Direct {
            api_key: "key-123".to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    );
}

#[test]
fn direct_target_rejects_bad_base_url_and_empty_model() {
    let settings = Settings {
        api_key: Some("key-123".to_string()),
        api_base_url: "not a url".to_string(),
        ..Settings::default()
    };
    assert!(settings.transport_target().is_err());

    let settings = Settings {
        api_key: Some("key-123".to_string()),
        model: "  ".to_string(),
        ..Settings::default()
    };
    let err = settings.transport_target().expect_err("empty model");
    assert!(err.to_string().contains("model"));
}

#[test]
fn relay_target_requires_http_url() {
    let missing = Settings {
        transport: TransportKind::Relay,
        ..Settings::default()
    };
    let err = missing.transport_target().expect_err("missing relay url");
    assert!(err.to_string().contains("relay URL"));

    let wrong_scheme = Settings {
        transport: TransportKind::Relay,
        relay_url: Some("ftp://relay.example.com".to_string()),
        ..Settings::default()
    };
    let err = wrong_scheme.transport_target().expect_err("ftp relay");
    assert!(err.to_string().contains("http or https"));

    let relay = Settings {
        transport: TransportKind::Relay,
        relay_url: Some("https://relay.example.com/analyze".to_string()),
        ..Settings::default()
    };
    assert_eq!(
        relay.transport_target().expect("relay target"),
        TransportTarget::Relay {
            endpoint: "https://relay.example.com/analyze".to_string(),
        }
    );
}

#[test]
fn load_settings_reads_file_and_tolerates_missing_one() {
    let dir = std::env::temp_dir().join(format!("risk_wizard_config_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");

    let missing = dir.join("absent.toml");
    assert!(load_settings(&missing).is_ok());

    let path = dir.join("wizard.toml");
    fs::write(&path, "request_timeout_secs = 7\nmodel = \"from-disk\"\n").expect("write config");
    let settings = load_settings(&path).expect("load config");
    if std::env::var("WIZARD_REQUEST_TIMEOUT_SECS").is_err() {
        assert_eq!(settings.request_timeout_secs, 7);
    }
    if std::env::var("GEMINI_MODEL").is_err() {
        assert_eq!(settings.model, "from-disk");
    }

    fs::write(&path, "request_timeout_secs = \"seven\"\n").expect("write config");
    let err = load_settings(&path).expect_err("bad type must fail");
    assert!(format!("{err:#}").contains("invalid configuration"));

    let _ = fs::remove_dir_all(&dir);
}
