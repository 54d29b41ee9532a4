use std::collections::HashMap;
use std::fs;

use anyhow::Result;
use darsak_core::devices::Locale;
use darsak_server::infra::config::{ConfigLoadError, ConfigLoader, EnvConfig};

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn env(pairs: &[(&str, &str)]) -> EnvConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn file_values_are_overridden_by_environment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("darsak.toml");
    fs::write(
        &path,
        format!(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
url = "postgres://file@localhost/darsak"

[auth]
jwt_secret = "{SECRET}"

[devices]
max_devices = 3
locale = "en"

[cors]
allowed_origins = ["https://darsak.example"]
"#
        ),
    )?;

    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(
            env(&[
                ("DARSAK_PORT", "9090"),
                ("DATABASE_URL", "postgres://env@localhost/darsak"),
            ]),
            false,
        )?;
    let config = load.config;

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.database.url, "postgres://env@localhost/darsak");
    assert_eq!(config.devices.max_devices, 3);
    assert_eq!(config.devices.locale, Locale::English);
    assert_eq!(config.cors.allowed_origins, vec!["https://darsak.example"]);
    assert_eq!(config.auth.audience.as_deref(), Some("authenticated"));
    assert_eq!(config.metadata.config_path.as_deref(), Some(path.as_path()));
    assert!(load.warnings.is_empty());
    Ok(())
}

#[test]
fn environment_alone_gets_defaults_and_warnings() -> Result<()> {
    let load = ConfigLoader::new().load_with_env(
        env(&[
            ("DATABASE_URL", "postgres://localhost/darsak"),
            ("DARSAK_JWT_SECRET", "short"),
            ("DARSAK_JWT_AUDIENCE", "none"),
        ]),
        false,
    )?;

    assert_eq!(load.config.server.port, 3000);
    assert_eq!(load.config.devices.max_devices, 2);
    assert_eq!(load.config.devices.locale, Locale::Arabic);
    assert_eq!(load.config.auth.audience, None);
    // no file, short secret, open CORS
    assert_eq!(load.warnings.items.len(), 3);
    Ok(())
}

#[test]
fn missing_secret_and_zero_cap_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("darsak.toml");
    let toml = "[database]\nurl = \"postgres://localhost/darsak\"\n";
    fs::write(&path, toml).unwrap();
    let loader = ConfigLoader::new().with_config_path(&path);

    let err = loader.load_with_env(env(&[]), false).unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::Missing {
            env: "DARSAK_JWT_SECRET",
            ..
        }
    ));

    let err = loader
        .load_with_env(
            env(&[("DARSAK_JWT_SECRET", SECRET), ("DARSAK_MAX_DEVICES", "0")]),
            false,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::Invalid {
            field: "max_devices",
            ..
        }
    ));
}

#[test]
fn unknown_keys_and_missing_explicit_file_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("darsak.toml");
    fs::write(&path, "[devices]\nmax_sessions = 4\n").unwrap();

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env(&[]), false)
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));

    let err = ConfigLoader::new()
        .load_with_env(
            env(&[("DARSAK_CONFIG", "/definitely/not/here/darsak.toml")]),
            false,
        )
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}
