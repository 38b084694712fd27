//! Integration tests for the FAUCET_* environment layer.
//!
//! Kept in their own test binary because environment variables are process-global;
//! `ENV_LOCK` serializes the tests that set them.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use faucet::config::Settings;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets variables for the lifetime of the guard and removes them on drop.
struct EnvVars(Vec<&'static str>);

impl EnvVars {
    fn set(pairs: &[(&'static str, &str)]) -> Self {
        for (key, value) in pairs {
            env::set_var(key, value);
        }
        Self(pairs.iter().map(|(key, _)| *key).collect())
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for key in &self.0 {
            env::remove_var(key);
        }
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_env_credentials_when_loading_over_local_file_then_env_wins() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let local = write(
        &dir,
        "faucet.json",
        r#"{"clientId": "file-client", "apiKey": "file-key"}"#,
    );
    let _vars = EnvVars::set(&[
        ("FAUCET_CLIENT_ID", "env-client"),
        ("FAUCET_API_KEY", "env-key"),
    ]);

    let settings = Settings::load_layers(None, Some(local.as_path())).expect("load settings");

    assert_eq!(settings.client_id, "env-client");
    assert_eq!(settings.api_key, "env-key");
}

#[test]
fn given_env_base_url_and_key_path_when_loading_then_both_override_defaults() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _vars = EnvVars::set(&[
        ("FAUCET_BASE_URL", "http://localhost:9000"),
        ("FAUCET_PUBLIC_KEY_PATH", "/tmp/keys/deploy.pub"),
    ]);

    let settings = Settings::load_layers(None, None).expect("load settings");

    assert_eq!(settings.base_url, "http://localhost:9000");
    assert_eq!(settings.public_key_path, PathBuf::from("/tmp/keys/deploy.pub"));
}

#[test]
fn given_env_client_id_only_when_loading_then_file_api_key_is_kept() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let local = write(
        &dir,
        "faucet.toml",
        "client_id = \"file-client\"\napi_key = \"file-key\"\n",
    );
    let _vars = EnvVars::set(&[("FAUCET_CLIENT_ID", "env-client")]);

    let settings = Settings::load_layers(None, Some(local.as_path())).expect("load settings");

    assert_eq!(settings.client_id, "env-client");
    assert_eq!(settings.api_key, "file-key");
}
