use crate::config::{ConfigKey, FirebaseConfig, RawConfig};

pub const API_KEY: &str = "AIzaSyD-kindling-test-0123456789";
pub const APP_ID: &str = "1:123456789012:web:0a1b2c3d4e5f6a7b";

/// A record with every required key set to a value resembling what the
/// Firebase console hands out. The measurement ID is left out.
pub fn complete_raw_config() -> RawConfig {
    RawConfig::new()
        .with(ConfigKey::ApiKey, API_KEY)
        .with(ConfigKey::AuthDomain, "kindling-test.firebaseapp.com")
        .with(ConfigKey::ProjectId, "kindling-test")
        .with(ConfigKey::StorageBucket, "kindling-test.appspot.com")
        .with(ConfigKey::MessagingSenderId, "123456789012")
        .with(ConfigKey::AppId, APP_ID)
}

/// [`complete_raw_config`] without `key`.
pub fn raw_config_without(key: ConfigKey) -> RawConfig {
    let complete = complete_raw_config();
    RawConfig::from_lookup(|name| {
        ConfigKey::ALL
            .into_iter()
            .find(|k| *k != key && k.env_var() == name)
            .and_then(|k| complete.get(k))
            .map(str::to_string)
    })
}

pub fn complete_config() -> FirebaseConfig {
    match complete_raw_config().validate() {
        Ok(config) => config,
        Err(err) => panic!("test fixture should be complete: {err}"),
    }
}

/// The fixture as `(variable, value)` pairs, for tests that set the process
/// environment.
pub fn complete_env_vars() -> Vec<(&'static str, Option<String>)> {
    let complete = complete_raw_config();
    ConfigKey::ALL
        .into_iter()
        .map(|key| (key.env_var(), complete.get(key).map(str::to_string)))
        .collect()
}
