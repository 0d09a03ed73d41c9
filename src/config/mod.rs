//! # Configuration
//!
//! A Firebase web app is configured by a handful of named settings, which
//! are read from `NEXT_PUBLIC_FIREBASE_*` environment variables. They are
//! first collected into a [`RawConfig`], exactly as found, and then validated
//! into a [`FirebaseConfig`].
//!
//! ```
//! use kindling::config::{ConfigKey, RawConfig};
//!
//! let raw = RawConfig::new()
//!     .with(ConfigKey::ApiKey, "AIzaSyD-example-key")
//!     .with(ConfigKey::ProjectId, "   ");
//!
//! // Blank values count as missing, just like absent ones.
//! assert_eq!(
//!     raw.missing_keys(),
//!     [
//!         ConfigKey::AuthDomain,
//!         ConfigKey::ProjectId,
//!         ConfigKey::StorageBucket,
//!         ConfigKey::MessagingSenderId,
//!         ConfigKey::AppId,
//!     ]
//! );
//! ```

use std::{collections::BTreeMap, env};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{diagnostics::redact, error::BootstrapError};

mod key;
mod source;

pub use key::ConfigKey;

/// The configuration values as read from their source, before validation.
///
/// Values are stored verbatim, so an empty or whitespace-only variable is
/// still recorded here. It is [`RawConfig::missing_keys`] that decides what
/// counts as missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    values: BTreeMap<ConfigKey, String>,
}

impl RawConfig {
    /// Create a record with no values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every [`ConfigKey`] from the process environment. Variables that
    /// are unset or not valid unicode are left out.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read every [`ConfigKey`] through `lookup`, which is given the name of
    /// the environment variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let values = ConfigKey::ALL
            .into_iter()
            .filter_map(|key| lookup(key.env_var()).map(|value| (key, value)))
            .collect();

        Self { values }
    }

    pub fn with(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Whether the variable was given a non-empty value. Whitespace counts as
    /// a value here, which makes this a raw presence check rather than
    /// validation.
    pub fn is_set(&self, key: ConfigKey) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// The required keys whose value is absent or consists only of
    /// whitespace, in declaration order.
    pub fn missing_keys(&self) -> Vec<ConfigKey> {
        ConfigKey::REQUIRED
            .into_iter()
            .filter(|key| is_blank(self.get(*key)))
            .collect()
    }

    /// Validate the record and normalize it into a [`FirebaseConfig`].
    ///
    /// Fails with [`BootstrapError::Configuration`] naming every missing key.
    /// The optional measurement ID is kept only if it has a non-blank value.
    pub fn validate(&self) -> Result<FirebaseConfig, BootstrapError> {
        let missing = self.missing_keys();
        if !missing.is_empty() {
            return Err(BootstrapError::Configuration { missing });
        }

        let value = |key: ConfigKey| self.get(key).unwrap_or_default().to_string();

        Ok(FirebaseConfig {
            api_key: value(ConfigKey::ApiKey),
            auth_domain: value(ConfigKey::AuthDomain),
            project_id: value(ConfigKey::ProjectId),
            storage_bucket: value(ConfigKey::StorageBucket),
            messaging_sender_id: value(ConfigKey::MessagingSenderId),
            app_id: value(ConfigKey::AppId),
            measurement_id: self
                .get(ConfigKey::MeasurementId)
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string),
        })
    }
}

impl std::fmt::Debug for RawConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            map.entry(&key.field_name(), &redact(*key, value));
        }
        map.finish()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// A Firebase web app configuration, in the shape of the config object that
/// the Firebase console hands out.
///
/// Values produced by [`RawConfig::validate`] are always complete. A config
/// deserialized from JSON may not be, which is why apps are only initialized
/// after another [`FirebaseConfig::missing_keys`] check.
///
/// `Debug` only shows a short prefix of the API key and app ID.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    auth_domain: String,
    #[serde(default)]
    project_id: String,
    #[serde(default)]
    storage_bucket: String,
    #[serde(default)]
    messaging_sender_id: String,
    #[serde(default)]
    app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    measurement_id: Option<String>,
}

impl FirebaseConfig {
    /// Parse the config object shown in the Firebase console, e.g.
    /// `{"apiKey": "...", "authDomain": "...", ...}`. Keys that are left out
    /// come back as blank, to be caught by [`FirebaseConfig::missing_keys`].
    pub fn from_json(json: &str) -> Result<Self, BootstrapError> {
        let config: Self = serde_json::from_str(json).context("Invalid Firebase config JSON")?;
        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn auth_domain(&self) -> &str {
        &self.auth_domain
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn storage_bucket(&self) -> &str {
        &self.storage_bucket
    }

    pub fn messaging_sender_id(&self) -> &str {
        &self.messaging_sender_id
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn measurement_id(&self) -> Option<&str> {
        self.measurement_id.as_deref()
    }

    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::ApiKey => Some(self.api_key()),
            ConfigKey::AuthDomain => Some(self.auth_domain()),
            ConfigKey::ProjectId => Some(self.project_id()),
            ConfigKey::StorageBucket => Some(self.storage_bucket()),
            ConfigKey::MessagingSenderId => Some(self.messaging_sender_id()),
            ConfigKey::AppId => Some(self.app_id()),
            ConfigKey::MeasurementId => self.measurement_id(),
        }
    }

    /// The required keys that are blank in this config.
    pub fn missing_keys(&self) -> Vec<ConfigKey> {
        ConfigKey::REQUIRED
            .into_iter()
            .filter(|key| is_blank(self.get(*key)))
            .collect()
    }

    /// The keys that carry a value, required ones first.
    pub fn present_keys(&self) -> Vec<ConfigKey> {
        ConfigKey::ALL
            .into_iter()
            .filter(|key| !is_blank(self.get(*key)))
            .collect()
    }
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("FirebaseConfig");
        for key in ConfigKey::ALL {
            if let Some(value) = self.get(key) {
                s.field(key.field_name(), &redact(key, value));
            }
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers;

    #[test]
    fn complete_record_validates() {
        let config = test_helpers::complete_raw_config().validate().unwrap();

        assert_eq!(config.project_id(), "kindling-test");
        assert_eq!(config.auth_domain(), "kindling-test.firebaseapp.com");
        assert_eq!(config.measurement_id(), None);
    }

    #[test]
    fn single_missing_key_is_the_only_one_reported() {
        let mut raw = RawConfig::new();
        for key in ConfigKey::REQUIRED {
            if key != ConfigKey::ProjectId {
                raw.set(key, "value");
            }
        }

        assert_eq!(raw.missing_keys(), [ConfigKey::ProjectId]);

        let err = raw.validate().unwrap_err();
        assert_eq!(err.missing_keys(), Some(&[ConfigKey::ProjectId][..]));
    }

    #[test]
    fn whitespace_values_are_missing() {
        let mut raw = RawConfig::new();
        for key in ConfigKey::ALL {
            raw.set(key, " \t\n");
        }

        assert_eq!(raw.missing_keys(), ConfigKey::REQUIRED);
        assert!(raw.is_set(ConfigKey::ApiKey), "whitespace is still a raw value");
    }

    #[test]
    fn empty_record_misses_every_required_key() {
        assert_eq!(RawConfig::new().missing_keys(), ConfigKey::REQUIRED);
    }

    #[test]
    fn measurement_id_is_kept_only_when_supplied() {
        let config = test_helpers::complete_raw_config()
            .with(ConfigKey::MeasurementId, "G-ABC123")
            .validate()
            .unwrap();
        assert_eq!(config.measurement_id(), Some("G-ABC123"));

        let config = test_helpers::complete_raw_config()
            .with(ConfigKey::MeasurementId, "  ")
            .validate()
            .unwrap();
        assert_eq!(config.measurement_id(), None);
    }

    #[test]
    fn serializes_to_firebase_config_object() {
        let config = test_helpers::complete_raw_config().validate().unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["projectId"], "kindling-test");
        assert_eq!(json["messagingSenderId"], "123456789012");
        assert!(json.get("measurementId").is_none());
    }

    #[test]
    fn deserialized_config_can_be_incomplete() {
        let config = FirebaseConfig::from_json(
            r#"{
                "apiKey": "AIzaSyD-example-key",
                "authDomain": "",
                "projectId": "kindling-test"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.missing_keys(),
            [
                ConfigKey::AuthDomain,
                ConfigKey::StorageBucket,
                ConfigKey::MessagingSenderId,
                ConfigKey::AppId,
            ]
        );
        assert_eq!(config.present_keys(), [ConfigKey::ApiKey, ConfigKey::ProjectId]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = FirebaseConfig::from_json("{\"apiKey\": 42}").unwrap_err();

        assert!(matches!(err, BootstrapError::Other(_)));
        assert!(err.to_string().contains("Invalid Firebase config JSON"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = test_helpers::complete_raw_config().validate().unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains(test_helpers::API_KEY));
        assert!(!debug.contains(test_helpers::APP_ID));
        assert!(debug.contains("kindling-test.firebaseapp.com"));
    }

    #[test]
    fn reads_from_process_environment() {
        let vars: Vec<(&str, Option<&str>)> = ConfigKey::ALL
            .into_iter()
            .map(|key| {
                let value = match key {
                    ConfigKey::ProjectId => Some("from-env"),
                    ConfigKey::ApiKey => Some(""),
                    _ => None,
                };
                (key.env_var(), value)
            })
            .collect();

        temp_env::with_vars(vars, || {
            let raw = RawConfig::from_env();
            assert_eq!(raw.get(ConfigKey::ProjectId), Some("from-env"));
            assert_eq!(raw.get(ConfigKey::ApiKey), Some(""));
            assert!(!raw.is_set(ConfigKey::ApiKey));
            assert_eq!(raw.get(ConfigKey::AppId), None);
        });
    }
}
