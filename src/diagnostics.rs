//! Reporting on the state of a configuration without leaking it.
//!
//! Secrets (the API key and the app ID) are never shown beyond a short prefix.

use std::fmt::Display;

use crate::config::{ConfigKey, FirebaseConfig, RawConfig};

/// How many characters of a secret value may appear in reports.
pub const SECRET_PREFIX_LEN: usize = 10;

/// What to check when Firebase reports that it can't find the configuration.
pub const REMEDIATION_CHECKLIST: &str = "Firebase configuration not found. Please check:\n\
    1. .env.local file exists in project root\n\
    2. All NEXT_PUBLIC_FIREBASE_* variables are set (no empty values)\n\
    3. The process was restarted after adding env variables\n\
    4. No spaces around = sign in .env.local";

/// Render `value` in a form that is safe to log.
pub(crate) fn redact(key: ConfigKey, value: &str) -> String {
    if !key.is_secret() {
        return value.to_string();
    }

    let prefix: String = value.chars().take(SECRET_PREFIX_LEN).collect();
    format!("{prefix}...")
}

/// Whether each required variable was set at all. Whitespace counts as set,
/// so this shows what the process actually received rather than what passed
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceSnapshot(Vec<(ConfigKey, bool)>);

impl PresenceSnapshot {
    pub fn of(raw: &RawConfig) -> Self {
        Self(
            ConfigKey::REQUIRED
                .into_iter()
                .map(|key| (key, raw.is_set(key)))
                .collect(),
        )
    }

    pub fn is_set(&self, key: ConfigKey) -> bool {
        self.0.iter().any(|(k, set)| *k == key && *set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, bool)> + '_ {
        self.0.iter().copied()
    }
}

impl Display for PresenceSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (key, set) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {set}")?;
            first = false;
        }
        Ok(())
    }
}

/// A line per key showing whether it has a value and, if so, a redacted form
/// of it:
///
/// ```text
/// apiKey: ✓ (AIzaSyD-ex...)
/// authDomain: ✓ (kindling-test.firebaseapp.com)
/// projectId: ✗ MISSING
/// ```
pub struct ConfigReport<'a> {
    entries: Vec<(ConfigKey, Option<&'a str>)>,
}

impl<'a> ConfigReport<'a> {
    /// Report on a raw record. Blank values are reported as missing.
    pub fn of_raw(raw: &'a RawConfig) -> Self {
        Self::from_lookup(|key| raw.get(key))
    }

    pub fn of_config(config: &'a FirebaseConfig) -> Self {
        Self::from_lookup(|key| config.get(key))
    }

    fn from_lookup(lookup: impl Fn(ConfigKey) -> Option<&'a str>) -> Self {
        let entries = ConfigKey::ALL
            .into_iter()
            .map(|key| (key, lookup(key).filter(|v| !v.trim().is_empty())))
            .collect();

        Self { entries }
    }
}

impl Display for ConfigReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match value {
                Some(value) => write!(f, "{key}: ✓ ({})", redact(*key, value))?,
                None if key.is_required() => write!(f, "{key}: ✗ MISSING")?,
                None => write!(f, "{key}: - (not set)")?,
            }
        }
        Ok(())
    }
}

/// Emit the presence flags and the redacted report for `raw`, and a warning
/// for every missing key.
pub(crate) fn log_config_check(raw: &RawConfig) {
    tracing::info!(
        presence = %PresenceSnapshot::of(raw),
        "Firebase config check:\n{}",
        ConfigReport::of_raw(raw)
    );

    for key in raw.missing_keys() {
        tracing::warn!("Missing Firebase config: {key} ({})", key.env_var());
    }
}
