use std::fmt::Display;

/// One of the named settings in a Firebase web app configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    ApiKey,
    AuthDomain,
    ProjectId,
    StorageBucket,
    MessagingSenderId,
    AppId,
    /// Google Analytics measurement ID. Optional since Firebase JS SDK v7.20.0.
    MeasurementId,
}

impl ConfigKey {
    /// Every key, in the order Firebase lists them in a web app config.
    pub const ALL: [ConfigKey; 7] = [
        ConfigKey::ApiKey,
        ConfigKey::AuthDomain,
        ConfigKey::ProjectId,
        ConfigKey::StorageBucket,
        ConfigKey::MessagingSenderId,
        ConfigKey::AppId,
        ConfigKey::MeasurementId,
    ];

    /// The keys that must be present and non-blank before an app can be
    /// initialized.
    pub const REQUIRED: [ConfigKey; 6] = [
        ConfigKey::ApiKey,
        ConfigKey::AuthDomain,
        ConfigKey::ProjectId,
        ConfigKey::StorageBucket,
        ConfigKey::MessagingSenderId,
        ConfigKey::AppId,
    ];

    /// The field name used in the JSON config object, e.g. `projectId`.
    pub fn field_name(self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "apiKey",
            ConfigKey::AuthDomain => "authDomain",
            ConfigKey::ProjectId => "projectId",
            ConfigKey::StorageBucket => "storageBucket",
            ConfigKey::MessagingSenderId => "messagingSenderId",
            ConfigKey::AppId => "appId",
            ConfigKey::MeasurementId => "measurementId",
        }
    }

    /// The environment variable the value is read from.
    pub fn env_var(self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "NEXT_PUBLIC_FIREBASE_API_KEY",
            ConfigKey::AuthDomain => "NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN",
            ConfigKey::ProjectId => "NEXT_PUBLIC_FIREBASE_PROJECT_ID",
            ConfigKey::StorageBucket => "NEXT_PUBLIC_FIREBASE_STORAGE_BUCKET",
            ConfigKey::MessagingSenderId => "NEXT_PUBLIC_FIREBASE_MESSAGING_SENDER_ID",
            ConfigKey::AppId => "NEXT_PUBLIC_FIREBASE_APP_ID",
            ConfigKey::MeasurementId => "NEXT_PUBLIC_FIREBASE_MEASUREMENT_ID",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, ConfigKey::MeasurementId)
    }

    /// Whether the value should be redacted when reported.
    pub(crate) fn is_secret(self) -> bool {
        matches!(self, ConfigKey::ApiKey | ConfigKey::AppId)
    }
}

impl Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_measurement_id_is_optional() {
        let optional: Vec<_> = ConfigKey::ALL
            .into_iter()
            .filter(|k| !k.is_required())
            .collect();

        assert_eq!(optional, [ConfigKey::MeasurementId]);
        assert!(ConfigKey::REQUIRED.iter().all(|k| k.is_required()));
    }

    #[test]
    fn env_vars_share_the_public_firebase_prefix() {
        for key in ConfigKey::ALL {
            assert!(key.env_var().starts_with("NEXT_PUBLIC_FIREBASE_"));
        }
    }

    #[test]
    fn displays_as_field_name() {
        assert_eq!(ConfigKey::MessagingSenderId.to_string(), "messagingSenderId");
    }
}
