use crate::config::FirebaseConfig;

use super::FirebaseApp;

/// The error code Firebase uses when a project has no configuration for the
/// requested service.
pub const CONFIGURATION_NOT_FOUND: &str = "auth/configuration-not-found";

/// An error reported by Firebase itself, as opposed to one raised while
/// reading or validating the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Firebase: {message} ({code})")]
pub struct VendorError {
    pub code: String,
    pub message: String,
}

impl VendorError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_configuration_not_found(&self) -> bool {
        self.code == CONFIGURATION_NOT_FOUND || self.message.contains("configuration-not-found")
    }
}

/// Constructs apps from a config. This is the seam between the bootstrap and
/// Firebase, so tests can stand in for it.
pub trait AppInitializer {
    fn initialize_app(&self, name: &str, config: &FirebaseConfig)
        -> Result<FirebaseApp, VendorError>;
}

impl<F> AppInitializer for F
where
    F: Fn(&str, &FirebaseConfig) -> Result<FirebaseApp, VendorError>,
{
    fn initialize_app(
        &self,
        name: &str,
        config: &FirebaseConfig,
    ) -> Result<FirebaseApp, VendorError> {
        self(name, config)
    }
}

/// Initializes apps the way the Firebase SDK does, rejecting configs it
/// would refuse to connect with.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkInitializer;

impl AppInitializer for SdkInitializer {
    fn initialize_app(
        &self,
        name: &str,
        config: &FirebaseConfig,
    ) -> Result<FirebaseApp, VendorError> {
        if name.trim().is_empty() {
            return Err(invalid_argument("App name must not be empty"));
        }

        let auth_domain = config.auth_domain();
        if auth_domain.contains("://") || auth_domain.contains('/') {
            return Err(invalid_argument(format!(
                "authDomain must be a host name without scheme or path, got '{auth_domain}'"
            )));
        }

        if config.project_id().contains('/') {
            return Err(invalid_argument("projectId must not contain '/'"));
        }

        if reqwest::header::HeaderValue::from_str(config.api_key()).is_err() {
            return Err(VendorError::new(
                "auth/invalid-api-key",
                "API key is not a valid header value",
            ));
        }

        Ok(FirebaseApp::new(name, config.clone()))
    }
}

fn invalid_argument(message: impl Into<String>) -> VendorError {
    VendorError::new("app/invalid-app-argument", message)
}
