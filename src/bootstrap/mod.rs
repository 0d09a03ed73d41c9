//! # Bootstrap
//!
//! Turns a [`RawConfig`] into ready-to-use [`FirebaseClients`]:
//!
//! 1. optionally log a presence report of the config,
//! 2. validate it, failing with every missing key,
//! 3. reuse the app from the registry or initialize a new one,
//! 4. derive the Auth and Firestore handles from the app.
//!
//! Every failure is returned to the caller. Nothing is retried, and no
//! handle is handed out unless all of them could be created.
//!
//! ```
//! use kindling::{
//!     app::{AppRegistry, SdkInitializer},
//!     bootstrap::{initialize, BootstrapOptions},
//! };
//!
//! let registry = AppRegistry::new();
//! let raw = kindling::test_helpers::complete_raw_config();
//!
//! let clients = initialize(&raw, &registry, &SdkInitializer, &BootstrapOptions::default())?;
//!
//! assert_eq!(clients.auth.project_id(), "kindling-test");
//! assert_eq!(
//!     clients.db.root_resource_path(),
//!     "projects/kindling-test/databases/(default)/documents"
//! );
//! # Ok::<(), kindling::error::BootstrapError>(())
//! ```

use crate::{
    app::{AppInitializer, AppRegistry, FirebaseApp, SdkInitializer},
    auth::Auth,
    config::{FirebaseConfig, RawConfig},
    diagnostics::{log_config_check, PresenceSnapshot},
    error::BootstrapError,
    firestore::Firestore,
};

mod options;

pub use options::BootstrapOptions;

/// The app and the service handles derived from it.
#[derive(Debug, Clone)]
pub struct FirebaseClients {
    pub app: FirebaseApp,
    pub auth: Auth,
    pub db: Firestore,
}

impl FirebaseClients {
    /// Bootstrap from the process environment (and `options.env_file`, if
    /// given) into the process-wide [`AppRegistry::global`].
    pub fn from_env(options: &BootstrapOptions) -> Result<Self, BootstrapError> {
        Self::from_env_with(AppRegistry::global(), &SdkInitializer, options)
    }

    /// Bootstrap from the process environment (and `options.env_file`, if
    /// given) into `registry`.
    pub fn from_env_with(
        registry: &AppRegistry,
        initializer: &impl AppInitializer,
        options: &BootstrapOptions,
    ) -> Result<Self, BootstrapError> {
        let raw = match &options.env_file {
            Some(path) => RawConfig::from_env_file(path)?,
            None => RawConfig::from_env(),
        };

        initialize(&raw, registry, initializer, options)
    }
}

/// Validate `raw`, get or initialize the app named in `options` from
/// `registry`, and derive its service handles.
pub fn initialize(
    raw: &RawConfig,
    registry: &AppRegistry,
    initializer: &impl AppInitializer,
    options: &BootstrapOptions,
) -> Result<FirebaseClients, BootstrapError> {
    if options.diagnostics {
        log_config_check(raw);
    }

    let config = raw.validate().map_err(|e| {
        tracing::error!("Firebase configuration error: {e}");
        e
    })?;

    let app = registry
        .get_or_initialize(&options.app_name, &config, initializer)
        .map_err(|e| report_initialization_error(e, raw, &config))?;

    let auth = app.auth()?;
    let db = app.firestore()?;

    Ok(FirebaseClients { app, auth, db })
}

fn report_initialization_error(
    err: BootstrapError,
    raw: &RawConfig,
    config: &FirebaseConfig,
) -> BootstrapError {
    let code = match &err {
        BootstrapError::Vendor(vendor_err) => vendor_err.code.as_str(),
        _ => "",
    };
    let present_keys: Vec<_> = config
        .present_keys()
        .into_iter()
        .map(|key| key.field_name())
        .collect();

    tracing::error!(code, ?present_keys, "Firebase initialization error: {err}");

    match err {
        BootstrapError::Vendor(vendor_err) if vendor_err.is_configuration_not_found() => {
            let presence = PresenceSnapshot::of(raw);
            tracing::error!(%presence, "Firebase configuration not found");

            BootstrapError::ConfigurationNotFound { presence }
        }
        other => other,
    }
}
