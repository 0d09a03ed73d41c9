//! # Apps
//!
//! A [`FirebaseApp`] is one initialized connection context for a Firebase
//! project, from which the [`Auth`] and [`Firestore`] handles are derived.
//!
//! Apps live in an [`AppRegistry`], which holds at most one app per name and
//! hands back the existing app when asked to initialize it again. Registries
//! are passed around explicitly; [`AppRegistry::global`] exists for
//! programs that want a single registry for the whole process.
//!
//! ```
//! use kindling::{app::{AppRegistry, SdkInitializer}, DEFAULT_APP_NAME};
//!
//! let registry = AppRegistry::new();
//! let config = kindling::test_helpers::complete_config();
//!
//! let first = registry.get_or_initialize(DEFAULT_APP_NAME, &config, &SdkInitializer)?;
//! let second = registry.get_or_initialize(DEFAULT_APP_NAME, &config, &SdkInitializer)?;
//!
//! assert!(first.ptr_eq(&second));
//! # Ok::<(), kindling::error::BootstrapError>(())
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use once_cell::sync::{Lazy, OnceCell};

use crate::{auth::Auth, config::FirebaseConfig, error::BootstrapError, firestore::Firestore};

mod initializer;

pub use initializer::{AppInitializer, SdkInitializer, VendorError, CONFIGURATION_NOT_FOUND};

/// The name apps get unless another one is asked for.
pub const DEFAULT_APP_NAME: &str = "[DEFAULT]";

static GLOBAL_REGISTRY: Lazy<AppRegistry> = Lazy::new(AppRegistry::new);

/// A handle to an initialized Firebase app. Clones refer to the same app.
#[derive(Clone)]
pub struct FirebaseApp(Arc<FirebaseAppInner>);

struct FirebaseAppInner {
    name: String,
    config: FirebaseConfig,
    auth: OnceCell<Auth>,
    firestore: OnceCell<Firestore>,
}

impl FirebaseApp {
    pub fn new(name: impl Into<String>, config: FirebaseConfig) -> Self {
        Self(Arc::new(FirebaseAppInner {
            name: name.into(),
            config,
            auth: OnceCell::new(),
            firestore: OnceCell::new(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.0.config
    }

    /// Whether both handles refer to the same app.
    pub fn ptr_eq(&self, other: &FirebaseApp) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The Firebase Auth handle for this app. Created on first use and
    /// shared afterwards.
    pub fn auth(&self) -> Result<Auth, BootstrapError> {
        self.0.auth.get_or_try_init(|| Auth::new(self)).cloned()
    }

    /// The Firestore handle for this app. Created on first use and shared
    /// afterwards.
    pub fn firestore(&self) -> Result<Firestore, BootstrapError> {
        self.0
            .firestore
            .get_or_try_init(|| Firestore::new(self))
            .cloned()
    }
}

impl std::fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.name())
            .field("config", self.config())
            .finish()
    }
}

/// Holds initialized apps by name.
#[derive(Default)]
pub struct AppRegistry {
    apps: Mutex<HashMap<String, FirebaseApp>>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry shared by the whole process.
    pub fn global() -> &'static AppRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn get(&self, name: &str) -> Result<Option<FirebaseApp>, BootstrapError> {
        Ok(self.lock()?.get(name).cloned())
    }

    /// Names of the apps initialized so far, sorted.
    pub fn apps(&self) -> Result<Vec<String>, BootstrapError> {
        let mut names: Vec<_> = self.lock()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Return the app called `name`, initializing it from `config` if the
    /// registry doesn't have it yet.
    ///
    /// An existing app is returned as-is, even if it was initialized from a
    /// different config. A new app is only created if `config` has a value
    /// for every required key, and is only registered once its Auth and
    /// Firestore handles could be derived.
    pub fn get_or_initialize(
        &self,
        name: &str,
        config: &FirebaseConfig,
        initializer: &impl AppInitializer,
    ) -> Result<FirebaseApp, BootstrapError> {
        let mut apps = self.lock()?;

        if let Some(app) = apps.get(name) {
            tracing::debug!("Reusing existing Firebase app '{name}'");
            return Ok(app.clone());
        }

        let missing = config.missing_keys();
        if !missing.is_empty() {
            return Err(BootstrapError::Configuration { missing });
        }

        let app = initializer.initialize_app(name, config)?;

        if app.name() != name {
            return Err(BootstrapError::Initialization(format!(
                "requested app '{name}' but got '{}'",
                app.name()
            )));
        }

        // An app only becomes visible once both of its handles exist.
        app.auth()?;
        app.firestore()?;

        tracing::debug!(
            "Initialized Firebase app '{name}' for project '{}'",
            config.project_id()
        );
        apps.insert(name.to_string(), app.clone());

        Ok(app)
    }

    /// Remove the app called `name`, so the next request initializes a new
    /// one. Handles to the removed app stay usable.
    pub fn delete_app(&self, name: &str) -> Result<Option<FirebaseApp>, BootstrapError> {
        Ok(self.lock()?.remove(name))
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, FirebaseApp>>, BootstrapError> {
        self.apps.lock().map_err(|_| {
            BootstrapError::Initialization(
                "the app registry is unusable after a panic while it was locked".to_string(),
            )
        })
    }
}
