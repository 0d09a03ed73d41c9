use std::path::PathBuf;

use crate::{
    app::VendorError,
    config::ConfigKey,
    diagnostics::{PresenceSnapshot, REMEDIATION_CHECKLIST},
};

#[derive(thiserror::Error)]
pub enum BootstrapError {
    #[error(
        "Missing required Firebase configuration: {}. Please check your .env.local file and \
         ensure all NEXT_PUBLIC_FIREBASE_* variables are set.",
        join_keys(.missing)
    )]
    Configuration { missing: Vec<ConfigKey> },

    #[error("{}", REMEDIATION_CHECKLIST)]
    ConfigurationNotFound { presence: PresenceSnapshot },

    #[error("Firebase app was not initialized: {0}")]
    Initialization(String),

    #[error("Failed to read env file '{}'", .path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error(transparent)]
    Vendor(#[from] VendorError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BootstrapError {
    /// The keys that were missing, if this is a configuration error.
    pub fn missing_keys(&self) -> Option<&[ConfigKey]> {
        match self {
            BootstrapError::Configuration { missing } => Some(missing),
            _ => None,
        }
    }
}

fn join_keys(keys: &[ConfigKey]) -> String {
    keys.iter()
        .map(|k| k.field_name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Debug for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

// Taken from https://www.lpalmieri.com/posts/error-handling-rust/#internal-errors
fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
