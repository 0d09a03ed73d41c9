use std::{collections::HashMap, path::Path};

use crate::error::BootstrapError;

use super::{ConfigKey, RawConfig};

impl RawConfig {
    /// Read the process environment, then fill in whatever it lacks from the
    /// dotenv file at `path` (typically `.env.local`). See
    /// [`RawConfig::with_env_file`].
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, BootstrapError> {
        Self::from_env().with_env_file(path)
    }

    /// Fill in values that this record does not have yet from the dotenv file
    /// at `path`. Values already present, even empty ones, win over the file.
    ///
    /// The file is parsed without touching the process environment. A file
    /// that doesn't exist leaves the record unchanged, while a file that
    /// can't be parsed is an error.
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Result<Self, BootstrapError> {
        let path = path.as_ref();

        let Some(file_values) = read_env_file(path)? else {
            tracing::debug!("No env file at {}", path.display());
            return Ok(self);
        };

        for key in ConfigKey::ALL {
            if self.get(key).is_some() {
                continue;
            }
            if let Some(value) = file_values.get(key.env_var()) {
                self.set(key, value.as_str());
            }
        }

        Ok(self)
    }
}

fn read_env_file(path: &Path) -> Result<Option<HashMap<String, String>>, BootstrapError> {
    let env_file_err = |source: dotenvy::Error| BootstrapError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => return Ok(None),
        Err(err) => return Err(env_file_err(err)),
    };

    let values = iter
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(env_file_err)?;

    Ok(Some(values))
}
