use std::path::PathBuf;

use crate::app::DEFAULT_APP_NAME;

#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub app_name: String,
    /// Dotenv file whose values fill in what the environment lacks.
    pub env_file: Option<PathBuf>,
    /// Log a presence report of the config and a warning per missing key.
    pub diagnostics: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            env_file: None,
            diagnostics: false,
        }
    }
}

impl BootstrapOptions {
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn env_file(mut self, env_file: impl Into<PathBuf>) -> Self {
        self.env_file = Some(env_file.into());
        self
    }

    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}
