use std::sync::Arc;

use anyhow::Context;

use crate::{app::FirebaseApp, app::VendorError, error::BootstrapError};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts";

/// Handle to Firebase Auth for one app.
///
/// It carries an HTTP client that sends the app's API key with every request
/// to the Identity Toolkit API. Creating it does not contact Firebase.
#[derive(Clone)]
pub struct Auth(Arc<AuthInner>);

struct AuthInner {
    client: reqwest::Client,
    api_url: String,
    app_name: String,
    auth_domain: String,
    project_id: String,
}

impl Auth {
    pub(crate) fn new(app: &FirebaseApp) -> Result<Self, BootstrapError> {
        let client = build_client(app.config().api_key(), true)?;
        Ok(Self::from_parts(app, client, IDENTITY_TOOLKIT_URL.to_string()))
    }

    /// A handle that talks to the Auth emulator at `host` (e.g.
    /// `127.0.0.1:9099`) instead of production.
    pub fn with_emulator(app: &FirebaseApp, host: &str) -> Result<Self, BootstrapError> {
        // The emulator only serves plain HTTP.
        let client = build_client(app.config().api_key(), false)?;
        let api_url = format!("http://{host}/identitytoolkit.googleapis.com/v1/accounts");
        Ok(Self::from_parts(app, client, api_url))
    }

    fn from_parts(app: &FirebaseApp, client: reqwest::Client, api_url: String) -> Self {
        let config = app.config();
        Self(Arc::new(AuthInner {
            client,
            api_url,
            app_name: app.name().to_string(),
            auth_domain: config.auth_domain().to_string(),
            project_id: config.project_id().to_string(),
        }))
    }

    /// The URL of an Identity Toolkit accounts method, such as `signUp`.
    pub fn api_url(&self, method: impl AsRef<str>) -> String {
        format!("{}:{}", self.0.api_url, method.as_ref())
    }

    /// The HTTP client carrying the API key.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.0.client
    }

    pub fn app_name(&self) -> &str {
        &self.0.app_name
    }

    pub fn auth_domain(&self) -> &str {
        &self.0.auth_domain
    }

    pub fn project_id(&self) -> &str {
        &self.0.project_id
    }

    /// Whether both handles share the same underlying client.
    pub fn same_instance(&self, other: &Auth) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("app_name", &self.0.app_name)
            .field("auth_domain", &self.0.auth_domain)
            .field("api_url", &self.0.api_url)
            .finish_non_exhaustive()
    }
}

fn build_client(api_key: &str, https_only: bool) -> Result<reqwest::Client, BootstrapError> {
    let mut default_headers = reqwest::header::HeaderMap::new();

    let mut api_key_header = reqwest::header::HeaderValue::from_str(api_key)
        .map_err(|_| VendorError::new("auth/invalid-api-key", "API key is not a valid header value"))?;
    api_key_header.set_sensitive(true);
    default_headers.insert("X-goog-api-key", api_key_header);

    let client = reqwest::Client::builder()
        .https_only(https_only)
        .default_headers(default_headers)
        .build()
        .context("Failed to create HTTP client")?;

    Ok(client)
}
