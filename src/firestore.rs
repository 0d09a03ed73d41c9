use std::sync::Arc;

use anyhow::Context;

use crate::{app::FirebaseApp, error::BootstrapError};

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com";
const DEFAULT_DATABASE: &str = "(default)";

/// Handle to the Firestore database of one app.
///
/// Creating it does not contact Firebase.
#[derive(Clone)]
pub struct Firestore(Arc<FirestoreInner>);

struct FirestoreInner {
    client: reqwest::Client,
    host_url: String,
    app_name: String,
    project_id: String,
    root_resource_path: String,
}

impl Firestore {
    pub(crate) fn new(app: &FirebaseApp) -> Result<Self, BootstrapError> {
        Self::with_host(app, FIRESTORE_HOST.to_string(), true)
    }

    /// A handle that talks to the Firestore emulator at `host` (e.g.
    /// `127.0.0.1:8080`) instead of production.
    pub fn with_emulator(app: &FirebaseApp, host: &str) -> Result<Self, BootstrapError> {
        Self::with_host(app, format!("http://{host}"), false)
    }

    fn with_host(
        app: &FirebaseApp,
        host_url: String,
        https_only: bool,
    ) -> Result<Self, BootstrapError> {
        let client = reqwest::Client::builder()
            .https_only(https_only)
            .build()
            .context("Failed to create HTTP client")?;

        let project_id = app.config().project_id().to_string();
        let root_resource_path =
            format!("projects/{project_id}/databases/{DEFAULT_DATABASE}/documents");

        Ok(Self(Arc::new(FirestoreInner {
            client,
            host_url,
            app_name: app.name().to_string(),
            project_id,
            root_resource_path,
        })))
    }

    /// The resource path all documents of the database live under, for
    /// example `projects/my-project/databases/(default)/documents`.
    pub fn root_resource_path(&self) -> &str {
        &self.0.root_resource_path
    }

    /// The REST URL of the document or collection at `path`, relative to the
    /// database root, e.g. `cities/SF/landmarks`.
    pub fn document_url(&self, path: impl AsRef<str>) -> String {
        let path = path.as_ref().trim_matches('/');
        if path.is_empty() {
            format!("{}/v1/{}", self.0.host_url, self.0.root_resource_path)
        } else {
            format!("{}/v1/{}/{path}", self.0.host_url, self.0.root_resource_path)
        }
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.0.client
    }

    pub fn app_name(&self) -> &str {
        &self.0.app_name
    }

    pub fn project_id(&self) -> &str {
        &self.0.project_id
    }

    /// Whether both handles share the same underlying client.
    pub fn same_instance(&self, other: &Firestore) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Firestore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Firestore")
            .field("app_name", &self.0.app_name)
            .field("root_resource_path", &self.0.root_resource_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_helpers, DEFAULT_APP_NAME};

    #[test]
    fn resource_path_points_at_default_database() {
        let app = FirebaseApp::new(DEFAULT_APP_NAME, test_helpers::complete_config());
        let db = app.firestore().unwrap();

        assert_eq!(
            db.root_resource_path(),
            "projects/kindling-test/databases/(default)/documents"
        );
        assert_eq!(db.project_id(), "kindling-test");
    }

    #[test]
    fn document_urls_are_joined_under_the_root() {
        let app = FirebaseApp::new(DEFAULT_APP_NAME, test_helpers::complete_config());
        let db = app.firestore().unwrap();

        assert_eq!(
            db.document_url("/cities/SF/"),
            "https://firestore.googleapis.com/v1/projects/kindling-test/databases/(default)/documents/cities/SF"
        );
        assert_eq!(
            db.document_url(""),
            "https://firestore.googleapis.com/v1/projects/kindling-test/databases/(default)/documents"
        );
    }

    #[test]
    fn emulator_host_replaces_production() {
        let app = FirebaseApp::new(DEFAULT_APP_NAME, test_helpers::complete_config());
        let db = Firestore::with_emulator(&app, "127.0.0.1:8080").unwrap();

        assert!(db
            .document_url("greetings/first")
            .starts_with("http://127.0.0.1:8080/v1/projects/kindling-test/"));
        assert!(!db.same_instance(&app.firestore().unwrap()));
    }
}
