use std::io::Write;

use kindling::{
    app::{AppRegistry, FirebaseApp, SdkInitializer, VendorError, CONFIGURATION_NOT_FOUND},
    config::{ConfigKey, FirebaseConfig},
    diagnostics::REMEDIATION_CHECKLIST,
    error::BootstrapError,
    test_helpers, BootstrapOptions, FirebaseClients,
};

fn env_with(overrides: &[(ConfigKey, Option<&str>)]) -> Vec<(&'static str, Option<String>)> {
    let mut vars = test_helpers::complete_env_vars();
    for (key, value) in overrides {
        for (name, current) in vars.iter_mut() {
            if *name == key.env_var() {
                *current = value.map(str::to_string);
            }
        }
    }
    vars
}

fn from_env(vars: Vec<(&'static str, Option<String>)>) -> Result<FirebaseClients, BootstrapError> {
    temp_env::with_vars(vars, || {
        FirebaseClients::from_env_with(
            &AppRegistry::new(),
            &SdkInitializer,
            &BootstrapOptions::default(),
        )
    })
}

#[test]
fn six_required_variables_are_enough() {
    let clients = from_env(env_with(&[(ConfigKey::MeasurementId, None)])).unwrap();

    assert_eq!(clients.app.config().project_id(), "kindling-test");
    assert_eq!(clients.app.config().measurement_id(), None);
    assert_eq!(
        clients.db.root_resource_path(),
        "projects/kindling-test/databases/(default)/documents"
    );
}

#[test]
fn measurement_id_is_picked_up_when_set() {
    let clients = from_env(env_with(&[(ConfigKey::MeasurementId, Some("G-ABC123"))])).unwrap();

    assert_eq!(clients.app.config().measurement_id(), Some("G-ABC123"));
}

#[test]
fn missing_project_id_is_the_only_key_reported() {
    let err = from_env(env_with(&[(ConfigKey::ProjectId, None)])).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("projectId"));
    for key in ConfigKey::REQUIRED {
        if key != ConfigKey::ProjectId {
            assert!(!message.contains(key.field_name()), "{key} in: {message}");
        }
    }
}

#[test]
fn each_missing_key_is_reported_by_name() {
    for missing in ConfigKey::REQUIRED {
        let err = from_env(env_with(&[(missing, None)])).unwrap_err();
        assert_eq!(err.missing_keys(), Some(&[missing][..]));
    }
}

#[test]
fn whitespace_only_values_count_as_missing() {
    let overrides: Vec<_> = ConfigKey::REQUIRED
        .into_iter()
        .map(|key| (key, Some("   ")))
        .collect();

    let err = from_env(env_with(&overrides)).unwrap_err();

    assert_eq!(err.missing_keys(), Some(&ConfigKey::REQUIRED[..]));
    let message = err.to_string();
    for key in ConfigKey::REQUIRED {
        assert!(message.contains(key.field_name()));
    }
}

#[test]
fn env_file_fills_in_the_gaps() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "NEXT_PUBLIC_FIREBASE_PROJECT_ID=from-file").unwrap();
    writeln!(file, "NEXT_PUBLIC_FIREBASE_APP_ID=1:999:web:fromfile").unwrap();

    let vars = env_with(&[(ConfigKey::ProjectId, None)]);
    let clients = temp_env::with_vars(vars, || {
        FirebaseClients::from_env_with(
            &AppRegistry::new(),
            &SdkInitializer,
            &BootstrapOptions::default().env_file(file.path()),
        )
    })
    .unwrap();

    assert_eq!(clients.app.config().project_id(), "from-file");
    assert_eq!(clients.app.config().app_id(), test_helpers::APP_ID);
}

#[test]
fn repeated_bootstrap_reuses_the_app() {
    let registry = AppRegistry::new();
    let options = BootstrapOptions::default();

    let (first, second) = temp_env::with_vars(test_helpers::complete_env_vars(), || {
        let first = FirebaseClients::from_env_with(&registry, &SdkInitializer, &options);
        let second = FirebaseClients::from_env_with(&registry, &SdkInitializer, &options);
        (first, second)
    });

    assert!(first.unwrap().app.ptr_eq(&second.unwrap().app));
}

#[test]
fn configuration_not_found_is_explained() {
    let rejecting = |_: &str, _: &FirebaseConfig| -> Result<FirebaseApp, VendorError> {
        Err(VendorError::new(
            CONFIGURATION_NOT_FOUND,
            "Firebase: Error (auth/configuration-not-found).",
        ))
    };

    let err = temp_env::with_vars(test_helpers::complete_env_vars(), || {
        FirebaseClients::from_env_with(&AppRegistry::new(), &rejecting, &BootstrapOptions::default())
    })
    .unwrap_err();

    assert!(matches!(err, BootstrapError::ConfigurationNotFound { .. }));
    assert!(err.to_string().contains(REMEDIATION_CHECKLIST));
}
