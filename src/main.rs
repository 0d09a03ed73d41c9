use std::process::ExitCode;

use kindling::{
    app::{AppRegistry, SdkInitializer},
    diagnostics::ConfigReport,
    BootstrapOptions, FirebaseClients,
};

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let env_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| ".env.local".to_string());

    let options = BootstrapOptions::default()
        .env_file(env_file)
        .diagnostics(true);

    match FirebaseClients::from_env_with(&AppRegistry::new(), &SdkInitializer, &options) {
        Ok(clients) => {
            println!("Firebase app '{}' is ready", clients.app.name());
            println!("{}", ConfigReport::of_config(clients.app.config()));
            println!("auth: {}", clients.auth.api_url("{method}"));
            println!("db:   {}", clients.db.document_url(""));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
