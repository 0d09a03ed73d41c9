//! # Kindling
//!
//! Kindling gets the client side of a Firebase web app going. It reads the
//! app's configuration from the `NEXT_PUBLIC_FIREBASE_*` environment
//! variables, refuses to continue while any required value is missing, and
//! hands out ready-to-use handles for:
//!
//! - **Firebase Auth**: see [`Auth`]
//! - **Firestore**: see [`Firestore`]
//!
//! ## Getting started
//!
//! ```no_run
//! use kindling::{BootstrapOptions, FirebaseClients};
//!
//! // Read the environment, filling in from `.env.local` where it is silent,
//! // and log which variables were found.
//! let options = BootstrapOptions::default()
//!     .env_file(".env.local")
//!     .diagnostics(true);
//!
//! let FirebaseClients { auth, db, .. } = FirebaseClients::from_env(&options)?;
//!
//! println!("Signing users in at {}", auth.api_url("signInWithPassword"));
//! println!("Documents live under {}", db.root_resource_path());
//! # Ok::<(), kindling::error::BootstrapError>(())
//! ```
//!
//! The configuration variables are:
//!
//! | Variable                                   | Field               |
//! |--------------------------------------------|---------------------|
//! | `NEXT_PUBLIC_FIREBASE_API_KEY`             | `apiKey`            |
//! | `NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN`         | `authDomain`        |
//! | `NEXT_PUBLIC_FIREBASE_PROJECT_ID`          | `projectId`         |
//! | `NEXT_PUBLIC_FIREBASE_STORAGE_BUCKET`      | `storageBucket`     |
//! | `NEXT_PUBLIC_FIREBASE_MESSAGING_SENDER_ID` | `messagingSenderId` |
//! | `NEXT_PUBLIC_FIREBASE_APP_ID`              | `appId`             |
//! | `NEXT_PUBLIC_FIREBASE_MEASUREMENT_ID`      | `measurementId` (optional) |
//!
//! To control where apps are kept, or to stand in for Firebase in tests, use
//! [`bootstrap::initialize`] with your own [`AppRegistry`] and
//! [`AppInitializer`].
//!
//! [`AppRegistry`]: app::AppRegistry
//! [`AppInitializer`]: app::AppInitializer

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod firestore;

/// This module isn't really supposed to be exposed, but we are lacking
/// `#[cfg(doctest)]`, and we can't make it private either since doctests are
/// full-blown integration tests.
///
/// Relevant rust-lang issue: <https://github.com/rust-lang/rust/issues/67295>
pub mod test_helpers;

pub use app::DEFAULT_APP_NAME;
pub use auth::Auth;
pub use bootstrap::{BootstrapOptions, FirebaseClients};
pub use firestore::Firestore;
