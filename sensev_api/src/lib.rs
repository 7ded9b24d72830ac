//! Blocking client for the SenseV gateway JSON API.
//!
//! The gateway authenticates every request with HTTP basic auth, using the
//! API token as username. [`Client`] builds the URL for each call from the
//! configured host and port, sends the request, and returns the parsed JSON
//! body or a typed [`Error`].
//!
//! ```no_run
//! use sensev_api::Client;
//!
//! let client = Client::from_file("sensev.yml")?;
//! let readings = client.get("/readings/")?;
//! let created = client.post("/readings/", &serde_json::json!({ "reading": "ok" }))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the application.

mod client;
pub mod config;
mod errors;
pub use self::client::Client;
pub use self::config::{ApiConfig, ConfigError};
pub use self::errors::{Error, HttpError};
