//! eSocial Bridge Server
//!
//! HTTP boundary in front of the relay:
//!
//! - `POST /relay` — JSON relay request in, JSON relay result out.
//!   200 on success, 400 on validation failures, 500 on transport or
//!   remote failures.
//! - `GET /healthcheck` — fixed liveness payload, no dependency checks.
//!
//! Each request is handled independently on the runtime; the only shared
//! state is the stateless relay service handle.

mod routes;
mod settings;

pub use routes::{router, AppState};
pub use settings::{default_settings_path, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to read settings: {0}")]
    ReadSettings(std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseSettings(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
