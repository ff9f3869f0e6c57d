//! eSocial Bridge Relay
//!
//! The transport half of the relay: takes a boundary request, runs it
//! through validation, endpoint resolution, and envelope construction
//! (all in `esocial-core`), then performs exactly one mutually
//! authenticated HTTPS POST and maps whatever happens to a
//! [`RelayResult`].
//!
//! ## Guarantees
//!
//! - One attempt per call, no retries. Retrying a non-idempotent
//!   government submission is the caller's decision, never this layer's.
//! - The remote server certificate is always verified against the system
//!   trust store; there is deliberately no switch to turn that off.
//! - Caller credentials live only for the duration of the call and are
//!   never logged or cached.
//! - Every outcome, success or failure, carries elapsed wall-clock time.

mod service;

pub use service::{RelayConfig, RelayService};
