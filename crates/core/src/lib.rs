//! eSocial Bridge Core
//!
//! Wire data model and pure request logic for the mTLS SOAP relay:
//!
//! 1. Validate the inbound request before any network activity
//! 2. Resolve (environment, action) to one of two fixed government endpoints
//! 3. Build the SOAP 1.2 envelope for the selected operation
//!
//! No I/O lives here; the transport is in `esocial-relay`.

mod endpoint;
mod envelope;
mod request;
mod result;

pub use endpoint::{resolve_endpoint, Endpoint};
pub use envelope::{
    build_envelope, normalize_registration_number, Envelope, SOAP_ACTION_DOWNLOAD,
    SOAP_ACTION_QUERY,
};
pub use request::{
    default_reporting_period, Action, Environment, RelayCall, RelayRequest, DEFAULT_EVENT_TYPE,
};
pub use result::RelayResult;

use thiserror::Error;

/// Everything that can terminate a relay call.
///
/// The first four variants are client errors (no network attempted); the
/// rest classify the single transport attempt. Messages are the
/// Portuguese strings of the existing caller contract and must not drift.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Certificado e chave privada são obrigatórios")]
    MissingCredentials,

    #[error("Ambiente inválido: informe producao ou producao-restrita")]
    InvalidEnvironment,

    #[error("Tipo e número de inscrição são obrigatórios")]
    MissingTaxpayerIdentifiers,

    #[error("Ambiente desconhecido: {0}")]
    UnknownEnvironment(String),

    #[error("Falha de conexão com o web service: {0}")]
    Connection(String),

    #[error("O web service respondeu com status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Tempo limite excedido ao aguardar resposta do web service")]
    Timeout,
}

impl RelayError {
    /// True for errors the caller produced (surfaced as HTTP 400),
    /// false for transport/remote failures (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::MissingCredentials
                | RelayError::InvalidEnvironment
                | RelayError::MissingTaxpayerIdentifiers
                | RelayError::UnknownEnvironment(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
