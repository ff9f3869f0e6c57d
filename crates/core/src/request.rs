//! Inbound relay request: wire shape, validation, defaults

use chrono::Utc;
use serde::Deserialize;

use crate::{RelayError, Result};

/// Event type requested when the caller does not name one
/// (S-5011: consolidated social-contribution totals per period).
pub const DEFAULT_EVENT_TYPE: &str = "S-5011";

/// Remote operation selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Poll batch processing status (fixed-shape envelope)
    Query,
    /// Fetch event identifiers for a taxpayer and period
    Download,
}

/// Target portal environment. Exactly two exist; anything else is
/// rejected before the network is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    ProductionRestricted,
}

impl Environment {
    pub const PRODUCTION: &'static str = "producao";
    pub const PRODUCTION_RESTRICTED: &'static str = "producao-restrita";

    /// Parse a wire identifier; `None` for anything outside the two
    /// recognized values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            Self::PRODUCTION => Some(Self::Production),
            Self::PRODUCTION_RESTRICTED => Some(Self::ProductionRestricted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => Self::PRODUCTION,
            Self::ProductionRestricted => Self::PRODUCTION_RESTRICTED,
        }
    }
}

/// Relay request as received at the HTTP boundary.
///
/// Every field is optional here: missing-field outcomes are part of the
/// caller contract and must come out of [`RelayRequest::validate`] as
/// distinct relay errors, not as deserialization failures.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    /// `"consulta"` selects [`Action::Query`]; anything else (or absence)
    /// is a download, matching the existing caller contract
    pub action: Option<String>,
    /// `"producao"` or `"producao-restrita"`
    pub environment: Option<String>,
    /// Client certificate, PEM
    pub client_certificate_pem: Option<String>,
    /// Client private key, PKCS#8 PEM
    pub client_private_key_pem: Option<String>,
    /// Taxpayer registration type (1 = CNPJ, 2 = CPF)
    pub taxpayer_registration_type: Option<String>,
    /// Taxpayer registration number
    pub taxpayer_registration_number: Option<String>,
    /// Reporting period, `YYYY-MM`; defaults to the current UTC month
    pub reporting_period: Option<String>,
    /// Event type code; defaults to [`DEFAULT_EVENT_TYPE`]
    pub event_type: Option<String>,
}

/// A relay request that passed validation and had defaults applied.
///
/// Lives for exactly one call; the certificate material inside is never
/// cached, logged, or retained. No `Debug` impl, so the key cannot end
/// up in log output by accident.
#[derive(Clone)]
pub struct RelayCall {
    pub action: Action,
    pub environment: Environment,
    pub certificate_pem: String,
    pub private_key_pem: String,
    pub registration_type: String,
    pub registration_number: String,
    pub reporting_period: String,
    pub event_type: String,
}

impl RelayRequest {
    /// Validate the boundary request and apply defaults.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// credentials, then environment, then taxpayer identifiers. Pure;
    /// nothing here touches the network.
    pub fn validate(self) -> Result<RelayCall> {
        let certificate_pem = non_empty(self.client_certificate_pem);
        let private_key_pem = non_empty(self.client_private_key_pem);
        let (certificate_pem, private_key_pem) = match (certificate_pem, private_key_pem) {
            (Some(cert), Some(key)) => (cert, key),
            _ => return Err(RelayError::MissingCredentials),
        };

        let environment = self
            .environment
            .as_deref()
            .and_then(Environment::parse)
            .ok_or(RelayError::InvalidEnvironment)?;

        let registration_type = non_empty(self.taxpayer_registration_type);
        let registration_number = non_empty(self.taxpayer_registration_number);
        let (registration_type, registration_number) = match (registration_type, registration_number)
        {
            (Some(tp), Some(nr)) => (tp, nr),
            _ => return Err(RelayError::MissingTaxpayerIdentifiers),
        };

        let action = match self.action.as_deref() {
            Some("consulta") => Action::Query,
            _ => Action::Download,
        };

        Ok(RelayCall {
            action,
            environment,
            certificate_pem,
            private_key_pem,
            registration_type,
            registration_number,
            reporting_period: self
                .reporting_period
                .unwrap_or_else(default_reporting_period),
            event_type: self.event_type.unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
        })
    }
}

/// Current UTC year-month, `YYYY-MM`.
///
/// UTC is a documented choice: the period lands in the generated
/// envelope, so it must not depend on the server's local wall clock.
pub fn default_reporting_period() -> String {
    Utc::now().format("%Y-%m").to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
