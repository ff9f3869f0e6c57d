//! Fixed endpoint table: (environment, action) → hostname and path

use crate::{Action, Environment, RelayError, Result};

/// One government endpoint: a hostname plus the two service paths it
/// exposes. The table below is the only source of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub hostname: &'static str,
    pub query_path: &'static str,
    pub download_path: &'static str,
}

impl Endpoint {
    pub fn path_for(&self, action: Action) -> &'static str {
        match action {
            Action::Query => self.query_path,
            Action::Download => self.download_path,
        }
    }

    /// Full HTTPS URL for the given action (port 443 implied).
    pub fn url_for(&self, action: Action) -> String {
        format!("https://{}{}", self.hostname, self.path_for(action))
    }
}

const QUERY_PATH: &str = "/servicos/empregador/consultarloteeventos/WsConsultarLoteEventos.svc";
const DOWNLOAD_PATH: &str =
    "/servicos/empregador/consultaridentificadoreseventos/WsConsultarIdentificadoresEventos.svc";

/// Exactly two entries, immutable for the life of the process.
static ENDPOINTS: [(Environment, Endpoint); 2] = [
    (
        Environment::Production,
        Endpoint {
            hostname: "webservices.envio.esocial.gov.br",
            query_path: QUERY_PATH,
            download_path: DOWNLOAD_PATH,
        },
    ),
    (
        Environment::ProductionRestricted,
        Endpoint {
            hostname: "webservices.producaorestrita.esocial.gov.br",
            query_path: QUERY_PATH,
            download_path: DOWNLOAD_PATH,
        },
    ),
];

/// Look up the endpoint for an environment.
///
/// Validation upstream already restricts the environment to the two known
/// values, but the resolver does not assume that: a miss fails closed
/// instead of panicking.
pub fn resolve_endpoint(environment: Environment) -> Result<&'static Endpoint> {
    ENDPOINTS
        .iter()
        .find(|(env, _)| *env == environment)
        .map(|(_, endpoint)| endpoint)
        .ok_or_else(|| RelayError::UnknownEnvironment(environment.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_resolves() {
        let endpoint = resolve_endpoint(Environment::Production).unwrap();
        assert_eq!(endpoint.hostname, "webservices.envio.esocial.gov.br");
    }

    #[test]
    fn test_restricted_resolves() {
        let endpoint = resolve_endpoint(Environment::ProductionRestricted).unwrap();
        assert_eq!(
            endpoint.hostname,
            "webservices.producaorestrita.esocial.gov.br"
        );
    }

    #[test]
    fn test_paths_differ_per_action() {
        let endpoint = resolve_endpoint(Environment::Production).unwrap();
        assert_ne!(
            endpoint.path_for(Action::Query),
            endpoint.path_for(Action::Download)
        );
    }

    #[test]
    fn test_url_includes_scheme_and_path() {
        let endpoint = resolve_endpoint(Environment::Production).unwrap();
        let url = endpoint.url_for(Action::Download);
        assert!(url.starts_with("https://webservices.envio.esocial.gov.br/"));
        assert!(url.ends_with("WsConsultarIdentificadoresEventos.svc"));
    }
}
