//! SOAP 1.2 envelope construction
//!
//! Element names, namespaces, and operation identifiers below are wire
//! constants defined by the portal's WSDL. The remote dispatcher rejects
//! anything that diverges, so they are kept as literal text rather than
//! assembled from parts.

use crate::{Action, RelayCall};

/// `SOAPAction` value for the batch-status query operation.
pub const SOAP_ACTION_QUERY: &str = "http://www.esocial.gov.br/servicos/empregador/lote/eventos/envio/consulta/retornoProcessamento/v1_1_0/ServicoConsultarLoteEventos/ConsultarLoteEventos";

/// `SOAPAction` value for the event-identifier download operation.
pub const SOAP_ACTION_DOWNLOAD: &str = "http://www.esocial.gov.br/servicos/empregador/consulta/identificadores-eventos/v1_0_0/ServicoConsultarIdentificadoresEventos/ConsultarIdentificadoresEventosPorPeriodo";

/// A built request body plus the operation header the transport must send
/// with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub body: String,
    pub soap_action: &'static str,
}

/// Build the envelope for a validated call.
pub fn build_envelope(call: &RelayCall) -> Envelope {
    match call.action {
        Action::Query => Envelope {
            body: query_envelope(),
            soap_action: SOAP_ACTION_QUERY,
        },
        Action::Download => Envelope {
            body: download_envelope(
                &call.registration_type,
                &normalize_registration_number(&call.registration_number),
                &call.reporting_period,
                &call.event_type,
            ),
            soap_action: SOAP_ACTION_DOWNLOAD,
        },
    }
}

/// Strip non-digits and truncate to the 8-digit registration root.
///
/// `"12.345.678/0001-99"` becomes `"12345678"`.
pub fn normalize_registration_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(8).collect()
}

/// Query envelope. The tracking protocol is the constant `"1"`: the
/// existing contract never passes a caller-supplied protocol number, so
/// the shape is identical for every call.
fn query_envelope() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="utf-8"?>"#,
        r#"<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope" xmlns:v1="http://www.esocial.gov.br/servicos/empregador/lote/eventos/envio/consulta/retornoProcessamento/v1_1_0">"#,
        "<soap:Header/>",
        "<soap:Body>",
        "<v1:ConsultarLoteEventos>",
        "<v1:consulta>",
        r#"<eSocial xmlns="http://www.esocial.gov.br/schema/lote/eventos/envio/consulta/retornoProcessamento/v1_0_0">"#,
        "<consultaLoteEventos>",
        "<protocoloEnvio>1</protocoloEnvio>",
        "</consultaLoteEventos>",
        "</eSocial>",
        "</v1:consulta>",
        "</v1:ConsultarLoteEventos>",
        "</soap:Body>",
        "</soap:Envelope>",
    )
    .to_string()
}

/// Download envelope. Identifiers are inserted verbatim, without XML
/// escaping, to match what the remote service's strict parser already
/// accepts; they are numeric in practice.
fn download_envelope(
    registration_type: &str,
    registration_number: &str,
    reporting_period: &str,
    event_type: &str,
) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope" xmlns:v1="http://www.esocial.gov.br/servicos/empregador/consulta/identificadores-eventos/v1_0_0">"#,
            "<soap:Header/>",
            "<soap:Body>",
            "<v1:ConsultarIdentificadoresEventosPorPeriodo>",
            "<v1:ideEmpregador>",
            "<v1:tpInsc>{tp_insc}</v1:tpInsc>",
            "<v1:nrInsc>{nr_insc}</v1:nrInsc>",
            "</v1:ideEmpregador>",
            "<v1:consultaEvtsPorPeriodo>",
            "<v1:tpEvt>{tp_evt}</v1:tpEvt>",
            "<v1:perApur>{per_apur}</v1:perApur>",
            "</v1:consultaEvtsPorPeriodo>",
            "</v1:ConsultarIdentificadoresEventosPorPeriodo>",
            "</soap:Body>",
            "</soap:Envelope>",
        ),
        tp_insc = registration_type,
        nr_insc = registration_number,
        tp_evt = event_type,
        per_apur = reporting_period,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Environment};

    fn call(action: Action) -> RelayCall {
        RelayCall {
            action,
            environment: Environment::Production,
            certificate_pem: "CERT".to_string(),
            private_key_pem: "KEY".to_string(),
            registration_type: "1".to_string(),
            registration_number: "12.345.678/0001-99".to_string(),
            reporting_period: "2024-03".to_string(),
            event_type: "S-5011".to_string(),
        }
    }

    #[test]
    fn test_normalize_strips_punctuation_and_truncates() {
        assert_eq!(normalize_registration_number("12.345.678/0001-99"), "12345678");
        assert_eq!(normalize_registration_number("987654321"), "98765432");
        assert_eq!(normalize_registration_number("12345"), "12345");
        assert_eq!(normalize_registration_number("abc"), "");
    }

    #[test]
    fn test_download_envelope_carries_normalized_fields() {
        let envelope = build_envelope(&call(Action::Download));
        assert!(envelope.body.contains("<v1:nrInsc>12345678</v1:nrInsc>"));
        assert!(envelope.body.contains("<v1:tpInsc>1</v1:tpInsc>"));
        assert!(envelope.body.contains("<v1:perApur>2024-03</v1:perApur>"));
        assert!(envelope.body.contains("<v1:tpEvt>S-5011</v1:tpEvt>"));
        assert_eq!(envelope.soap_action, SOAP_ACTION_DOWNLOAD);
    }

    #[test]
    fn test_query_envelope_ignores_taxpayer_fields() {
        let a = build_envelope(&call(Action::Query));
        let mut other = call(Action::Query);
        other.registration_number = "99.999.999/9999-99".to_string();
        other.reporting_period = "1999-01".to_string();
        let b = build_envelope(&other);

        // Query never incorporates request-specific identifiers.
        assert_eq!(a.body, b.body);
        assert!(a.body.contains("<protocoloEnvio>1</protocoloEnvio>"));
        assert_eq!(a.soap_action, SOAP_ACTION_QUERY);
    }

    #[test]
    fn test_envelopes_are_soap12() {
        for action in [Action::Query, Action::Download] {
            let envelope = build_envelope(&call(action));
            assert!(envelope
                .body
                .contains("http://www.w3.org/2003/05/soap-envelope"));
            assert!(envelope.body.starts_with(r#"<?xml version="1.0""#));
        }
    }
}
