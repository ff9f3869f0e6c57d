//! Relay service: one validated request, one mTLS POST, one result

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use esocial_core::{
    build_envelope, resolve_endpoint, Envelope, RelayCall, RelayError, RelayRequest, RelayResult,
    Result,
};

/// Relay transport configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Ceiling over the full request/response cycle; on expiry the
    /// in-flight connection is aborted and the call fails as a timeout
    pub timeout: Duration,
    /// Maximum number of characters of a remote error body carried back
    /// to the caller
    pub error_body_limit: usize,
    /// Replaces the resolved `https://{hostname}` origin when set.
    /// Test seam for pointing the transport at a local stub server;
    /// production leaves it unset.
    pub base_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            error_body_limit: 500,
            base_url: None,
        }
    }
}

/// Stateless relay service. Calls are independent; the only process-wide
/// data it reads is the constant endpoint table.
#[derive(Debug, Clone, Default)]
pub struct RelayService {
    config: RelayConfig,
}

impl RelayService {
    pub fn new(config: RelayConfig) -> Self {
        Self { config }
    }

    /// Run one relay call end to end.
    ///
    /// Never returns an `Err`: every failure path is folded into a
    /// `RelayResult` carrying the normalized message and elapsed time.
    pub async fn relay(&self, request: RelayRequest) -> RelayResult {
        let started = Instant::now();
        match self.execute(request).await {
            Ok((status, body)) => {
                let elapsed = elapsed_millis(started);
                info!(status, elapsed, "relay call succeeded");
                RelayResult::ok(body, status, elapsed)
            }
            Err(err) => {
                let elapsed = elapsed_millis(started);
                warn!(elapsed, "relay call failed: {err}");
                RelayResult::fail(&err, elapsed)
            }
        }
    }

    async fn execute(&self, request: RelayRequest) -> Result<(u16, String)> {
        let call = request.validate()?;
        let endpoint = resolve_endpoint(call.environment)?;
        let envelope = build_envelope(&call);

        let url = match &self.config.base_url {
            Some(base) => format!(
                "{}{}",
                base.trim_end_matches('/'),
                endpoint.path_for(call.action)
            ),
            None => endpoint.url_for(call.action),
        };

        info!(
            environment = call.environment.as_str(),
            action = ?call.action,
            host = endpoint.hostname,
            "relaying request"
        );

        self.post_envelope(&url, &envelope, &call).await
    }

    /// Single mutually authenticated POST. Success is a status in
    /// [200, 300) with the body fully buffered; anything else maps to
    /// one of the transport error classes.
    async fn post_envelope(
        &self,
        url: &str,
        envelope: &Envelope,
        call: &RelayCall,
    ) -> Result<(u16, String)> {
        let identity = reqwest::Identity::from_pkcs8_pem(
            call.certificate_pem.as_bytes(),
            call.private_key_pem.as_bytes(),
        )
        .map_err(|e| RelayError::Connection(format!("certificado recusado: {e}")))?;

        // A fresh client per call: the identity is caller-supplied and
        // must not outlive the call. Server verification stays at the
        // native-tls default.
        let client = reqwest::Client::builder()
            .use_native_tls()
            .identity(identity)
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| RelayError::Connection(e.to_string()))?;

        let response = client
            .post(url)
            .header("Content-Type", "application/soap+xml;charset=UTF-8")
            .header("SOAPAction", envelope.soap_action)
            .body(envelope.body.clone())
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport_error)?;

        debug!(status, bytes = body.len(), "remote response buffered");

        if (200..300).contains(&status) {
            Ok((status, body))
        } else {
            Err(RelayError::Remote {
                status,
                body: truncate_chars(&body, self.config.error_body_limit),
            })
        }
    }
}

/// Timeouts get their own class; everything else at this level is a
/// connection failure (DNS, TLS handshake, certificate rejection, reset).
fn classify_transport_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout
    } else {
        RelayError::Connection(err.to_string())
    }
}

fn truncate_chars(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

fn elapsed_millis(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
