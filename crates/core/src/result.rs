//! Normalized relay outcome returned to the caller

use serde::{Deserialize, Serialize};

use crate::RelayError;

/// Outcome of one relay call, success or failure, always carrying the
/// elapsed wall-clock time from acceptance to assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResult {
    pub success: bool,
    /// Raw response body (success only; never parsed here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Remote HTTP status (success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Normalized error message (failure only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_millis: u64,
    /// Marks failures the caller caused, so the HTTP boundary can answer
    /// 400 instead of 500. Not part of the wire payload.
    #[serde(skip)]
    pub client_error: bool,
}

impl RelayResult {
    pub fn ok(body: String, status_code: u16, elapsed_millis: u64) -> Self {
        Self {
            success: true,
            body: Some(body),
            status_code: Some(status_code),
            error: None,
            elapsed_millis,
            client_error: false,
        }
    }

    pub fn fail(error: &RelayError, elapsed_millis: u64) -> Self {
        Self {
            success: false,
            body: None,
            status_code: None,
            error: Some(error.to_string()),
            elapsed_millis,
            client_error: error.is_client_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization_omits_error() {
        let result = RelayResult::ok("<xml/>".to_string(), 200, 42);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["elapsedMillis"], 42);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_serialization_omits_body() {
        let result = RelayResult::fail(&RelayError::Timeout, 30_000);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("body").is_none());
        assert!(json.get("statusCode").is_none());
        assert!(json["error"].as_str().unwrap().contains("Tempo limite"));
    }

    #[test]
    fn test_client_error_marker_follows_taxonomy() {
        assert!(RelayResult::fail(&RelayError::MissingCredentials, 1).client_error);
        assert!(RelayResult::fail(&RelayError::InvalidEnvironment, 1).client_error);
        assert!(!RelayResult::fail(&RelayError::Timeout, 1).client_error);
        assert!(
            !RelayResult::fail(
                &RelayError::Remote {
                    status: 503,
                    body: String::new()
                },
                1
            )
            .client_error
        );
    }
}
