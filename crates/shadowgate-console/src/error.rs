//! Error types for the console crate.

use crate::transport::TransportError;
use serde_json::Value;
use shadowgate_core::StorageError;
use thiserror::Error;

/// Errors that can occur while the console talks to the backend.
///
/// The `Display` text is what the operator sees in the error region.
/// Authentication failures are not errors: the access gate redirects.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never produced an HTTP response.
    #[error("Network error")]
    Network(#[from] TransportError),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A success response whose body could not be understood.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No candidate user-list endpoint answered successfully.
    #[error("No admin users endpoint found (tried {}).", describe_attempts(.tried))]
    Discovery { tried: Vec<String> },

    /// Client storage could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ConsoleError {
    /// Build an API error from a failure response.
    ///
    /// Uses the body's `detail` field, then `error`; a string is used as is,
    /// any other JSON value as its JSON text. Falls back to `HTTP <status>`.
    pub fn from_failure(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|json| {
                ["detail", "error"]
                    .iter()
                    .find_map(|field| json.get(*field).and_then(message_text))
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        ConsoleError::Api { status, message }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// `/a`, `/a and /b`, `/a, /b and /c`.
fn describe_attempts(tried: &[String]) -> String {
    let paths: Vec<&str> = tried.iter().map(|url| url_path(url)).collect();
    match paths.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Path part of an absolute URL; other strings are returned unchanged.
fn url_path(url: &str) -> &str {
    url.find("://")
        .and_then(|scheme_end| {
            let after_scheme = scheme_end + 3;
            url[after_scheme..]
                .find('/')
                .map(|offset| &url[after_scheme + offset..])
        })
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_uses_detail() {
        let err = ConsoleError::from_failure(404, br#"{"detail":"not found"}"#);
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_failure_falls_back_to_error_field() {
        let err = ConsoleError::from_failure(403, br#"{"error":"forbidden"}"#);
        assert_eq!(err.to_string(), "forbidden");

        let err = ConsoleError::from_failure(403, br#"{"detail":null,"error":"forbidden"}"#);
        assert_eq!(err.to_string(), "forbidden");
    }

    #[test]
    fn test_failure_structured_detail() {
        let err = ConsoleError::from_failure(422, br#"{"detail":[{"msg":"bad role"}]}"#);
        assert_eq!(err.to_string(), r#"[{"msg":"bad role"}]"#);
    }

    #[test]
    fn test_failure_generic_message() {
        assert_eq!(ConsoleError::from_failure(500, b"").to_string(), "HTTP 500");
        assert_eq!(
            ConsoleError::from_failure(502, b"<html>bad gateway</html>").to_string(),
            "HTTP 502"
        );
        assert_eq!(ConsoleError::from_failure(400, b"{}").to_string(), "HTTP 400");
    }

    #[test]
    fn test_network_error_is_generic() {
        let err = ConsoleError::from(TransportError::Connection("refused".to_string()));
        assert_eq!(err.to_string(), "Network error");
    }

    #[test]
    fn test_discovery_error_names_paths() {
        let err = ConsoleError::Discovery {
            tried: vec![
                "https://host/api/admin/users".to_string(),
                "https://host/api/users".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "No admin users endpoint found (tried /api/admin/users and /api/users)."
        );

        let err = ConsoleError::Discovery {
            tried: vec!["/a".into(), "/b".into(), "/c".into()],
        };
        assert_eq!(
            err.to_string(),
            "No admin users endpoint found (tried /a, /b and /c)."
        );
    }
}
