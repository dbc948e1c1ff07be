//! User-list endpoint autodiscovery.
//!
//! Backends serve the user list either under `/admin/users` or `/users`.
//! The resolver probes the configured candidates once per session and
//! keeps the first one that answers with a success status.

use crate::error::ConsoleError;
use crate::transport::{ApiRequest, Method, Transport};
use shadowgate_core::{ApiConfig, Session};
use tokio::sync::OnceCell;

/// Resolves and caches the user-list base URL.
#[derive(Debug)]
pub struct EndpointResolver {
    candidates: Vec<String>,
    resolved: OnceCell<String>,
}

impl EndpointResolver {
    /// Probe `candidates` in order on first use.
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            resolved: OnceCell::new(),
        }
    }

    /// Use `url` unconditionally, without probing.
    pub fn fixed(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            candidates: vec![url.clone()],
            resolved: OnceCell::new_with(Some(url)),
        }
    }

    /// Build from configuration. A pinned `users_endpoint` is used as is.
    pub fn from_config(config: &ApiConfig) -> Self {
        match &config.users_endpoint {
            Some(endpoint) => Self::fixed(endpoint.trim_end_matches('/')),
            None => Self::new(config.candidate_urls()),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The adopted URL, if resolution already happened.
    pub fn resolved(&self) -> Option<&str> {
        self.resolved.get().map(String::as_str)
    }

    /// Return the adopted URL, probing on first call.
    ///
    /// Concurrent first calls share one probe. A failed probe is not cached;
    /// the next call probes again.
    pub async fn resolve(
        &self,
        transport: &dyn Transport,
        session: &Session,
    ) -> Result<&str, ConsoleError> {
        self.resolved
            .get_or_try_init(|| self.probe(transport, session))
            .await
            .map(String::as_str)
    }

    async fn probe(&self, transport: &dyn Transport, session: &Session) -> Result<String, ConsoleError> {
        for url in &self.candidates {
            let request = ApiRequest::new(Method::Get, url).header("Authorization", session.bearer());
            match transport.send(request).await {
                Ok(response) if response.is_success() => {
                    tracing::info!(url = %url, "Adopted users endpoint");
                    return Ok(url.clone());
                }
                Ok(response) => {
                    tracing::debug!(url = %url, status = response.status, "Endpoint candidate rejected");
                }
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Endpoint candidate unreachable");
                }
            }
        }

        tracing::warn!(tried = ?self.candidates, "No users endpoint answered");
        Err(ConsoleError::Discovery {
            tried: self.candidates.clone(),
        })
    }
}
