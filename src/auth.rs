//! API key authorization.
//!
//! Callers present the API key in the `authorization` header, verbatim (no `Bearer` scheme).
//! The header value must match the resolved [`Secret`][crate::secret::Secret] exactly: case
//! sensitive, no trimming. A request without the header is treated as presenting an empty key.

use crate::error::Error;
use crate::secret::SecretResolver;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use std::sync::Arc;

/// The outcome of checking a request's credential against the API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

pub struct Authorizer {
    resolver: Arc<SecretResolver>,
}

impl Authorizer {
    pub fn new(resolver: Arc<SecretResolver>) -> Self {
        Self { resolver }
    }

    /// Check the `authorization` header against the API key, resolving the key first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SecretUnavailable`] if the API key can't be resolved.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<Authorization, Error> {
        if !self.resolver.is_cached() {
            for name in headers.keys() {
                tracing::debug!("header {name} found");
            }
        }
        let secret = self.resolver.resolve().await?;

        let presented = headers
            .get(AUTHORIZATION)
            .map_or(&[][..], |value| value.as_bytes());
        tracing::debug!(
            "validating the API key: {} bytes expected, {} bytes presented",
            secret.len(),
            presented.len()
        );

        if secret.as_bytes() == presented {
            tracing::debug!("auth ok");
            Ok(Authorization::Granted)
        } else {
            tracing::info!("not authorized");
            Ok(Authorization::Denied)
        }
    }
}
