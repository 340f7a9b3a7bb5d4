//! API key resolution.
//!
//! The API key used to authorize [update requests][crate::api#any-method-any-path] lives in a
//! remote parameter store, described by the [`SecretStore`] trait. A production implementation
//! backed by AWS SSM Parameter Store is provided in [`ssm::SsmSecretStore`].
//!
//! The [`SecretResolver`] fetches the key on first use and caches it for its own lifetime. A
//! failed fetch is never cached: the next caller tries the store again.

use crate::error::Error;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub mod ssm;

pub use ssm::SsmSecretStore;

/// `DynSecretStore` is a type alias for a [`SecretStore`] shared between consumers through an
/// [`Arc`].
#[allow(clippy::module_name_repetitions)]
pub type DynSecretStore = Arc<dyn SecretStore + Send + Sync>;

/// An async trait describing a remote store of named, optionally encrypted, parameter values.
#[async_trait::async_trait]
pub trait SecretStore {
    /// Get the value of the named parameter, decrypting it first if `with_decryption` is set.
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> anyhow::Result<String>;
}

/// A resolved secret value. The `Debug` output never includes the value itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"<REDACTED>").finish()
    }
}

/// Lazily resolves, then caches, the secret stored under a single parameter name.
pub struct SecretResolver {
    store: DynSecretStore,
    param_name: String,
    cached: OnceCell<Secret>,
}

impl SecretResolver {
    pub fn new(store: DynSecretStore, param_name: impl Into<String>) -> Self {
        Self {
            store,
            param_name: param_name.into(),
            cached: OnceCell::new(),
        }
    }

    /// Returns true once a secret has been successfully resolved.
    pub fn is_cached(&self) -> bool {
        self.cached.initialized()
    }

    /// Return the cached secret, or fetch it from the [`SecretStore`] with decryption enabled.
    ///
    /// Concurrent callers racing to resolve an uncached secret are serialized; only one fetch is
    /// in flight at a time and the first success is shared by all of them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SecretUnavailable`] if the store call fails for any reason. The failure
    /// isn't cached.
    pub async fn resolve(&self) -> Result<&Secret, Error> {
        self.cached
            .get_or_try_init(|| async {
                tracing::debug!("fetching API key parameter \"{}\"", self.param_name);
                self.store
                    .get_parameter(&self.param_name, true)
                    .await
                    .map(Secret::new)
                    .map_err(|err| Error::SecretUnavailable {
                        name: self.param_name.clone(),
                        source: err.into(),
                    })
            })
            .await
    }
}
