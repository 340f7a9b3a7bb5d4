//! Error types.

/// A boxed error from one of the remote services Dyn Crab talks to.
pub type RemoteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error enumerates the possible Dyn Crab error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a client calls the [update endpoint][crate::api#any-method-any-path] with
    /// an `authorization` header that doesn't exactly match the API key. A missing header is
    /// treated as an empty key and rejected the same way.
    #[error("API key does not match")]
    AuthForbidden,

    /// Returned when the API key can't be read from the
    /// [`SecretStore`][crate::secret::SecretStore]. Network errors, permission errors and missing
    /// parameters are not distinguished.
    #[error("API key parameter \"{name}\" is unavailable")]
    SecretUnavailable {
        name: String,
        #[source]
        source: RemoteError,
    },

    /// Returned when the [`DnsZoneService`][crate::dns::DnsZoneService] rejects, or fails to
    /// process, the dynamic record change batch.
    #[error("upsert of \"{record_name}\" in zone \"{zone_id}\" failed")]
    DnsUpsertFailed {
        zone_id: String,
        record_name: String,
        #[source]
        source: RemoteError,
    },

    /// Returned when an update request doesn't complete within
    /// [`Config::api_timeout`][crate::config::Config::api_timeout]. Whatever remote call was in
    /// flight is abandoned.
    #[error("update did not complete within {0:?}")]
    Timeout(std::time::Duration),

    /// Returned when loading a [`Config`][crate::config::Config] that lacks a required setting,
    /// or where a required setting is empty.
    #[error("missing required setting {0}")]
    MissingSetting(&'static str),

    /// Returned when loading a [`Config`][crate::config::Config] where a setting can't be parsed.
    #[error("invalid value for setting {name}: \"{value}\"")]
    InvalidSetting { name: &'static str, value: String },

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
