use crate::error::Error;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

pub const API_KEY_PARAM_NAME: &str = "API_KEY_PARAM_NAME";
pub const DNS_HOSTED_ZONE: &str = "DNS_HOSTED_ZONE";
pub const DNS_DYN_RECORD_NAME: &str = "DNS_DYN_RECORD_NAME";
pub const API_BIND_ADDR: &str = "API_BIND_ADDR";
pub const API_TIMEOUT: &str = "API_TIMEOUT";

const DEFAULT_API_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the SSM parameter holding the expected API key.
    pub api_key_param_name: String,
    /// Route 53 hosted zone ID containing the dynamic record.
    pub dns_hosted_zone: String,
    /// Fully qualified name of the dynamic `A` record.
    pub dns_dyn_record_name: String,
    #[serde(default = "default_api_bind_addr")]
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_api_timeout")]
    pub api_timeout: Duration,
}

fn default_api_bind_addr() -> SocketAddr {
    // NB: unwrap is safe: constant, known-good socket address.
    DEFAULT_API_BIND_ADDR.parse().unwrap()
}

fn default_api_timeout() -> Duration {
    Duration::from_secs(DEFAULT_API_TIMEOUT_SECS)
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.required_settings_present()?;
        Ok(conf)
    }

    pub fn try_from_env() -> Result<Self, Error> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a `Config` from a variable lookup function, e.g. a process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] if a required setting is absent or empty, and
    /// [`Error::InvalidSetting`] if an optional setting is present but can't be parsed.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(Error::MissingSetting(name));

        let api_bind_addr = match lookup(API_BIND_ADDR) {
            None => default_api_bind_addr(),
            Some(value) => value.parse().map_err(|_| Error::InvalidSetting {
                name: API_BIND_ADDR,
                value,
            })?,
        };
        let api_timeout = match lookup(API_TIMEOUT) {
            None => default_api_timeout(),
            Some(value) => Duration::from_secs(value.parse().map_err(|_| {
                Error::InvalidSetting {
                    name: API_TIMEOUT,
                    value,
                }
            })?),
        };

        let conf = Config {
            api_key_param_name: required(API_KEY_PARAM_NAME)?,
            dns_hosted_zone: required(DNS_HOSTED_ZONE)?,
            dns_dyn_record_name: required(DNS_DYN_RECORD_NAME)?,
            api_bind_addr,
            api_timeout,
        };
        conf.required_settings_present()?;
        Ok(conf)
    }

    fn required_settings_present(&self) -> Result<(), Error> {
        [
            (API_KEY_PARAM_NAME, &self.api_key_param_name),
            (DNS_HOSTED_ZONE, &self.dns_hosted_zone),
            (DNS_DYN_RECORD_NAME, &self.dns_dyn_record_name),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map_or(Ok(()), |(name, _)| Err(Error::MissingSetting(name)))
    }
}
