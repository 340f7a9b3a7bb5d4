//! Dyn Crab
//!
//! A very minimal dynamic DNS endpoint for hosts without a static IP address.
//!
//! A client periodically sends any HTTP request to Dyn Crab with a shared API key in the
//! `authorization` header. If the key matches the one held in [AWS SSM Parameter Store], Dyn Crab
//! upserts an `A` record in an [AWS Route 53] hosted zone pointing at the client's source
//! address. See the [HTTP API][crate::api] for details.
//!
//! Both remote services sit behind traits ([`secret::SecretStore`] and [`dns::DnsZoneService`])
//! so the request pipeline can be driven without AWS.
//!
//! [AWS SSM Parameter Store]: https://docs.aws.amazon.com/systems-manager/latest/userguide/systems-manager-parameter-store.html
//! [AWS Route 53]: https://docs.aws.amazon.com/Route53/latest/DeveloperGuide/Welcome.html
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod auth;
pub mod config;
pub mod dns;
pub mod error;
pub mod secret;

pub use api::{new as new_http, router, AppState};
pub use config::{Config, SharedConfig};
pub use dns::Route53ZoneService;
pub use secret::SsmSecretStore;
