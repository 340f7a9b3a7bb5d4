//! HTTP API for updating the dynamic `A` record.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!   No API key is required and no remote services are contacted.
//!
//! ## Any method, any path
//!
//!   Every other request is an update request. The client must present the API key, verbatim,
//!   in the `authorization` header:
//!
//!   ```bash
//!   ❯ curl -H "authorization: $DYNCRAB_API_KEY" https://dyncrab.example.com/
//!   Hello world
//!   ```
//!
//!   The API key is read from the configured [SSM parameter][crate::config::Config::api_key_param_name]
//!   on the first update request and cached for the life of the process. When the presented
//!   key matches, the [dynamic record][crate::config::Config::dns_dyn_record_name] in the
//!   [hosted zone][crate::config::Config::dns_hosted_zone] is upserted as an `A` record (TTL
//!   300) whose value is the client's source IP address.
//!
//!   Responses:
//!
//!   * HTTP 200 (OK) with the body `Hello world` once the record has been upserted.
//!   * HTTP 403 (Forbidden), empty body, if the `authorization` header is missing or doesn't
//!     match. The DNS zone isn't touched.
//!   * HTTP 500 (Internal Server Error), empty body, if the API key couldn't be read, the DNS
//!     service rejected the change, or the update didn't finish within
//!     [`api_timeout`][crate::config::Config::api_timeout]. The cases are only told apart in
//!     the logs.
//!
//!   Non-`GET` requests to `/healthcheck` are update requests too.

mod api_error;
mod routes;
pub mod server;
mod stage;

use axum::Router;
pub use server::{new, AppState};

/// The API [`Router`], without a listener. Handlers expect the client address to be available
/// as [`axum::extract::ConnectInfo<std::net::SocketAddr>`].
pub fn router(state: AppState) -> Router {
    routes::new(state)
}
