use crate::api::routes;
use crate::auth::Authorizer;
use crate::config::SharedConfig;
use crate::dns::{DnsUpsertClient, DynZoneService};
use crate::secret::{DynSecretStore, SecretResolver};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: SharedConfig,
    pub authorizer: Arc<Authorizer>,
    pub dns: Arc<DnsUpsertClient>,
}

impl AppState {
    pub fn new(
        config: SharedConfig,
        secret_store: DynSecretStore,
        zone_service: DynZoneService,
    ) -> Self {
        let resolver = SecretResolver::new(secret_store, config.api_key_param_name.clone());
        Self {
            authorizer: Arc::new(Authorizer::new(Arc::new(resolver))),
            dns: Arc::new(DnsUpsertClient::new(zone_service)),
            config,
        }
    }
}

/// Serve the HTTP API on the configured bind address until `shutdown` resolves.
pub fn new(
    state: AppState,
    shutdown: impl Future<Output = ()>,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&state.config.api_bind_addr)
        .serve(routes::new(state).into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
}
