//! Recording test doubles for the remote services, and helpers for driving the API router.
#![allow(dead_code)]

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use dyncrab::dns::{ChangeBatch, DnsZoneService};
use dyncrab::secret::SecretStore;
use dyncrab::{AppState, Config};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const API_KEY: &str = "s3cr3t-Key";
pub const PARAM_NAME: &str = "/dyncrab/api-key";
pub const ZONE_ID: &str = "Z0123456789ABCDEFGHIJ";
pub const RECORD_NAME: &str = "home.example.com";

/// A SecretStore holding one parameter that can be switched between healthy and failing.
pub struct MockSecretStore {
    value: String,
    healthy: AtomicBool,
    calls: AtomicUsize,
}

impl MockSecretStore {
    pub fn new(value: &str) -> Arc<Self> {
        Arc::new(Self {
            value: value.to_string(),
            healthy: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(value: &str) -> Arc<Self> {
        let store = Self::new(value);
        store.set_healthy(false);
        store
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Get the number of times get_parameter() was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SecretStore for MockSecretStore {
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::ensure!(with_decryption, "parameter requested without decryption");
        anyhow::ensure!(name == PARAM_NAME, "ParameterNotFound: {name}");
        anyhow::ensure!(self.healthy.load(Ordering::SeqCst), "service unavailable");
        Ok(self.value.clone())
    }
}

/// A DnsZoneService that records every change batch it receives.
#[derive(Default)]
pub struct MockZoneService {
    fail: AtomicBool,
    delay: Option<Duration>,
    submitted: Mutex<Vec<(String, ChangeBatch)>>,
}

impl MockZoneService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let service = Self::new();
        service.fail.store(true, Ordering::SeqCst);
        service
    }

    /// A service that takes `delay` to answer each change batch.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    /// Get the number of times change_record_sets() was called
    pub fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn submitted(&self) -> Vec<(String, ChangeBatch)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsZoneService for MockZoneService {
    async fn change_record_sets(&self, zone_id: &str, batch: &ChangeBatch) -> anyhow::Result<()> {
        self.submitted
            .lock()
            .unwrap()
            .push((zone_id.to_string(), batch.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        anyhow::ensure!(!self.fail.load(Ordering::SeqCst), "InvalidChangeBatch");
        Ok(())
    }
}

pub fn test_config() -> Arc<Config> {
    test_config_with_timeout(Duration::from_secs(5))
}

pub fn test_config_with_timeout(api_timeout: Duration) -> Arc<Config> {
    Arc::new(Config {
        api_key_param_name: PARAM_NAME.to_string(),
        dns_hosted_zone: ZONE_ID.to_string(),
        dns_dyn_record_name: RECORD_NAME.to_string(),
        api_bind_addr: "127.0.0.1:0".parse().unwrap(),
        api_timeout,
    })
}

pub fn test_state(store: &Arc<MockSecretStore>, zone: &Arc<MockZoneService>) -> AppState {
    AppState::new(test_config(), store.clone(), zone.clone())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Send one request through a router built from `state`, as if from `client`.
pub async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    client: SocketAddr,
) -> TestResponse {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .extension(ConnectInfo(client));
    if let Some(key) = api_key {
        builder = builder.header("authorization", key);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = dyncrab::router(state.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    TestResponse {
        status,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}

pub fn client(addr: &str) -> SocketAddr {
    addr.parse().unwrap()
}
