//! Dynamic `A` record updates.
//!
//! Each authorized request results in exactly one change batch being submitted to a remote
//! [`DnsZoneService`]. The batch holds a single `UPSERT` of an `A` record, so the record is
//! created if absent or overwritten if present:
//!
//! ```json
//! {
//!   "changes": [
//!     {
//!       "action": "UPSERT",
//!       "record_set": {
//!         "name": "home.example.com",
//!         "type": "A",
//!         "ttl": 300,
//!         "values": ["203.0.113.7"]
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! The record value is the caller's source address, used verbatim. Nothing is retried and no
//! local state is kept: repeating an upsert with the same inputs converges on the same record.
//!
//! A production implementation backed by AWS Route 53 is provided in
//! [`route53::Route53ZoneService`].

use crate::error::Error;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use trust_dns_proto::rr::RecordType;

pub mod route53;

pub use route53::Route53ZoneService;

/// TTL, in seconds, of the dynamic record.
pub const DYN_RECORD_TTL: u32 = 300;

/// `DynZoneService` is a type alias for a [`DnsZoneService`] shared between consumers through an
/// [`Arc`].
pub type DynZoneService = Arc<dyn DnsZoneService + Send + Sync>;

/// An async trait describing a remote service hosting DNS zones that accepts batches of record
/// changes.
#[async_trait::async_trait]
pub trait DnsZoneService {
    /// Apply the change batch to the zone with the given ID.
    async fn change_record_sets(&self, zone_id: &str, batch: &ChangeBatch) -> anyhow::Result<()>;
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Upsert,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub name: String,
    #[serde(rename = "type", serialize_with = "serialize_record_type")]
    pub record_type: RecordType,
    pub ttl: u32,
    pub values: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub action: ChangeAction,
    pub record_set: RecordSet,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChangeBatch {
    pub changes: Vec<Change>,
}

impl ChangeBatch {
    /// A batch holding one `UPSERT` of an `A` record with [`DYN_RECORD_TTL`] and a single value.
    pub fn upsert_a(record_name: impl Into<String>, record_value: impl Into<String>) -> Self {
        Self {
            changes: vec![Change {
                action: ChangeAction::Upsert,
                record_set: RecordSet {
                    name: record_name.into(),
                    record_type: RecordType::A,
                    ttl: DYN_RECORD_TTL,
                    values: vec![record_value.into()],
                },
            }],
        }
    }
}

fn serialize_record_type<S: Serializer>(rt: &RecordType, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(rt)
}

#[allow(clippy::module_name_repetitions)]
pub struct DnsUpsertClient {
    service: DynZoneService,
}

impl DnsUpsertClient {
    pub fn new(service: DynZoneService) -> Self {
        Self { service }
    }

    /// Point the `A` record `record_name` in zone `zone_id` at `record_value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DnsUpsertFailed`] for any error from the [`DnsZoneService`]; the kind of
    /// failure (auth, validation, throttling, network) isn't distinguished.
    pub async fn upsert(
        &self,
        zone_id: &str,
        record_name: &str,
        record_value: &str,
    ) -> Result<(), Error> {
        let batch = ChangeBatch::upsert_a(record_name, record_value);
        self.service
            .change_record_sets(zone_id, &batch)
            .await
            .map_err(|err| Error::DnsUpsertFailed {
                zone_id: zone_id.to_string(),
                record_name: record_name.to_string(),
                source: err.into(),
            })?;
        tracing::info!("upserted \"{record_name}\" A {record_value} in zone {zone_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingZoneService {
        payloads: Mutex<Vec<(String, Vec<u8>)>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl DnsZoneService for RecordingZoneService {
        async fn change_record_sets(
            &self,
            zone_id: &str,
            batch: &ChangeBatch,
        ) -> anyhow::Result<()> {
            self.payloads
                .lock()
                .unwrap()
                .push((zone_id.to_string(), serde_json::to_vec(batch)?));
            if self.fail {
                anyhow::bail!("Throttling: Rate exceeded");
            }
            Ok(())
        }
    }

    #[test]
    fn upsert_a_batch_shape() {
        let batch = ChangeBatch::upsert_a("home.example.com", "203.0.113.7");
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!({
                "changes": [{
                    "action": "UPSERT",
                    "record_set": {
                        "name": "home.example.com",
                        "type": "A",
                        "ttl": 300,
                        "values": ["203.0.113.7"],
                    },
                }],
            })
        );
    }

    #[tokio::test]
    async fn repeated_upserts_send_identical_payloads() {
        let service = Arc::new(RecordingZoneService::default());
        let client = DnsUpsertClient::new(service.clone());

        for _ in 0..2 {
            client
                .upsert("Z0123456789ABCDEFGHIJ", "home.example.com", "203.0.113.7")
                .await
                .unwrap();
        }

        let payloads = service.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0], payloads[1]);
        assert_eq!(payloads[0].0, "Z0123456789ABCDEFGHIJ");
    }

    #[tokio::test]
    async fn value_is_used_verbatim() {
        let service = Arc::new(RecordingZoneService::default());
        let client = DnsUpsertClient::new(service.clone());

        client
            .upsert("Z0123456789ABCDEFGHIJ", "home.example.com", "not-an-address")
            .await
            .unwrap();

        let payloads = service.payloads.lock().unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&payloads[0].1).unwrap();
        assert_eq!(
            sent["changes"][0]["record_set"]["values"],
            json!(["not-an-address"])
        );
    }

    #[tokio::test]
    async fn service_error_is_upsert_failure() {
        let service = Arc::new(RecordingZoneService {
            fail: true,
            ..Default::default()
        });
        let client = DnsUpsertClient::new(service.clone());

        let err = client
            .upsert("Z0123456789ABCDEFGHIJ", "home.example.com", "203.0.113.7")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DnsUpsertFailed { ref zone_id, ref record_name, .. }
                if zone_id == "Z0123456789ABCDEFGHIJ" && record_name == "home.example.com"
        ));
        assert_eq!(service.payloads.lock().unwrap().len(), 1);
    }
}
