//! An AWS Route 53 implementation of the [`DnsZoneService`][super::DnsZoneService] trait.
use crate::dns::{ChangeAction, ChangeBatch, DnsZoneService, RecordSet};
use aws_config::SdkConfig;
use aws_sdk_route53::types;

#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct Route53ZoneService {
    client: aws_sdk_route53::Client,
}

impl Route53ZoneService {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_route53::Client::new(sdk_config),
        }
    }
}

fn change_action(action: ChangeAction) -> types::ChangeAction {
    match action {
        ChangeAction::Upsert => types::ChangeAction::Upsert,
    }
}

fn resource_record_set(record_set: &RecordSet) -> anyhow::Result<types::ResourceRecordSet> {
    let records = record_set
        .values
        .iter()
        .map(|value| types::ResourceRecord::builder().value(value).build())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(types::ResourceRecordSet::builder()
        .name(&record_set.name)
        .r#type(types::RrType::from(record_set.record_type.to_string().as_str()))
        .ttl(i64::from(record_set.ttl))
        .set_resource_records(Some(records))
        .build()?)
}

fn change_batch(batch: &ChangeBatch) -> anyhow::Result<types::ChangeBatch> {
    let changes = batch
        .changes
        .iter()
        .map(|change| -> anyhow::Result<types::Change> {
            Ok(types::Change::builder()
                .action(change_action(change.action))
                .resource_record_set(resource_record_set(&change.record_set)?)
                .build()?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(types::ChangeBatch::builder()
        .set_changes(Some(changes))
        .build()?)
}

#[async_trait::async_trait]
impl DnsZoneService for Route53ZoneService {
    async fn change_record_sets(&self, zone_id: &str, batch: &ChangeBatch) -> anyhow::Result<()> {
        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(change_batch(batch)?)
            .send()
            .await?;
        tracing::debug!("route53 change submitted: {:?}", output.change_info());
        Ok(())
    }
}
