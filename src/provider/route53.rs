use async_trait::async_trait;
use aws_sdk_route53::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_route53::types::{
    Change, ChangeAction as Route53Action, ChangeBatch as Route53Batch, ResourceRecord,
    ResourceRecordSet, RrType,
};
use aws_sdk_route53::Client;
use log::{debug, trace};

use super::{bare_id, ChangeInfo, DnsZoneApi, HostedZone, ProviderError};
use crate::change::{ChangeAction, ChangeBatch};

#[async_trait]
impl DnsZoneApi for Client {
    async fn find_zone_by_name(&self, name: &str) -> Result<Option<HostedZone>, ProviderError> {
        let output = self
            .list_hosted_zones_by_name()
            .dns_name(name)
            .max_items(1)
            .send()
            .await
            .map_err(other)?;

        let zone = output.hosted_zones().first().map(|zone| HostedZone {
            id: bare_id(zone.id()).to_string(),
            name: zone.name().to_string(),
        });
        trace!("ListHostedZonesByName({}) -> {:?}", name, zone);

        Ok(zone)
    }

    async fn get_zone(&self, id: &str) -> Result<HostedZone, ProviderError> {
        let output = self.get_hosted_zone().id(id).send().await.map_err(|e| {
            if let Some(service) = e.as_service_error() {
                if service.is_no_such_hosted_zone() {
                    return ProviderError::NoSuchHostedZone(message(service));
                }
            }
            other(e)
        })?;

        let zone = output
            .hosted_zone()
            .ok_or_else(|| ProviderError::Other(format!("No hosted zone in response for {}", id)))?;

        Ok(HostedZone {
            id: bare_id(zone.id()).to_string(),
            name: zone.name().to_string(),
        })
    }

    async fn change_records(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo, ProviderError> {
        let change_batch = to_route53_batch(batch)
            .map_err(|e| ProviderError::InvalidChangeBatch(e.to_string()))?;
        debug!(
            "ChangeResourceRecordSets on {} with {} change(s)",
            zone_id,
            batch.changes.len()
        );

        let output = self
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(change_batch)
            .send()
            .await
            .map_err(|e| {
                if let Some(service) = e.as_service_error() {
                    if service.is_no_such_hosted_zone() {
                        return ProviderError::NoSuchHostedZone(message(service));
                    }
                    if service.is_invalid_change_batch() {
                        return ProviderError::InvalidChangeBatch(message(service));
                    }
                }
                other(e)
            })?;

        let info = output
            .change_info()
            .ok_or_else(|| ProviderError::Other("No change info in response".to_string()))?;

        Ok(ChangeInfo {
            id: bare_id(info.id()).to_string(),
            status: info.status().as_str().to_string(),
        })
    }
}

fn to_route53_batch(batch: &ChangeBatch) -> Result<Route53Batch, BuildError> {
    let changes = batch
        .changes
        .iter()
        .map(|change| {
            let set = &change.resource_record_set;
            let records = set
                .resource_records
                .iter()
                .map(|record| ResourceRecord::builder().value(&record.value).build())
                .collect::<Result<Vec<_>, _>>()?;

            let record_set = ResourceRecordSet::builder()
                .name(&set.name)
                .r#type(RrType::from(set.record_type.as_str()))
                .ttl(set.ttl)
                .set_resource_records(Some(records))
                .build()?;

            Change::builder()
                .action(match change.action {
                    ChangeAction::Create => Route53Action::Create,
                    ChangeAction::Upsert => Route53Action::Upsert,
                })
                .resource_record_set(record_set)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Route53Batch::builder()
        .comment(&batch.comment)
        .set_changes(Some(changes))
        .build()
}

fn message<E: ProvideErrorMetadata>(err: &E) -> String {
    err.message().unwrap_or("no message from Route 53").to_string()
}

fn other<E, R>(err: SdkError<E, R>) -> ProviderError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    ProviderError::Other(DisplayErrorContext(&err).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::build_batch;
    use crate::inventory::InstanceRecord;

    #[test]
    fn batch_maps_onto_route53_types() {
        let records = vec![InstanceRecord {
            instance_id: "i-1".to_string(),
            name: "web1".to_string(),
            address: "10.0.0.5".parse().unwrap(),
        }];
        let batch = build_batch(&records, ChangeAction::Upsert, "example.com.");

        let converted = to_route53_batch(&batch).unwrap();
        assert_eq!(converted.comment(), Some("Import from ec2"));
        assert_eq!(converted.changes().len(), 1);

        let change = &converted.changes()[0];
        assert_eq!(change.action(), &Route53Action::Upsert);

        let set = change.resource_record_set().unwrap();
        assert_eq!(set.name(), "web1.example.com.");
        assert_eq!(set.r#type(), &RrType::A);
        assert_eq!(set.ttl(), Some(300));
        assert_eq!(set.resource_records()[0].value(), "10.0.0.5");
    }
}
