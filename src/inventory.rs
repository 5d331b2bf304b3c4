use std::net::Ipv4Addr;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::provider::{Instance, InstanceSource};

pub const NAME_TAG: &str = "Name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub instance_id: String,
    pub name: String,
    /// Records are always type A, so only IPv4 is accepted
    pub address: Ipv4Addr,
}

impl TryFrom<&Instance> for InstanceRecord {
    type Error = Error;

    fn try_from(instance: &Instance) -> Result<Self> {
        let name = instance.tag(NAME_TAG).ok_or_else(|| Error::MissingTag {
            instance_id: instance.instance_id.clone(),
            tag: NAME_TAG.to_string(),
        })?;

        let raw = instance
            .private_ip
            .as_deref()
            .ok_or_else(|| Error::MissingPrivateAddress {
                instance_id: instance.instance_id.clone(),
            })?;
        let address: Ipv4Addr = raw.parse().map_err(|_| Error::InvalidAddress {
            instance_id: instance.instance_id.clone(),
            address: raw.to_string(),
        })?;

        Ok(Self {
            instance_id: instance.instance_id.clone(),
            name: name.to_string(),
            address,
        })
    }
}

/// List every instance of every reservation, following pagination until
/// the source runs out of pages.
pub async fn list_instances<S>(source: &S) -> Result<Vec<InstanceRecord>>
where
    S: InstanceSource + ?Sized,
{
    let mut records = Vec::new();
    let mut next_token = None;
    let mut pages = 0usize;

    loop {
        let page = source.instance_page(next_token.take()).await?;
        pages += 1;

        for instance in page.reservations.iter().flat_map(|r| &r.instances) {
            let record = InstanceRecord::try_from(instance)?;
            debug!(
                "Found instance {} named {} at {}",
                record.instance_id, record.name, record.address
            );
            records.push(record);
        }

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    info!("Found {} instance(s) across {} page(s)", records.len(), pages);
    Ok(records)
}
