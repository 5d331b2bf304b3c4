pub mod ec2;
pub mod route53;

use async_trait::async_trait;
use thiserror::Error;

use crate::change::ChangeBatch;

/// An instance as reported by the compute API, before any validation
#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub instance_id: String,
    pub tags: Vec<(String, String)>,
    pub private_ip: Option<String>,
}

impl Instance {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reservation {
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone, Default)]
pub struct InstancePage {
    pub reservations: Vec<Reservation>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    /// Bare zone id, without the `/hostedzone/` prefix
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeInfo {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("{0}")]
    NoSuchHostedZone(String),
    #[error("{0}")]
    InvalidChangeBatch(String),
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait InstanceSource: Send + Sync {
    /// Fetch one page of reservations, starting at `next_token`
    async fn instance_page(&self, next_token: Option<String>)
        -> Result<InstancePage, ProviderError>;
}

#[async_trait]
pub trait DnsZoneApi: Send + Sync {
    /// Return the first zone at or after `name` in the provider's ordering.
    /// The caller decides whether it actually matches.
    async fn find_zone_by_name(&self, name: &str) -> Result<Option<HostedZone>, ProviderError>;

    async fn get_zone(&self, id: &str) -> Result<HostedZone, ProviderError>;

    /// Apply the whole batch atomically
    async fn change_records(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo, ProviderError>;
}

/// Strip the `/hostedzone/` (or `/change/`) prefix Route 53 puts on ids
pub fn bare_id(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}
