//! In-memory stand-ins for the EC2 and Route 53 APIs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::change::ChangeBatch;
use crate::provider::{
    ChangeInfo, DnsZoneApi, HostedZone, Instance, InstancePage, InstanceSource, ProviderError,
    Reservation,
};

pub fn instance(id: &str, name: Option<&str>, ip: Option<&str>) -> Instance {
    Instance {
        instance_id: id.to_string(),
        tags: name
            .map(|n| vec![("Name".to_string(), n.to_string())])
            .unwrap_or_default(),
        private_ip: ip.map(str::to_string),
    }
}

/// Serves a fixed list of pages; the token is the index of the next page.
pub struct FakeEc2 {
    pages: Vec<Vec<Reservation>>,
    calls: AtomicUsize,
    tokens: Mutex<Vec<Option<String>>>,
}

impl FakeEc2 {
    pub fn new(pages: Vec<Vec<Reservation>>) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl InstanceSource for FakeEc2 {
    async fn instance_page(
        &self,
        next_token: Option<String>,
    ) -> Result<InstancePage, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(next_token.clone());

        let index = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| ProviderError::Other(format!("bad token {}", token)))?,
            None => 0,
        };

        Ok(InstancePage {
            reservations: self.pages.get(index).cloned().unwrap_or_default(),
            next_token: (index + 1 < self.pages.len()).then(|| (index + 1).to_string()),
        })
    }
}

pub struct FakeRoute53 {
    zones: Vec<HostedZone>,
    failure: Option<ProviderError>,
    name_queries: Mutex<Vec<String>>,
    submitted: Mutex<Vec<(String, ChangeBatch)>>,
}

impl FakeRoute53 {
    pub fn new(mut zones: Vec<HostedZone>) -> Self {
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            zones,
            failure: None,
            name_queries: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Make every change submission fail with `err`
    pub fn failing_with(mut self, err: ProviderError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn name_queries(&self) -> Vec<String> {
        self.name_queries.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<(String, ChangeBatch)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsZoneApi for FakeRoute53 {
    // Like ListHostedZonesByName: the first zone sorting at or after `name`,
    // whether or not it matches.
    async fn find_zone_by_name(&self, name: &str) -> Result<Option<HostedZone>, ProviderError> {
        self.name_queries.lock().unwrap().push(name.to_string());
        Ok(self
            .zones
            .iter()
            .find(|zone| zone.name.as_str() >= name)
            .cloned())
    }

    async fn get_zone(&self, id: &str) -> Result<HostedZone, ProviderError> {
        self.zones
            .iter()
            .find(|zone| zone.id == id)
            .cloned()
            .ok_or_else(|| {
                ProviderError::NoSuchHostedZone(format!("No hosted zone found with ID: {}", id))
            })
    }

    async fn change_records(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo, ProviderError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.submitted
            .lock()
            .unwrap()
            .push((zone_id.to_string(), batch.clone()));
        Ok(ChangeInfo {
            id: "C2682N5HXP0BZ4".to_string(),
            status: "PENDING".to_string(),
        })
    }
}
