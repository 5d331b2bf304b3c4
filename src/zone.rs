use log::{debug, info};

use crate::error::{Error, Result};
use crate::provider::{DnsZoneApi, ProviderError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedZone {
    pub id: String,
    /// Zone name as reported by the provider, usually with a trailing dot
    pub name: String,
}

/// Resolve `spec` to an existing hosted zone.
///
/// A spec containing a dot is treated as a domain name and looked up by
/// name; the first zone returned only counts if its name starts with the
/// spec. Anything else is taken as a zone id and passed through unchanged
/// once the provider confirms it exists.
pub async fn resolve_zone<A>(api: &A, spec: &str) -> Result<ResolvedZone>
where
    A: DnsZoneApi + ?Sized,
{
    let zone = if spec.contains('.') {
        match api.find_zone_by_name(spec).await? {
            Some(zone) if zone.name.starts_with(spec) => ResolvedZone {
                id: zone.id,
                name: zone.name,
            },
            Some(zone) => {
                debug!("Closest zone to {} is {}, not a match", spec, zone.name);
                return Err(Error::ZoneNotFound(spec.to_string()));
            }
            None => return Err(Error::ZoneNotFound(spec.to_string())),
        }
    } else {
        match api.get_zone(spec).await {
            Ok(zone) => ResolvedZone {
                id: spec.to_string(),
                name: zone.name,
            },
            Err(ProviderError::NoSuchHostedZone(message)) => {
                debug!("{}", message);
                return Err(Error::ZoneNotFound(spec.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    };

    info!("Using zone {} ({})", zone.name, zone.id);
    Ok(zone)
}
