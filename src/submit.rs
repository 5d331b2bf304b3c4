use std::io::Write;

use log::info;

use crate::change::ChangeBatch;
use crate::error::{Error, Result};
use crate::provider::{DnsZoneApi, ProviderError};
use crate::zone::ResolvedZone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The batch was written to the output instead of being sent
    DryRun,
    Applied { change_id: String, status: String },
}

/// Print the batch when `dry_run` is set, otherwise apply it to the zone in
/// a single call.
pub async fn submit<A, W>(
    api: &A,
    zone: &ResolvedZone,
    batch: &ChangeBatch,
    dry_run: bool,
    out: &mut W,
) -> Result<SubmitOutcome>
where
    A: DnsZoneApi + ?Sized,
    W: Write,
{
    if dry_run {
        serde_json::to_writer_pretty(&mut *out, batch)?;
        writeln!(out)?;
        return Ok(SubmitOutcome::DryRun);
    }

    if batch.changes.is_empty() {
        return Err(Error::EmptyBatch(zone.name.clone()));
    }

    info!(
        "Applying {} change(s) to zone {} ({})",
        batch.changes.len(),
        zone.name,
        zone.id
    );

    match api.change_records(&zone.id, batch).await {
        Ok(change) => Ok(SubmitOutcome::Applied {
            change_id: change.id,
            status: change.status,
        }),
        Err(ProviderError::NoSuchHostedZone(message)) => Err(Error::ZoneUnavailable {
            zone: zone.name.clone(),
            message,
        }),
        Err(ProviderError::InvalidChangeBatch(message)) => {
            Err(Error::InvalidChangeBatch { message })
        }
        Err(e) => Err(e.into()),
    }
}
