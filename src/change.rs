use clap::ValueEnum;
use serde::Serialize;

use crate::inventory::InstanceRecord;

pub const RECORD_TYPE: &str = "A";
pub const RECORD_TTL: i64 = 300;
pub const BATCH_COMMENT: &str = "Import from ec2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Fail if a record with the same name already exists
    Create,
    /// Create the record or overwrite an existing one
    Upsert,
}

// Field names follow the Route 53 API so the dry-run output reads like the
// request that would be sent.

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeBatch {
    pub comment: String,
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    pub action: ChangeAction,
    pub resource_record_set: ResourceRecordSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordSet {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL")]
    pub ttl: i64,
    pub resource_records: Vec<ResourceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    pub value: String,
}

/// Fully qualified record name: `<name>.<zone>.` with exactly one trailing dot
pub fn record_name(instance_name: &str, zone_name: &str) -> String {
    format!("{}.{}.", instance_name, zone_name.trim_end_matches('.'))
}

pub fn build_change(
    action: ChangeAction,
    instance_name: &str,
    address: &str,
    zone_name: &str,
) -> Change {
    Change {
        action,
        resource_record_set: ResourceRecordSet {
            name: record_name(instance_name, zone_name),
            record_type: RECORD_TYPE.to_string(),
            ttl: RECORD_TTL,
            resource_records: vec![ResourceRecord {
                value: address.to_string(),
            }],
        },
    }
}

pub fn build_batch(records: &[InstanceRecord], action: ChangeAction, zone_name: &str) -> ChangeBatch {
    ChangeBatch {
        comment: BATCH_COMMENT.to_string(),
        changes: records
            .iter()
            .map(|record| build_change(action, &record.name, &record.address.to_string(), zone_name))
            .collect(),
    }
}
