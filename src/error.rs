use thiserror::Error;

use crate::provider::ProviderError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An instance lacks a tag the sync depends on
    #[error("Instance {instance_id} has no '{tag}' tag")]
    MissingTag { instance_id: String, tag: String },

    #[error("Instance {instance_id} has no private IP address")]
    MissingPrivateAddress { instance_id: String },

    #[error("Instance {instance_id} has no usable private IPv4 address: {address}")]
    InvalidAddress { instance_id: String, address: String },

    #[error("Zone {0} does not exist")]
    ZoneNotFound(String),

    /// The zone vanished (or the id is malformed) between resolution and submission
    #[error("Problems with zone {zone}. Check zone name/id.\n{message}")]
    ZoneUnavailable { zone: String, message: String },

    #[error("Problems with change batch generated. Check it with --dry-run option.\n{message}")]
    InvalidChangeBatch { message: String },

    /// Route 53 rejects a change batch without changes
    #[error("No instances found, nothing to apply to zone {0}")]
    EmptyBatch(String),

    #[error("{0}")]
    Provider(String),

    #[error("Failed to render change batch: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to write change batch: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}
