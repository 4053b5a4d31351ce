use thiserror::Error;

/// Failures while loading one of the two catalog resources.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch {resource}: {reason}")]
    Fetch { resource: String, reason: String },

    #[error("request for {resource} failed: {status}")]
    Status { resource: String, status: String },

    #[error("failed to parse {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn resource(&self) -> &str {
        match self {
            Self::Fetch { resource, .. }
            | Self::Status { resource, .. }
            | Self::Parse { resource, .. }
            | Self::Io { resource, .. } => resource,
        }
    }
}
