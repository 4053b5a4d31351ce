use std::time::Duration;

use exodo_core::catalog::{parse_facts, parse_maps};
use exodo_core::{CatalogError, FactRecord, MapRecord};
use tracing::{debug, instrument};

use crate::config::Source;

pub fn build_client(timeout: Duration) -> color_eyre::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("exodo/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[instrument(skip(client))]
pub async fn load_facts(
    client: &reqwest::Client,
    source: &Source,
) -> Result<Vec<FactRecord>, CatalogError> {
    let body = read_source(client, source).await?;
    parse_facts(&source.to_string(), &body)
}

#[instrument(skip(client))]
pub async fn load_maps(
    client: &reqwest::Client,
    source: &Source,
) -> Result<Vec<MapRecord>, CatalogError> {
    let body = read_source(client, source).await?;
    parse_maps(&source.to_string(), &body)
}

async fn read_source(client: &reqwest::Client, source: &Source) -> Result<String, CatalogError> {
    let resource = source.to_string();

    match source {
        Source::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io { resource, source }),
        Source::Http(url) => {
            let fetch_error = |e: reqwest::Error| CatalogError::Fetch {
                resource: url.clone(),
                reason: e.to_string(),
            };

            let response = client.get(url).send().await.map_err(fetch_error)?;
            let status = response.status();
            debug!(%url, %status, "fetched");
            if !status.is_success() {
                return Err(CatalogError::Status {
                    resource,
                    status: status.to_string(),
                });
            }
            response.text().await.map_err(fetch_error)
        }
    }
}
