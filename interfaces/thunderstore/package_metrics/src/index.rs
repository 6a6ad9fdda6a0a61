use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://thunderstore.io";

pub struct PackageMetricsResult {
    pub body: String,
    pub status: StatusCode,
}

/// Body of a successful package-metrics response. Thunderstore returns more
/// fields than these; the rest are ignored.
#[derive(Debug, Deserialize)]
pub struct PackageMetricsResponse {
    pub downloads: u64,
    pub rating_score: u64,
}

/// `{base}/api/v1/package-metrics/{namespace}/{name}/` — the trailing slash
/// is part of the endpoint.
pub fn package_metrics_url(base_url: &str, namespace: &str, name: &str) -> String {
    format!(
        "{}/api/v1/package-metrics/{}/{}/",
        base_url.trim_end_matches('/'),
        namespace,
        name,
    )
}

pub async fn fetch_package_metrics(
    base_url: &str,
    namespace: &str,
    name: &str,
) -> Result<PackageMetricsResult, FetchPackageMetricsError> {
    let client = Client::new();

    let response = client
        .get(package_metrics_url(base_url, namespace, name))
        .header("User-Agent", "rust-client")
        .send()
        .await
        .map_err(|source| FetchPackageMetricsError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchPackageMetricsError::ResponseRead { source })?;

    Ok(PackageMetricsResult { body, status })
}

#[derive(Debug, Error)]
pub enum FetchPackageMetricsError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}
