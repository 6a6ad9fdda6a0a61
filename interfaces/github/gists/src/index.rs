use std::collections::BTreeMap;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

pub struct UpdateGistResult {
    pub body: String,
    pub status: StatusCode,
}

/// `PATCH /gists/{id}` body. Files not named in the map are left untouched
/// by GitHub.
#[derive(Debug, Serialize)]
pub struct UpdateGistRequest {
    pub files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Serialize)]
pub struct GistFile {
    pub content: String,
}

impl UpdateGistRequest {
    pub fn single_file(name: &str, content: String) -> Self {
        let mut files = BTreeMap::new();
        files.insert(name.to_string(), GistFile { content });
        Self { files }
    }
}

pub async fn update_gist(
    base_url: &str,
    token: &str,
    gist_id: &str,
    request: &UpdateGistRequest,
) -> Result<UpdateGistResult, UpdateGistError> {
    let url = format!("{}/gists/{}", base_url.trim_end_matches('/'), gist_id);

    let client = Client::new();

    let response = client
        .patch(url)
        .header("Authorization", format!("token {token}"))
        .header("Accept", "application/vnd.github.v3+json")
        .header("User-Agent", "rust-client")
        .json(request)
        .send()
        .await
        .map_err(|source| UpdateGistError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| UpdateGistError::ResponseRead { source })?;

    Ok(UpdateGistResult { body, status })
}

#[derive(Debug, Error)]
pub enum UpdateGistError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_request_serializes_to_files_map() {
        let request = UpdateGistRequest::single_file("prev.json", "{}".to_string());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "files": {
                    "prev.json": { "content": "{}" }
                }
            })
        );
    }
}
