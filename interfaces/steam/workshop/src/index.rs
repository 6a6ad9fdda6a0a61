use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

pub struct GetDetailsResult {
    pub body: String,
    pub status: StatusCode,
}

#[derive(Debug, Deserialize)]
pub struct GetDetailsEnvelope {
    pub response: GetDetailsResponse,
}

#[derive(Debug, Deserialize)]
pub struct GetDetailsResponse {
    #[serde(default)]
    pub publishedfiledetails: Vec<PublishedFileDetails>,
}

/// One Workshop item. Deleted or hidden files come back without a title,
/// and Steam omits `lifetime_subscriptions` and `vote_data` on some
/// entries; absent counts as zero.
#[derive(Debug, Deserialize)]
pub struct PublishedFileDetails {
    pub title: Option<String>,
    #[serde(default)]
    pub lifetime_subscriptions: u64,
    #[serde(default)]
    pub vote_data: VoteData,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoteData {
    #[serde(default)]
    pub votes_up: u64,
    #[serde(default)]
    pub votes_down: u64,
}

/// Query pairs for a batched GetDetails call: `key`, `includevotes`, and one
/// indexed `publishedfileids[i]` pair per item.
pub fn details_query(api_key: &str, ids: &[&str]) -> Vec<(String, String)> {
    let mut params = vec![
        ("key".to_string(), api_key.to_string()),
        ("includevotes".to_string(), "true".to_string()),
    ];

    for (i, id) in ids.iter().enumerate() {
        params.push((format!("publishedfileids[{i}]"), (*id).to_string()));
    }

    params
}

pub async fn fetch_published_file_details(
    base_url: &str,
    api_key: &str,
    ids: &[&str],
) -> Result<GetDetailsResult, FetchPublishedFileDetailsError> {
    let url = format!(
        "{}/IPublishedFileService/GetDetails/v1/",
        base_url.trim_end_matches('/'),
    );

    let client = Client::new();

    let response = client
        .get(url)
        .query(&details_query(api_key, ids))
        .header("User-Agent", "rust-client")
        .send()
        .await
        .map_err(|source| FetchPublishedFileDetailsError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchPublishedFileDetailsError::ResponseRead { source })?;

    Ok(GetDetailsResult { body, status })
}

#[derive(Debug, Error)]
pub enum FetchPublishedFileDetailsError {
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
    fn builds_indexed_query_pairs() {
        let params = details_query("SECRET", &["3383270520", "3383837077"]);
        assert_eq!(
            params,
            vec![
                ("key".to_string(), "SECRET".to_string()),
                ("includevotes".to_string(), "true".to_string()),
                ("publishedfileids[0]".to_string(), "3383270520".to_string()),
                ("publishedfileids[1]".to_string(), "3383837077".to_string()),
            ]
        );
    }

    #[test]
    fn deserializes_full_details() {
        let body = r#"{
            "response": {
                "publishedfiledetails": [
                    {
                        "title": "Sector Zero",
                        "lifetime_subscriptions": 4210,
                        "vote_data": { "score": 0.9, "votes_up": 130, "votes_down": 4 }
                    }
                ]
            }
        }"#;
        let parsed: GetDetailsEnvelope = serde_json::from_str(body).unwrap();
        let details = &parsed.response.publishedfiledetails;
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].title.as_deref(), Some("Sector Zero"));
        assert_eq!(details[0].lifetime_subscriptions, 4210);
        assert_eq!(details[0].vote_data.votes_up, 130);
        assert_eq!(details[0].vote_data.votes_down, 4);
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let body = r#"{
            "response": {
                "publishedfiledetails": [
                    { "title": "Hidden item" }
                ]
            }
        }"#;
        let parsed: GetDetailsEnvelope = serde_json::from_str(body).unwrap();
        let item = &parsed.response.publishedfiledetails[0];
        assert_eq!(item.lifetime_subscriptions, 0);
        assert_eq!(item.vote_data.votes_up, 0);
        assert_eq!(item.vote_data.votes_down, 0);
    }

    #[test]
    fn missing_details_array_is_empty() {
        let parsed: GetDetailsEnvelope = serde_json::from_str(r#"{"response": {}}"#).unwrap();
        assert!(parsed.response.publishedfiledetails.is_empty());
    }
}
