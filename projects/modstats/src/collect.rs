use chrono::{Local, TimeZone};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{info, warn};

use interfaces_github_gists::index as gists;
use interfaces_steam_workshop::index as workshop;
use interfaces_thunderstore_package_metrics::index as thunderstore;

use crate::catalog::{TrackedPackage, TRACKED_PACKAGES, WORKSHOP_IDS};
use crate::config::Config;
use crate::snapshot::{group_digits, Snapshot};

/// Every run overwrites this file in the gist with the latest snapshot.
pub const GIST_FILE_NAME: &str = "prev.json";

#[derive(Debug, Error)]
pub enum FetchPackageStatsError {
    #[error("FetchPackageMetrics: {source}")]
    FetchPackageMetrics {
        #[from]
        source: thunderstore::FetchPackageMetricsError,
    },

    #[error("UnexpectedStatus: {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        #[from]
        source: serde_json::Error,
    },
}

async fn fetch_package_stats(
    base_url: &str,
    package: &TrackedPackage,
) -> Result<thunderstore::PackageMetricsResponse, FetchPackageStatsError> {
    let thunderstore::PackageMetricsResult { body, status } =
        thunderstore::fetch_package_metrics(base_url, package.namespace, package.name).await?;

    if !status.is_success() {
        return Err(FetchPackageStatsError::UnexpectedStatus { status });
    }

    let metrics = serde_json::from_str(&body)?;
    Ok(metrics)
}

/// Fetch every tracked package and record the ones that respond. A package
/// that fails is logged and skipped; the cycle carries on without it.
pub async fn collect_packages(
    base_url: &str,
    packages: &[TrackedPackage],
    snapshot: &mut Snapshot,
) {
    for package in packages {
        match fetch_package_stats(base_url, package).await {
            Ok(metrics) => {
                snapshot.record_package(package.display_name, metrics.downloads, metrics.rating_score)
            }
            Err(err) => warn!("skipping {}: {err}", package.display_name),
        }
    }
}

#[derive(Debug, Error)]
pub enum CollectWorkshopError {
    #[error("FetchPublishedFileDetails: {source}")]
    FetchPublishedFileDetails {
        #[from]
        source: workshop::FetchPublishedFileDetailsError,
    },

    #[error("UnexpectedStatus: {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        #[from]
        source: serde_json::Error,
    },
}

/// One batched GetDetails call for all tracked Workshop ids. Unlike the
/// per-package loop, a failure here fails the whole cycle.
pub async fn collect_workshop(
    base_url: &str,
    api_key: &str,
    ids: &[&str],
    snapshot: &mut Snapshot,
) -> Result<(), CollectWorkshopError> {
    let workshop::GetDetailsResult { body, status } =
        workshop::fetch_published_file_details(base_url, api_key, ids).await?;

    if !status.is_success() {
        return Err(CollectWorkshopError::UnexpectedStatus { status });
    }

    let envelope: workshop::GetDetailsEnvelope = serde_json::from_str(&body)?;
    apply_workshop_details(snapshot, envelope.response.publishedfiledetails);

    Ok(())
}

pub fn apply_workshop_details(
    snapshot: &mut Snapshot,
    details: Vec<workshop::PublishedFileDetails>,
) {
    for item in details {
        match item.title {
            Some(title) => snapshot.record_workshop_item(
                &title,
                item.lifetime_subscriptions,
                item.vote_data.votes_up,
                item.vote_data.votes_down,
            ),
            // Deleted and hidden files come back untitled
            None => warn!("skipping workshop item without a title"),
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadSnapshotError {
    #[error("SerializeSnapshot: {source}")]
    SerializeSnapshot {
        #[from]
        source: serde_json::Error,
    },

    #[error("UpdateGist: {source}")]
    UpdateGist {
        #[from]
        source: gists::UpdateGistError,
    },

    #[error("GistRejected: {status} - {body}")]
    GistRejected { status: StatusCode, body: String },
}

pub async fn upload_snapshot(
    config: &Config,
    snapshot: &Snapshot,
) -> Result<(), UploadSnapshotError> {
    let content = snapshot
        .to_json()
        .map_err(|source| UploadSnapshotError::SerializeSnapshot { source })?;

    let request = gists::UpdateGistRequest::single_file(GIST_FILE_NAME, content);

    let result = gists::update_gist(
        &config.github_base_url,
        &config.github_token,
        &config.gist_id,
        &request,
    )
    .await
    .map_err(|source| UploadSnapshotError::UpdateGist { source })?;

    if result.status != StatusCode::OK {
        return Err(UploadSnapshotError::GistRejected {
            status: result.status,
            body: result.body,
        });
    }

    info!("uploaded snapshot to gist {}", config.gist_id);
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunCycleError {
    #[error("CollectWorkshop: {source}")]
    CollectWorkshop {
        #[from]
        source: CollectWorkshopError,
    },

    #[error("UploadSnapshot: {source}")]
    UploadSnapshot {
        #[from]
        source: UploadSnapshotError,
    },
}

/// One full cycle: fetch both sources, log the totals, upload the snapshot.
pub async fn run_cycle(config: &Config) -> Result<Snapshot, RunCycleError> {
    let mut snapshot = Snapshot::new(unix_now());

    collect_packages(&config.thunderstore_base_url, TRACKED_PACKAGES, &mut snapshot).await;

    collect_workshop(
        &config.steam_base_url,
        &config.steam_api_key,
        WORKSHOP_IDS,
        &mut snapshot,
    )
    .await?;

    report_totals(&snapshot);
    upload_snapshot(config, &snapshot).await?;

    Ok(snapshot)
}

fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

fn report_totals(snapshot: &Snapshot) {
    info!("downloads: {}", group_digits(snapshot.total_downloads));
    info!("likes:     {}", group_digits(snapshot.total_ratings));
    info!("dislikes:  {}", group_digits(snapshot.total_ratings_bad));
    info!("last checked: {}", local_time(snapshot.last_checked));
}

fn local_time(unix_seconds: f64) -> String {
    match Local.timestamp_opt(unix_seconds as i64, 0) {
        chrono::LocalResult::Single(time) => time.format("%d-%m-%Y %H:%M:%S").to_string(),
        _ => format!("{unix_seconds}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(
        title: Option<&str>,
        subscriptions: u64,
        votes_up: u64,
        votes_down: u64,
    ) -> workshop::PublishedFileDetails {
        workshop::PublishedFileDetails {
            title: title.map(str::to_string),
            lifetime_subscriptions: subscriptions,
            vote_data: workshop::VoteData { votes_up, votes_down },
        }
    }

    #[test]
    fn records_titled_workshop_items_under_steam_prefix() {
        let mut snapshot = Snapshot::new(0.0);
        apply_workshop_details(
            &mut snapshot,
            vec![detail(Some("Sector Zero"), 4210, 130, 4)],
        );

        assert_eq!(snapshot.total_downloads, 4210);
        assert_eq!(snapshot.total_ratings, 130);
        assert_eq!(snapshot.total_ratings_bad, 4);
        assert!(snapshot.items.contains_key("Steam - Sector Zero"));
    }

    #[test]
    fn skips_untitled_workshop_items() {
        let mut snapshot = Snapshot::new(0.0);
        apply_workshop_details(
            &mut snapshot,
            vec![
                detail(None, 999, 9, 9),
                detail(Some("Kept"), 10, 1, 0),
            ],
        );

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.total_downloads, 10);
        assert_eq!(snapshot.total_ratings, 1);
        assert_eq!(snapshot.total_ratings_bad, 0);
    }

    #[test]
    fn combines_both_sources_into_one_total() {
        let mut snapshot = Snapshot::new(0.0);
        snapshot.record_package("Breakable Windows", 1500, 60);
        apply_workshop_details(&mut snapshot, vec![detail(Some("Sector Zero"), 500, 40, 2)]);

        assert_eq!(snapshot.total_downloads, 2000);
        assert_eq!(snapshot.total_ratings, 100);
        assert_eq!(snapshot.total_ratings_bad, 2);
    }
}
