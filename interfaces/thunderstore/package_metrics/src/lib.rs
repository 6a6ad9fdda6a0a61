//! Thunderstore package-metrics API client

pub mod index;
