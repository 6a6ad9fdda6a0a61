//! GitHub Gists API client

pub mod index;
