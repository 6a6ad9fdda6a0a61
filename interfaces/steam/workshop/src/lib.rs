//! Steam IPublishedFileService (Workshop) API client

pub mod index;
