// src/models/mod.rs

//! Domain models for pouetspy.

mod config;
mod finding;
mod production;
mod selectors;

// Re-export all public types
pub use config::{Config, Fetcher, HttpConfig, OutputConfig, SiteConfig, StorageConfig};
pub use finding::Finding;
pub use production::{Comment, Listing, ListingEntry, Production};
pub use selectors::PageSelectors;
