//! Client for the Yandex Disk public-resource API.
//!
//! Covers the two operations the gateway needs: directory listings of a
//! public share and the two-step download protocol (resolve a pre-signed
//! href, then fetch its bytes). Every outbound call carries a bounded
//! timeout; there are no retries and nothing is cached.

pub mod client;
pub mod error;
pub mod models;

pub use client::{DiskClient, REQUEST_TIMEOUT};
pub use error::{ApiError, Result};
pub use models::{
    filter_items, DownloadTicket, Listing, ResourceItem, ResourceKind, DEFAULT_FILENAME,
};
