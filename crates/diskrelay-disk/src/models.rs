//! Wire and domain types for the public-resource API.

use serde::{Deserialize, Serialize};

/// Fallback filename when the provider omits one.
pub const DEFAULT_FILENAME: &str = "downloaded_file";

/// Kind of a listed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A downloadable file.
    File,
    /// A directory that can be navigated into.
    Dir,
}

/// One entry of a public-resource listing.
///
/// `download_ref` is synthesized by the gateway for files only, inside the
/// listing response; it is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceItem {
    /// Display name.
    pub name: String,

    /// Path of the item within the public resource.
    pub path: String,

    /// File or directory.
    #[serde(rename = "type")]
    pub kind: ResourceKind,

    /// MIME type; absent for directories and for files the provider has
    /// no metadata for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Gateway download URL, files only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_ref: Option<String>,
}

impl ResourceItem {
    /// Whether this entry is a file.
    pub fn is_file(&self) -> bool {
        self.kind == ResourceKind::File
    }
}

/// A directory listing as returned by the remote API, order preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Path echoed by the remote API.
    pub current_path: String,

    /// Items in remote insertion order.
    pub items: Vec<ResourceItem>,
}

/// Pre-signed, time-limited download reference. Obtained per request,
/// never cached or reused.
#[derive(Debug, Clone)]
pub struct DownloadTicket {
    /// Direct, unauthenticated download URL.
    pub href: String,

    /// Filename suggested by the provider, with the generic fallback
    /// applied.
    pub filename: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

/// Raw listing response: items live under `_embedded.items`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingResponse {
    #[serde(default)]
    pub path: String,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Embedded {
    #[serde(default)]
    pub items: Vec<ResourceItem>,
}

/// Raw download-link response.
#[derive(Debug, Deserialize)]
pub(crate) struct DownloadLinkResponse {
    pub href: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Filtering
// ─────────────────────────────────────────────────────────────────────────────

/// Project a listing down to items whose `mime_type` starts with `prefix`.
///
/// Exact prefix match, case-sensitive, no normalization. Items without a
/// `mime_type` (directories, metadata-less files) drop out unconditionally;
/// that asymmetry is deliberate and must not be "fixed" by defaulting the
/// MIME type.
pub fn filter_items(items: &[ResourceItem], prefix: &str) -> Vec<ResourceItem> {
    items
        .iter()
        .filter(|item| {
            item.mime_type
                .as_deref()
                .is_some_and(|mime| mime.starts_with(prefix))
        })
        .cloned()
        .collect()
}
