//! Data model: upstream wire shapes, listing payloads, and resolved streams.
//!
//! `Item`, `ScheduleBlock`, and `Channel` round-trip through JSON between the
//! listing and load steps: whatever a listing serializes, expansion must
//! deserialize back into the same value. Field names match the upstream
//! schedule document, so the same structs parse both the site's JSON and our
//! own payloads.

use serde::{Deserialize, Serialize};

/// A single live channel, identified either by a bare channel id or by an
/// absolute stream-page URL stored in the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Channel {
    #[serde(rename = "channel_name", default)]
    pub name: Option<String>,
    #[serde(rename = "channel_id", default)]
    pub id: Option<String>,
}

impl Channel {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: Some(id.into()),
        }
    }
}

/// One scheduled event: a time label, an event label, and the channels
/// carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScheduleBlock {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub channels: Option<Vec<Channel>>,
}

/// Opaque listing payload carried from a listing entry into `expand`.
///
/// Either a single channel (`title` + `url`) or a schedule event whose
/// `items` field holds a nested JSON string of [`ScheduleBlock`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Item {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub items: Option<String>,
}

/// One display entry in a listing group: a title and the serialized [`Item`]
/// handed back to `expand` when the entry is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub title: String,
    pub payload: String,
}

/// A titled group of listing entries ("24/7 Channels", or one schedule
/// category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelGroup {
    pub header: String,
    pub entries: Vec<ListingEntry>,
}

/// A playable sub-entry produced by `expand`: optional display name and
/// description plus the serialized channel list to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayableEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Serialized `Vec<Channel>`.
    pub payload: String,
}

/// Quality of a resolved stream variant.
///
/// The site's playlists are single-variant, so only `Unknown` is produced
/// today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamQuality {
    Unknown,
    /// Vertical resolution in pixels.
    Specific(u32),
}

/// Final output of stream resolution: a playable playlist URL plus the
/// referer the player must send to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStream {
    /// Channel display name.
    pub label: String,
    /// HLS playlist URL.
    pub media_url: String,
    /// Iframe authority with trailing slash; the CDN checks it.
    pub referer: String,
    /// Always true; the site serves segmented HLS only.
    pub is_segmented: bool,
    pub quality: StreamQuality,
}
