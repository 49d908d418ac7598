//! The channel resolver: per-channel iframe chain walking with concurrent
//! fan-out across a batch.
//!
//! The site root is held as an immutable value; callers that need to follow
//! a domain hop call [`ChannelResolver::discover_root`] and build a new
//! resolver from the returned root instead of mutating shared state.

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::extract;
use crate::http_client::SiteClient;
use crate::listing::GRID_PATH;
use crate::model::{Channel, ResolvedStream, StreamQuality};
use crate::urls::{base_url, fix_channel_url};

/// Default site root; the listing page redirects here when the site moves.
pub const DEFAULT_ROOT: &str = "https://dlhd.so";

/// Scrapes the listing site and resolves channels to playlist URLs.
pub struct ChannelResolver {
    client: SiteClient,
    root: String,
}

impl ChannelResolver {
    pub fn new() -> Result<Self> {
        Self::with_root(DEFAULT_ROOT)
    }

    pub fn with_root(root: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: SiteClient::new()?,
            root: root.into(),
        })
    }

    /// Site root used for stream-page URLs and as the extraction referer.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn client(&self) -> &SiteClient {
        &self.client
    }

    /// Fetch the grid page and return the post-redirect site root.
    ///
    /// Returns a fresh value; build a new resolver with it to follow a hop.
    #[instrument(skip(self))]
    pub async fn discover_root(&self) -> Result<String> {
        let url = format!("{}{GRID_PATH}", self.root);
        let (final_url, _) = self.client.get_final(&url).await?;
        base_url(&final_url)
    }

    /// Resolve a serialized channel list (a [`PlayableEntry`] payload).
    ///
    /// [`PlayableEntry`]: crate::model::PlayableEntry
    pub async fn resolve_payload(&self, payload: &str) -> Result<Vec<ResolvedStream>> {
        let channels: Vec<Channel> =
            serde_json::from_str(payload).map_err(|e| Error::MalformedPayload(e.to_string()))?;
        self.resolve_channels(&channels).await
    }

    /// Resolve a batch of channels concurrently.
    ///
    /// Output preserves input order (`join_all` keeps positions). A channel
    /// that fails extraction contributes no entry; a missing iframe is a
    /// hard error only when the batch holds exactly one channel. Transport
    /// errors propagate.
    #[instrument(skip_all, fields(channels = channels.len()))]
    pub async fn resolve_channels(&self, channels: &[Channel]) -> Result<Vec<ResolvedStream>> {
        let results = join_all(channels.iter().map(|ch| self.resolve_one(ch))).await;
        collect_streams(results, channels.len() == 1)
    }

    /// Resolve a batch and hand each stream to `callback`.
    pub async fn resolve_with<F>(&self, channels: &[Channel], mut callback: F) -> Result<()>
    where
        F: FnMut(ResolvedStream),
    {
        for stream in self.resolve_channels(channels).await? {
            callback(stream);
        }
        Ok(())
    }

    /// Walk one channel's chain: stream page -> iframe -> playlist URL.
    async fn resolve_one(&self, channel: &Channel) -> Result<Option<ResolvedStream>> {
        let Some(id) = channel.id.as_deref() else {
            debug!(name = ?channel.name, "channel without id, skipping");
            return Ok(None);
        };
        let page_url = fix_channel_url(&self.root, id);

        let page = self.client.get_text(&page_url).await?;
        let iframe = extract::iframe_src(&page)
            .ok_or_else(|| Error::IframeNotFound(page_url.clone()))?;
        let iframe_host = base_url(&iframe)?;

        // The extraction endpoint checks the listing site's referer, not
        // the iframe host's.
        let body = self.client.get_text_with_referer(&iframe, &self.root).await?;
        let Some(media_url) = extract::media_url(&body) else {
            debug!(iframe = %iframe, "no media URL in embed page, skipping");
            return Ok(None);
        };
        let Some(label) = channel.name.clone() else {
            debug!(id = %id, "channel without name, skipping");
            return Ok(None);
        };

        Ok(Some(ResolvedStream {
            label,
            media_url,
            referer: format!("{iframe_host}/"),
            is_segmented: true,
            quality: StreamQuality::Unknown,
        }))
    }
}

/// Fold per-channel outcomes into the batch result.
///
/// Skips extraction misses, downgrades a missing iframe to a skip unless the
/// batch held a single channel, and propagates everything else.
fn collect_streams(
    results: Vec<Result<Option<ResolvedStream>>>,
    single: bool,
) -> Result<Vec<ResolvedStream>> {
    let mut streams = Vec::new();
    for result in results {
        match result {
            Ok(Some(stream)) => streams.push(stream),
            Ok(None) => {}
            Err(Error::IframeNotFound(page)) if !single => {
                warn!(page = %page, "no iframe on stream page, skipping channel");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(streams)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(label: &str) -> ResolvedStream {
        ResolvedStream {
            label: label.into(),
            media_url: format!("https://cdn.example/{label}/playlist.m3u8"),
            referer: "https://embed.example.com/".into(),
            is_segmented: true,
            quality: StreamQuality::Unknown,
        }
    }

    #[test]
    fn batch_skips_missing_iframe_and_keeps_order() {
        let results = vec![
            Ok(Some(stream("one"))),
            Err(Error::IframeNotFound("https://example.com/stream/stream-2.php".into())),
            Ok(Some(stream("three"))),
        ];
        let streams = collect_streams(results, false).unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].label, "one");
        assert_eq!(streams[1].label, "three");
    }

    #[test]
    fn single_channel_missing_iframe_is_hard_error() {
        let results = vec![Err(Error::IframeNotFound(
            "https://example.com/stream/stream-2.php".into(),
        ))];
        assert!(matches!(
            collect_streams(results, true),
            Err(Error::IframeNotFound(_))
        ));
    }

    #[test]
    fn extraction_miss_is_silent_even_when_single() {
        let streams = collect_streams(vec![Ok(None)], true).unwrap();
        assert!(streams.is_empty());
    }

    #[test]
    fn malformed_batch_payload_fails() {
        let err = tokio_test::block_on(async {
            ChannelResolver::new()
                .unwrap()
                .resolve_payload("{not a channel list}")
                .await
        })
        .unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }
}
