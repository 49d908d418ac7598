//! Channel listing: the 24/7 grid page and the generated schedule document.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::model::{ChannelGroup, Item, ListingEntry, ScheduleBlock};
use crate::resolver::ChannelResolver;
use crate::urls::{absolutize, base_url};

/// Path of the channel grid page, relative to the site root.
pub const GRID_PATH: &str = "/24-7-channels.php";
/// Path of the generated schedule JSON, relative to the site root.
pub const SCHEDULE_PATH: &str = "/schedule/schedule-generated.json";

const GRID_HEADER: &str = "24/7 Channels";

static CARD_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.grid-container div.grid-item").expect("valid selector"));
static TITLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("strong").expect("valid selector"));
static LINK_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Which upstream endpoint a listing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    /// The HTML grid of always-on channels.
    Grid,
    /// The JSON schedule of upcoming events.
    Schedule,
}

impl ChannelResolver {
    /// List channel groups from the grid page or the schedule document.
    #[instrument(skip(self))]
    pub async fn channel_groups(&self, source: ListingSource) -> Result<Vec<ChannelGroup>> {
        match source {
            ListingSource::Grid => {
                let url = format!("{}{GRID_PATH}", self.root());
                // Absolutize against where the page actually came from; the
                // site hops domains and the grid page redirects.
                let (final_url, body) = self.client().get_final(&url).await?;
                let root = base_url(&final_url)?;
                let entries = parse_grid(&body, &root, None);
                debug!(entries = entries.len(), root = %root, "parsed channel grid");
                if entries.is_empty() {
                    return Ok(vec![]);
                }
                Ok(vec![ChannelGroup {
                    header: GRID_HEADER.to_string(),
                    entries,
                }])
            }
            ListingSource::Schedule => {
                let url = format!("{}{SCHEDULE_PATH}", self.root());
                let body = self.client().get_text(&url).await?;
                let groups = parse_schedule(&body)?;
                debug!(groups = groups.len(), "parsed schedule");
                Ok(groups)
            }
        }
    }

    /// Search the grid for cards whose rendered text contains `query`.
    ///
    /// Plain case-sensitive substring containment, no ranking.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<ListingEntry>> {
        let url = format!("{}{GRID_PATH}", self.root());
        let (final_url, body) = self.client().get_final(&url).await?;
        let root = base_url(&final_url)?;
        Ok(parse_grid(&body, &root, Some(query)))
    }
}

/// Parse grid cards into listing entries.
///
/// Cards with an empty title or href are skipped, not failed. With a filter,
/// only cards whose collected text contains it are kept.
fn parse_grid(html: &str, root: &str, filter: Option<&str>) -> Vec<ListingEntry> {
    let doc = Html::parse_document(html);
    doc.select(&CARD_SEL)
        .filter_map(|card| {
            if let Some(query) = filter {
                let text: String = card.text().collect();
                if !text.contains(query) {
                    return None;
                }
            }
            let title = card
                .select(&TITLE_SEL)
                .next()
                .map(|t| t.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            let href = card
                .select(&LINK_SEL)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                return None;
            }
            let item = Item {
                title: Some(title.clone()),
                url: Some(absolutize(root, href)),
                items: None,
            };
            let payload = serde_json::to_string(&item).ok()?;
            Some(ListingEntry { title, payload })
        })
        .collect()
}

/// Parse the schedule document: category -> event -> blocks.
///
/// One group per category, one entry per event; events with no channels and
/// categories with no surviving events are omitted.
fn parse_schedule(json: &str) -> Result<Vec<ChannelGroup>> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    let categories = doc
        .as_object()
        .ok_or_else(|| Error::MalformedPayload("schedule document is not an object".into()))?;

    let mut groups = Vec::new();
    for (header, events) in categories {
        let Some(events) = events.as_object() else {
            continue;
        };
        let mut entries = Vec::new();
        for (event, value) in events {
            let Ok(blocks) = serde_json::from_value::<Vec<ScheduleBlock>>(value.clone()) else {
                continue;
            };
            if blocks.is_empty() {
                continue;
            }
            let item = Item {
                title: Some(event.clone()),
                url: None,
                items: Some(serde_json::to_string(&blocks)?),
            };
            entries.push(ListingEntry {
                title: event.clone(),
                payload: serde_json::to_string(&item)?,
            });
        }
        if !entries.is_empty() {
            groups.push(ChannelGroup {
                header: header.clone(),
                entries,
            });
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID_FIXTURE: &str = r#"<html><body>
        <div class="grid-container">
            <div class="grid-item"><a href="/stream/stream-51.php"><strong>Sports One</strong></a></div>
            <div class="grid-item"><a href="/stream/stream-52.php"><strong>News 24</strong></a></div>
            <div class="grid-item"><a href="/stream/stream-53.php"><strong></strong></a></div>
            <div class="grid-item"><strong>No Link</strong></div>
        </div>
    </body></html>"#;

    #[test]
    fn grid_cards_with_title_and_href_become_entries() {
        let entries = parse_grid(GRID_FIXTURE, "https://example.com", None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Sports One");

        let item: Item = serde_json::from_str(&entries[0].payload).unwrap();
        assert_eq!(item.title.as_deref(), Some("Sports One"));
        assert_eq!(
            item.url.as_deref(),
            Some("https://example.com/stream/stream-51.php")
        );
        assert!(item.items.is_none());
    }

    #[test]
    fn grid_filter_is_case_sensitive_substring() {
        let entries = parse_grid(GRID_FIXTURE, "https://example.com", Some("Sports"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Sports One");

        assert!(parse_grid(GRID_FIXTURE, "https://example.com", Some("sports")).is_empty());
    }

    #[test]
    fn schedule_groups_follow_categories() {
        let json = r#"{
            "Soccer": {
                "Cup Final 18:00": [
                    {"time": "18:00", "event": "Cup Final",
                     "channels": [{"channel_name": "Sports One", "channel_id": "51"}]}
                ],
                "Empty Event": []
            },
            "Tennis": {
                "Nothing Here": []
            }
        }"#;
        let groups = parse_schedule(json).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].header, "Soccer");
        assert_eq!(groups[0].entries.len(), 1);
        assert_eq!(groups[0].entries[0].title, "Cup Final 18:00");

        // Payload round-trips into the same blocks the schedule carried.
        let item: Item = serde_json::from_str(&groups[0].entries[0].payload).unwrap();
        let blocks: Vec<ScheduleBlock> = serde_json::from_str(item.items.as_deref().unwrap()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].event.as_deref(), Some("Cup Final"));
    }

    #[test]
    fn schedule_rejects_non_object_document() {
        assert!(parse_schedule("[1,2,3]").is_err());
    }
}
