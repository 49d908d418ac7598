//! Detail expansion: turn a listing payload into playable entries.

use crate::error::{Error, Result};
use crate::model::{Channel, Item, PlayableEntry, ScheduleBlock};

/// Expand a serialized [`Item`] into the entries a player can resolve.
///
/// A plain channel item yields exactly one unnamed entry. A schedule item
/// yields one entry per event block, labelled `"<event> • <time>"`; blocks
/// without channels are skipped. A payload that does not deserialize fails
/// with [`Error::MalformedPayload`].
pub fn expand(payload: &str) -> Result<Vec<PlayableEntry>> {
    let item: Item =
        serde_json::from_str(payload).map_err(|e| Error::MalformedPayload(e.to_string()))?;

    let Some(items) = item.items.as_deref().filter(|s| !s.is_empty()) else {
        // Single channel: wrap title + url as a one-channel batch.
        let channels = vec![Channel {
            name: item.title,
            id: item.url,
        }];
        return Ok(vec![PlayableEntry {
            name: None,
            description: None,
            payload: serde_json::to_string(&channels)?,
        }]);
    };

    let blocks: Vec<ScheduleBlock> =
        serde_json::from_str(items).map_err(|e| Error::MalformedPayload(e.to_string()))?;

    let entries = blocks
        .into_iter()
        .filter_map(|block| {
            let channels = block.channels.filter(|c| !c.is_empty())?;
            let name = format!(
                "{} • {}",
                block.event.as_deref().unwrap_or(""),
                block.time.as_deref().unwrap_or("")
            );
            let description = channels
                .iter()
                .filter_map(|c| c.name.as_deref())
                .collect::<Vec<_>>()
                .join(" • ");
            let payload = serde_json::to_string(&channels).ok()?;
            Some(PlayableEntry {
                name: Some(name),
                description: Some(description),
                payload,
            })
        })
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_item(blocks: &[ScheduleBlock]) -> String {
        serde_json::to_string(&Item {
            title: Some("Soccer".into()),
            url: None,
            items: Some(serde_json::to_string(blocks).unwrap()),
        })
        .unwrap()
    }

    #[test]
    fn single_channel_item_yields_one_entry() {
        let payload = serde_json::to_string(&Item {
            title: Some("Sports One".into()),
            url: Some("https://example.com/stream/stream-51.php".into()),
            items: None,
        })
        .unwrap();

        let entries = expand(&payload).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].name.is_none());

        let channels: Vec<Channel> = serde_json::from_str(&entries[0].payload).unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name.as_deref(), Some("Sports One"));
        assert_eq!(
            channels[0].id.as_deref(),
            Some("https://example.com/stream/stream-51.php")
        );
    }

    #[test]
    fn schedule_item_yields_one_entry_per_block() {
        let blocks = vec![
            ScheduleBlock {
                time: Some("18:00".into()),
                event: Some("Cup Final".into()),
                channels: Some(vec![
                    Channel::new("Sports One", "51"),
                    Channel::new("Sports Two", "52"),
                ]),
            },
            ScheduleBlock {
                time: Some("20:00".into()),
                event: Some("Late Game".into()),
                channels: Some(vec![Channel::new("News 24", "60")]),
            },
        ];

        let entries = expand(&schedule_item(&blocks)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_deref(), Some("Cup Final • 18:00"));
        assert_eq!(
            entries[0].description.as_deref(),
            Some("Sports One • Sports Two")
        );

        let channels: Vec<Channel> = serde_json::from_str(&entries[1].payload).unwrap();
        assert_eq!(channels, vec![Channel::new("News 24", "60")]);
    }

    #[test]
    fn blocks_without_channels_are_skipped() {
        let blocks = vec![
            ScheduleBlock {
                time: Some("18:00".into()),
                event: Some("Cup Final".into()),
                channels: Some(vec![Channel::new("Sports One", "51")]),
            },
            ScheduleBlock {
                time: Some("19:00".into()),
                event: Some("No Coverage".into()),
                channels: Some(vec![]),
            },
            ScheduleBlock {
                time: Some("20:00".into()),
                event: Some("Missing".into()),
                channels: None,
            },
        ];

        let entries = expand(&schedule_item(&blocks)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.as_deref(), Some("Cup Final • 18:00"));
    }

    #[test]
    fn malformed_payload_is_a_hard_failure() {
        let err = expand("not json at all").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));

        // Valid outer item, garbage nested items string.
        let payload = serde_json::to_string(&Item {
            title: Some("Soccer".into()),
            url: None,
            items: Some("{broken".into()),
        })
        .unwrap();
        assert!(matches!(
            expand(&payload).unwrap_err(),
            Error::MalformedPayload(_)
        ));
    }
}
