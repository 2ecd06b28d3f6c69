//! Projection of raw API items into `MediaItem`s.

use crate::api::types::RawItem;
use crate::media::item::{video_url, MediaItem};

/// Project a raw API item, dropping entries without an id.
///
/// Missing author, caption or counters fall back to empty strings and zero.
pub fn parse_item(raw: &RawItem) -> Option<MediaItem> {
    if raw.id.is_empty() {
        return None;
    }

    let author = raw
        .author
        .as_ref()
        .and_then(|a| a.unique_id.clone())
        .unwrap_or_default();
    let stats = raw.stats.clone().unwrap_or_default();

    Some(MediaItem {
        url: video_url(&author, &raw.id),
        id: raw.id.clone(),
        description: raw.desc.clone().unwrap_or_default(),
        author,
        plays: stats.play_count,
        likes: stats.digg_count,
        comments: stats.comment_count,
        shares: stats.share_count,
    })
}

/// Project a page of raw items, preserving order.
pub fn parse_items(raw: &[RawItem]) -> Vec<MediaItem> {
    raw.iter().filter_map(parse_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{RawAuthor, RawStats};

    #[test]
    fn test_parse_full_item() {
        let raw = RawItem {
            id: "42".into(),
            desc: Some("dance".into()),
            author: Some(RawAuthor {
                unique_id: Some("bob".into()),
            }),
            stats: Some(RawStats {
                play_count: 100,
                digg_count: 20,
                comment_count: 3,
                share_count: 1,
            }),
        };

        let item = parse_item(&raw).unwrap();
        assert_eq!(item.url, "https://www.tiktok.com/@bob/video/42");
        assert_eq!(item.description, "dance");
        assert_eq!(item.likes, 20);
        assert_eq!(item.shares, 1);
    }

    #[test]
    fn test_parse_item_defaults() {
        let raw = RawItem {
            id: "7".into(),
            ..Default::default()
        };

        let item = parse_item(&raw).unwrap();
        assert_eq!(item.author, "");
        assert_eq!(item.url, "https://www.tiktok.com/@/video/7");
        assert_eq!(item.plays, 0);
        assert_eq!(item.comments, 0);
    }

    #[test]
    fn test_parse_items_drops_missing_ids() {
        let raw = vec![
            RawItem {
                id: "1".into(),
                ..Default::default()
            },
            RawItem::default(),
            RawItem {
                id: "3".into(),
                ..Default::default()
            },
        ];

        let ids: Vec<_> = parse_items(&raw).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
