use regex::Regex;
use std::collections::HashSet;

use super::types::{self, GalleryResult, PerformerResult, ScenePerformer, SceneResult, Tag};
use crate::listing::PostCard;
use crate::profile::PerformerProfile;

const FALLBACK_TITLE: &str = "JustForFans post";

pub fn build_scene(card: &PostCard, url: Option<&str>, performer: Option<ScenePerformer>) -> SceneResult {
    SceneResult {
        title: scene_title(card),
        details: non_empty(&card.details),
        date: card.date.clone(),
        url: url.map(str::to_string),
        urls: url.map(str::to_string).into_iter().collect(),
        code: non_empty(&card.id),
        studio: types::studio(),
        image: card.primary_media().map(str::to_string),
        tags: extract_hashtags(&card.details),
        performers: performer.into_iter().collect(),
    }
}

pub fn build_gallery(card: &PostCard, url: Option<&str>, performer: Option<ScenePerformer>) -> GalleryResult {
    GalleryResult {
        title: scene_title(card),
        details: non_empty(&card.details),
        date: card.date.clone(),
        url: url.map(str::to_string),
        urls: card.photos.clone(),
        code: non_empty(&card.id),
        studio: types::studio(),
        tags: extract_hashtags(&card.details),
        performers: performer.into_iter().collect(),
    }
}

pub fn build_performer(profile: &PerformerProfile) -> PerformerResult {
    PerformerResult {
        name: profile.name.clone(),
        urls: profile.urls.clone(),
        details: profile.details.clone(),
        images: profile.image.clone().into_iter().collect(),
        twitter: profile.twitter.clone(),
        instagram: profile.instagram.clone(),
    }
}

/// Performer sub-record priority: operator override, then parsed profile,
/// else absent.
pub fn select_scene_performer(
    name_override: Option<&str>,
    url_override: Option<&str>,
    parsed: Option<&PerformerProfile>,
    fallback_url: Option<&str>,
) -> Option<ScenePerformer> {
    if let Some(name) = name_override {
        return Some(ScenePerformer {
            name: name.to_string(),
            url: url_override.or(fallback_url).map(str::to_string),
        });
    }
    parsed.map(|p| ScenePerformer {
        name: p.name.clone(),
        url: p.urls.first().map(String::as_str).or(fallback_url).map(str::to_string),
    })
}

fn scene_title(card: &PostCard) -> String {
    let base = if card.title.is_empty() { FALLBACK_TITLE } else { &card.title };
    match &card.date {
        Some(d) => format!("{base} ({d})"),
        None => base.to_string(),
    }
}

// Hashtags mined from the details text, deduped, sorted case-insensitively.
pub fn extract_hashtags(text: &str) -> Vec<Tag> {
    let Ok(re) = Regex::new(r"#(\w+)") else { return vec![] };
    let mut seen = HashSet::new();
    let mut tags: Vec<String> = Vec::new();
    for caps in re.captures_iter(text) {
        let tag = caps[1].to_string();
        if seen.insert(tag.clone()) {
            tags.push(tag);
        }
    }
    tags.sort_by_key(|t| t.to_lowercase());
    tags.into_iter().map(|name| Tag { name }).collect()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::MediaType;

    fn card() -> PostCard {
        PostCard {
            id: "10".to_string(),
            media_type: MediaType::Video,
            locked: false,
            title: "Summer shoot".to_string(),
            details: "Summer shoot #beach #Sun".to_string(),
            date: Some("2024-05-06".to_string()),
            photos: vec!["https://cdn.example/p1.jpg".into(), "https://cdn.example/p2.jpg".into()],
            videos: vec!["https://cdn.example/clip.mp4".into()],
        }
    }

    #[test]
    fn scene_prefers_video_over_photo() {
        let scene = build_scene(&card(), Some("https://justfor.fans/blake"), None);
        assert_eq!(scene.image.as_deref(), Some("https://cdn.example/clip.mp4"));
        assert_eq!(scene.title, "Summer shoot (2024-05-06)");
        assert_eq!(scene.code.as_deref(), Some("10"));
    }

    #[test]
    fn photo_only_card_uses_first_photo() {
        let mut c = card();
        c.videos.clear();
        let scene = build_scene(&c, None, None);
        assert_eq!(scene.image.as_deref(), Some("https://cdn.example/p1.jpg"));
        assert_eq!(scene.url, None);
        assert!(scene.urls.is_empty());
    }

    #[test]
    fn gallery_preserves_photo_order() {
        let gallery = build_gallery(&card(), None, None);
        assert_eq!(
            gallery.urls,
            vec!["https://cdn.example/p1.jpg", "https://cdn.example/p2.jpg"]
        );
    }

    #[test]
    fn hashtags_deduped_and_sorted() {
        let tags = extract_hashtags("#zebra #Apple #zebra #mango");
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "mango", "zebra"]);
    }

    #[test]
    fn performer_override_wins() {
        let profile = PerformerProfile {
            name: "Parsed Name".into(),
            urls: vec!["https://justfor.fans/parsed".into()],
            details: None,
            image: None,
            twitter: None,
            instagram: None,
        };
        let p = select_scene_performer(Some("Override"), None, Some(&profile), Some("https://fallback"));
        let p = p.unwrap();
        assert_eq!(p.name, "Override");
        assert_eq!(p.url.as_deref(), Some("https://fallback"));

        let p = select_scene_performer(None, None, Some(&profile), None).unwrap();
        assert_eq!(p.name, "Parsed Name");
        assert_eq!(p.url.as_deref(), Some("https://justfor.fans/parsed"));

        assert!(select_scene_performer(None, None, None, Some("https://x")).is_none());
    }

    #[test]
    fn empty_title_falls_back() {
        let mut c = card();
        c.title.clear();
        c.date = None;
        let scene = build_scene(&c, None, None);
        assert_eq!(scene.title, "JustForFans post");
    }
}
