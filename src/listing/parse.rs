use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{ListingPage, MediaType, PostCard};
use crate::identity::normalize_digits;
use crate::util::time::parse_date_str;

const PREVIEW_LEN: usize = 80;

pub fn parse_page(html: &str) -> ListingPage {
    let doc = Html::parse_document(html);

    let mut cards = Vec::new();
    if let Ok(sel) = Selector::parse("div.mbsc-card.jffPostClass") {
        for el in doc.select(&sel) {
            if !is_post_card(&el) {
                continue;
            }
            cards.push(parse_card(&el));
        }
    }

    ListingPage { cards, next_start_at: next_start_at(&doc) }
}

// Shoutouts, pinned cards and store widgets share the card markup but are
// not posts.
fn is_post_card(el: &ElementRef) -> bool {
    let classes = el.value().attr("class").unwrap_or("");
    let has = |name: &str| classes.split_whitespace().any(|c| c == name);
    if has("donotremove") || has("shoutout") {
        return false;
    }
    if let Ok(sel) = Selector::parse("div.storeItemWidget") {
        if el.select(&sel).next().is_some() {
            return false;
        }
    }
    true
}

fn parse_card(el: &ElementRef) -> PostCard {
    let raw_id = el
        .value()
        .attr("id")
        .or_else(|| el.value().attr("data-post-id"))
        .unwrap_or("");
    let id = normalize_digits(raw_id);

    let classes = el.value().attr("class").unwrap_or("");
    let has = |name: &str| classes.split_whitespace().any(|c| c == name);
    let media_type = if has("video") {
        MediaType::Video
    } else if has("photo") {
        MediaType::Photo
    } else if has("text") {
        MediaType::Text
    } else {
        MediaType::Unknown
    };

    let locked = select_first(el, "[class*=lockedContent]").is_some();

    let details = select_first(el, "div.fr-view")
        .map(|n| n.text().collect::<Vec<_>>().join("\n").trim().to_string())
        .unwrap_or_default();
    let title = preview(&details);

    let date = select_first(el, "div.mbsc-card-subtitle")
        .map(|n| n.text().collect::<Vec<_>>().join(" "))
        .and_then(|raw| parse_subtitle_date(&raw));

    let mut photos = Vec::new();
    if let Ok(sel) = Selector::parse("img.expandable") {
        for img in el.select(&sel) {
            if let Some(url) = img.value().attr("data-lazy").or_else(|| img.value().attr("src")) {
                photos.push(url.to_string());
            }
        }
    }

    let mut videos = Vec::new();
    if let Ok(sel) = Selector::parse("video source[src], video[src]") {
        for v in el.select(&sel) {
            if let Some(url) = v.value().attr("src") {
                videos.push(url.to_string());
            }
        }
    }

    PostCard { id, media_type, locked, title, details, date, photos, videos }
}

fn select_first<'a>(el: &ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    el.select(&sel).next()
}

// Subtitles read like "May 5, 2024 This post is for subscribers only".
fn parse_subtitle_date(raw: &str) -> Option<String> {
    let cleaned = match raw.find("This post") {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    parse_date_str(cleaned.trim())
}

fn preview(details: &str) -> String {
    let collapsed = collapse_whitespace(details);
    collapsed.chars().take(PREVIEW_LEN).collect::<String>().trim().to_string()
}

fn collapse_whitespace(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() { buf.push(' '); }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim().to_string()
}

// The page links to its own continuation; the StartAt parameter of the
// first getPosts.php link is the next offset.
fn next_start_at(doc: &Html) -> Option<u32> {
    let sel = Selector::parse(r#"a[href*="getPosts.php"]"#).ok()?;
    let link = doc.select(&sel).next()?;
    let href = link.value().attr("href")?;
    let re = Regex::new(r"StartAt=(\d+)").ok()?;
    re.captures(href)?.get(1)?.as_str().parse().ok()
}
