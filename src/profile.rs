use regex::Regex;
use scraper::{Html, Selector};

use crate::identity::{normalize_digits, username_from_url};

/// Performer data parsed from a profile page. Everything here is optional
/// input to the mapper; parsing never fails.
#[derive(Debug, Clone)]
pub struct PerformerProfile {
    pub name: String,
    pub urls: Vec<String>,
    pub details: Option<String>,
    pub image: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

pub fn parse_profile(url: &str, html: &str) -> PerformerProfile {
    let doc = Html::parse_document(html);

    // 1) Preferred: og:title, then twitter:title, then <title>
    let mut name = meta_content(&doc, "meta[property=\"og:title\"]")
        .or_else(|| meta_content(&doc, "meta[name=\"twitter:title\"]"))
        .or_else(|| title_text(&doc))
        .map(|n| clean_profile_name(&n))
        .unwrap_or_default();
    if name.is_empty() {
        name = match username_from_url(url) {
            Some(slug) => slug.replace('_', " "),
            None => "JustForFans performer".to_string(),
        };
    }

    let mut details = meta_content(&doc, "meta[property=\"og:description\"]")
        .or_else(|| meta_content(&doc, "meta[name=\"twitter:description\"]"))
        .filter(|d| !looks_generic_description(d));
    if details.is_none() {
        details = extract_bio(&doc);
    }

    let image = meta_content(&doc, "meta[property=\"og:image\"]")
        .or_else(|| meta_content(&doc, "meta[name=\"twitter:image\"]"));

    let socials = extract_social_links(&doc);
    let mut urls = vec![url.to_string()];
    if let Some(b) = &socials.bluesky {
        urls.push(b.clone());
    }
    urls.extend(socials.extra_urls.iter().cloned());
    urls.dedup();

    PerformerProfile {
        name,
        urls,
        details,
        image,
        twitter: socials.twitter,
        instagram: socials.instagram,
    }
}

/// Mine a poster id out of a profile page: data attributes first, then
/// PosterID-shaped patterns anywhere in the HTML.
pub fn extract_poster_id(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let attrs = ["data-posterid", "data-poster-id", "data-poster", "data-userid", "data-user-id"];
    for attr in attrs {
        let Ok(sel) = Selector::parse(&format!("[{attr}]")) else { continue };
        if let Some(el) = doc.select(&sel).next() {
            let digits = normalize_digits(el.value().attr(attr).unwrap_or(""));
            if !digits.is_empty() {
                return Some(digits);
            }
        }
    }

    let patterns = [
        r#"PosterID\s*[:=]\s*["']?(\d+)"#,
        r#"poster_id\s*[:=]\s*["']?(\d+)"#,
        r#"posterId\s*[:=]\s*["']?(\d+)"#,
    ];
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(html) {
                return Some(caps[1].to_string());
            }
        }
    }
    None
}

fn meta_content(doc: &Html, sel_str: &str) -> Option<String> {
    let sel = Selector::parse(sel_str).ok()?;
    let node = doc.select(&sel).next()?;
    let content = node.value().attr("content")?.trim();
    if content.is_empty() { None } else { Some(content.to_string()) }
}

fn title_text(doc: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let node = doc.select(&sel).next()?;
    let text = node.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

// Page titles carry site branding ("Name | JustForFans"); keep the part
// before the separator.
fn clean_profile_name(name: &str) -> String {
    let cleaned = name.trim().to_string();
    let lowered = cleaned.to_lowercase();
    if lowered.contains("justforfans")
        || lowered.contains("just for fans")
        || lowered.contains("justfor.fans")
    {
        for sep in ['|', '•', '-', '—'] {
            if cleaned.contains(sep) {
                if let Some(part) = cleaned.split(sep).map(str::trim).find(|p| !p.is_empty()) {
                    return part.to_string();
                }
            }
        }
    }
    cleaned
}

fn looks_generic_description(text: &str) -> bool {
    let lowered = text.to_lowercase();
    let site_phrases = ["justfor.fans", "just for fans", "login for free"];
    let pitch_phrases = [
        "interact with your favorite",
        "text them, chat with them",
        "watch their videos",
    ];
    site_phrases.iter().all(|p| lowered.contains(p))
        || pitch_phrases.iter().any(|p| lowered.contains(p))
}

fn extract_bio(doc: &Html) -> Option<String> {
    // explicit profile text blocks first
    for block_id in ["profileTextLarge", "profileTextSmall"] {
        let Ok(sel) = Selector::parse(&format!("#{block_id}")) else { continue };
        let Some(block) = doc.select(&sel).next() else { continue };
        let text = match select_text(&block, "p") {
            Some(t) => t,
            None => block.text().collect::<Vec<_>>().join(" "),
        };
        let text = text.replace("Read More", "");
        let text = collapse(&text);
        if text.len() >= 10 {
            return Some(text);
        }
    }

    // otherwise the longest element whose class or id smells like a bio
    let pat = Regex::new(r"(?i)(bio|about|description|blurb|profile)").ok()?;
    let sel = Selector::parse("[class], [id]").ok()?;
    let mut best: Option<String> = None;
    for el in doc.select(&sel) {
        let v = el.value();
        let hit = v.attr("class").is_some_and(|c| pat.is_match(c))
            || v.attr("id").is_some_and(|i| pat.is_match(i));
        if !hit {
            continue;
        }
        let text = collapse(&el.text().collect::<Vec<_>>().join(" "));
        if text.len() >= 10 && best.as_ref().is_none_or(|b| text.len() > b.len()) {
            best = Some(text);
        }
    }
    best
}

fn select_text(el: &scraper::ElementRef, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let node = el.select(&sel).next()?;
    let text = node.text().collect::<Vec<_>>().join(" ");
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

struct SocialLinks {
    twitter: Option<String>,
    instagram: Option<String>,
    bluesky: Option<String>,
    extra_urls: Vec<String>,
}

fn extract_social_links(doc: &Html) -> SocialLinks {
    let mut out = SocialLinks { twitter: None, instagram: None, bluesky: None, extra_urls: vec![] };
    let Ok(sel) = Selector::parse("a[href]") else { return out };
    for tag in doc.select(&sel) {
        let href = normalize_link(tag.value().attr("href").unwrap_or(""));
        if href.is_empty() || href.starts_with("javascript:") {
            continue;
        }
        let lower = href.to_lowercase();
        if lower.contains("twitter.com/") || lower.contains("x.com/") {
            out.twitter.get_or_insert(href);
        } else if lower.contains("instagram.com/") {
            out.instagram.get_or_insert(href);
        } else if lower.contains("bsky.app/") || lower.contains("bsky.social") {
            if out.bluesky.is_none() {
                out.bluesky = Some(href);
            } else {
                out.extra_urls.push(href);
            }
        }
    }
    out
}

fn normalize_link(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_meta_fields() {
        let html = r#"
        <html><head>
          <meta property="og:title" content="Blake Davies | JustForFans"/>
          <meta property="og:description" content="Shoots outdoors, posts weekly."/>
          <meta property="og:image" content="https://cdn.example/avatar.jpg"/>
        </head><body></body></html>
        "#;
        let p = parse_profile("https://justfor.fans/blake_davies", html);
        assert_eq!(p.name, "Blake Davies");
        assert_eq!(p.details.as_deref(), Some("Shoots outdoors, posts weekly."));
        assert_eq!(p.image.as_deref(), Some("https://cdn.example/avatar.jpg"));
        assert_eq!(p.urls[0], "https://justfor.fans/blake_davies");
    }

    #[test]
    fn generic_description_falls_back_to_bio_block() {
        let html = r#"
        <html><head>
          <meta property="og:description" content="Watch their videos and interact with your favorite stars."/>
        </head><body>
          <div id="profileTextLarge"><p>Real bio text, long enough to keep. Read More</p></div>
        </body></html>
        "#;
        let p = parse_profile("https://justfor.fans/blake", html);
        assert_eq!(p.details.as_deref(), Some("Real bio text, long enough to keep."));
    }

    #[test]
    fn name_falls_back_to_url_slug() {
        let p = parse_profile("https://justfor.fans/blake_davies", "<html></html>");
        assert_eq!(p.name, "blake davies");
    }

    #[test]
    fn social_links_first_wins() {
        let html = r#"
        <html><body>
          <a href="https://twitter.com/blake1">t1</a>
          <a href="https://x.com/blake2">t2</a>
          <a href="//instagram.com/blake">ig</a>
          <a href="https://bsky.app/profile/blake">b1</a>
          <a href="https://blake.bsky.social">b2</a>
          <a href="javascript:void(0)">junk</a>
        </body></html>
        "#;
        let p = parse_profile("https://justfor.fans/blake", html);
        assert_eq!(p.twitter.as_deref(), Some("https://twitter.com/blake1"));
        assert_eq!(p.instagram.as_deref(), Some("https://instagram.com/blake"));
        assert!(p.urls.contains(&"https://bsky.app/profile/blake".to_string()));
        assert!(p.urls.contains(&"https://blake.bsky.social".to_string()));
    }

    #[test]
    fn poster_id_from_attr_and_script() {
        let html = r#"<div data-posterid="1313658"></div>"#;
        assert_eq!(extract_poster_id(html).as_deref(), Some("1313658"));

        let html = r#"<script>var PosterID = "99887";</script>"#;
        assert_eq!(extract_poster_id(html).as_deref(), Some("99887"));

        assert_eq!(extract_poster_id("<html></html>"), None);
    }
}
