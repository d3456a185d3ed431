use std::collections::HashMap;
use url::Url;

/// Lowercase and strip non-alphanumerics. Idempotent; used only as a lookup
/// key, never shown to the user.
pub fn normalize_handle(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn normalize_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Handle -> poster-id mapping from configuration. Entries are separated by
/// commas or newlines; `handle:id` and `handle=id` are both accepted.
/// Built once per run and never mutated.
#[derive(Debug, Default, Clone)]
pub struct PosterMap(HashMap<String, String>);

impl PosterMap {
    pub fn parse(raw: &str) -> Self {
        let mut map = HashMap::new();
        for entry in raw.split(|c| c == ',' || c == '\n') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((key, val)) = entry.split_once(':').or_else(|| entry.split_once('=')) else {
                continue;
            };
            let key = normalize_handle(key.trim());
            let val = normalize_digits(val.trim());
            if !key.is_empty() && !val.is_empty() {
                map.insert(key, val);
            }
        }
        PosterMap(map)
    }

    pub fn resolve(&self, handle: &str) -> Option<&str> {
        let key = normalize_handle(handle);
        if key.is_empty() {
            return None;
        }
        self.0.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Only a single path segment counts as a username.
pub fn username_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path().trim_matches('/');
    if path.is_empty() || path.contains('/') {
        return None;
    }
    Some(path.to_string())
}

/// Pull (post_id, poster_id) out of a post URL. Query parameters win; path
/// digits are the fallback (last number = post id, first = poster id).
pub fn ids_from_url(url: &str) -> (Option<String>, Option<String>) {
    let Ok(parsed) = Url::parse(url) else {
        return (None, None);
    };

    let qval = |keys: &[&str]| -> Option<String> {
        for key in keys {
            for (k, v) in parsed.query_pairs() {
                if k == *key {
                    let digits = normalize_digits(&v);
                    if !digits.is_empty() {
                        return Some(digits);
                    }
                }
            }
        }
        None
    };

    let mut post_id = qval(&["post_id", "postid", "post", "id"]);
    let mut poster_id = qval(&["poster_id", "posterid", "creator_id", "userid", "user_id"]);

    // A bare profile URL like /boundeagle1 carries no ids; digits embedded
    // in a username segment must not become a post id.
    let path = parsed.path().trim_matches('/');
    let is_profile_slug =
        !path.is_empty() && !path.contains('/') && !path.chars().all(|c| c.is_ascii_digit());

    if post_id.is_none() && !is_profile_slug {
        let numbers: Vec<String> = path_numbers(parsed.path());
        if let Some(last) = numbers.last() {
            post_id = Some(last.clone());
            if numbers.len() > 1 && poster_id.is_none() {
                poster_id = Some(numbers[0].clone());
            }
        }
    }

    (post_id, poster_id)
}

fn path_numbers(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for c in path.chars() {
        if c.is_ascii_digit() {
            cur.push(c);
        } else if !cur.is_empty() {
            out.push(std::mem::take(&mut cur));
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Turn a display name into a profile-URL slug (whitespace -> underscore).
pub fn slugify_name(name: &str) -> String {
    name.trim().split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_normalization_is_punctuation_insensitive() {
        let a = normalize_handle("Blake-M-Davies");
        let b = normalize_handle("blake_m_davies");
        let c = normalize_handle("blake m davies");
        assert_eq!(a, "blakemdavies");
        assert_eq!(a, b);
        assert_eq!(b, c);
        // idempotent
        assert_eq!(normalize_handle(&a), a);
    }

    #[test]
    fn poster_map_accepts_both_separators() {
        let map = PosterMap::parse("boundeagle1:1313658, Other_Guy=42\nbad entry\n");
        assert_eq!(map.resolve("boundeagle1"), Some("1313658"));
        assert_eq!(map.resolve("BoundEagle1"), Some("1313658"));
        assert_eq!(map.resolve("other-guy"), Some("42"));
        assert_eq!(map.resolve("missing"), None);
    }

    #[test]
    fn poster_map_ignores_garbage() {
        let map = PosterMap::parse(":\n=,  ,x:");
        assert!(map.is_empty());
    }

    #[test]
    fn username_only_from_single_segment() {
        assert_eq!(
            username_from_url("https://justfor.fans/boundeagle1").as_deref(),
            Some("boundeagle1")
        );
        assert_eq!(username_from_url("https://justfor.fans/a/b"), None);
        assert_eq!(username_from_url("https://justfor.fans/"), None);
        assert_eq!(username_from_url("not a url"), None);
    }

    #[test]
    fn ids_prefer_query_params() {
        let (post, poster) =
            ids_from_url("https://justfor.fans/post.php?post_id=123&poster_id=456");
        assert_eq!(post.as_deref(), Some("123"));
        assert_eq!(poster.as_deref(), Some("456"));
    }

    #[test]
    fn ids_fall_back_to_path_digits() {
        let (post, poster) = ids_from_url("https://justfor.fans/456/posts/123");
        assert_eq!(post.as_deref(), Some("123"));
        assert_eq!(poster.as_deref(), Some("456"));

        // an all-digit single segment is a post id
        let (post, poster) = ids_from_url("https://justfor.fans/987");
        assert_eq!(post.as_deref(), Some("987"));
        assert_eq!(poster, None);
    }

    #[test]
    fn digits_inside_a_profile_handle_are_not_ids() {
        let (post, poster) = ids_from_url("https://justfor.fans/boundeagle1");
        assert_eq!(post, None);
        assert_eq!(poster, None);

        let (post, poster) = ids_from_url("https://justfor.fans/blake2024fit");
        assert_eq!(post, None);
        assert_eq!(poster, None);

        // an explicit query param still wins on a profile-shaped path
        let (post, _) = ids_from_url("https://justfor.fans/boundeagle1?post_id=55");
        assert_eq!(post.as_deref(), Some("55"));
    }

    #[test]
    fn slugify() {
        assert_eq!(slugify_name("  Blake  Davies "), "Blake_Davies");
    }
}
