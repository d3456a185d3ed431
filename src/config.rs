use std::env;

use crate::client::Impersonate;
use crate::identity::PosterMap;

pub const DEFAULT_START_AT: u32 = 0;
pub const DEFAULT_MAX_PAGES: u32 = 20;

/// Read-only run configuration, loaded once from the environment
/// (`.env` honored via dotenvy). CLI flags override per-field.
#[derive(Debug, Clone)]
pub struct Config {
    /// Numeric account id of the scraping user (JFF_USER_ID)
    pub user_id: Option<String>,
    /// UserHash4 session cookie value (JFF_USER_HASH)
    pub user_hash: Option<String>,
    /// Explicit poster id override (JFF_POSTER_ID)
    pub poster_id: Option<String>,
    /// Handle -> poster-id mapping (JFF_POSTER_MAP)
    pub poster_map: PosterMap,
    /// Browser fingerprint preset (JFF_IMPERSONATE)
    pub impersonate: Impersonate,
    /// User-agent override (JFF_USER_AGENT)
    pub user_agent: Option<String>,
    /// Pagination start offset (JFF_START_AT)
    pub start_at: u32,
    /// Page cap when searching for a post (JFF_MAX_PAGES)
    pub max_pages: u32,
    /// Match locked/preview posts too (JFF_INCLUDE_LOCKED)
    pub include_locked: bool,
    /// Operator overrides for the performer sub-record
    pub performer_name: Option<String>,
    pub performer_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let impersonate = env_opt("JFF_IMPERSONATE")
            .map(|v| match Impersonate::parse(&v) {
                Some(p) => p,
                None => {
                    tracing::warn!("unknown JFF_IMPERSONATE value {v:?}, using default");
                    Impersonate::default()
                }
            })
            .unwrap_or_default();

        Config {
            user_id: env_opt("JFF_USER_ID"),
            user_hash: env_opt("JFF_USER_HASH"),
            poster_id: env_opt("JFF_POSTER_ID"),
            poster_map: PosterMap::parse(&env_opt("JFF_POSTER_MAP").unwrap_or_default()),
            impersonate,
            user_agent: env_opt("JFF_USER_AGENT"),
            start_at: env_opt("JFF_START_AT")
                .and_then(|v| parse_u32(&v))
                .unwrap_or(DEFAULT_START_AT),
            max_pages: env_opt("JFF_MAX_PAGES")
                .and_then(|v| parse_u32(&v))
                .unwrap_or(DEFAULT_MAX_PAGES),
            include_locked: env_opt("JFF_INCLUDE_LOCKED")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
            performer_name: env_opt("JFF_PERFORMER_NAME"),
            performer_url: env_opt("JFF_PERFORMER_URL"),
        }
    }

    /// Both session credentials, or None (a recoverable condition).
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.user_id.as_deref().zip(self.user_hash.as_deref())
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn u32s() {
        assert_eq!(parse_u32(" 20 "), Some(20));
        assert_eq!(parse_u32("-1"), None);
        assert_eq!(parse_u32("x"), None);
    }
}
