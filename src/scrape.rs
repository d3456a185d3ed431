use anyhow::Result;
use clap::Args;

use crate::client;
use crate::config::Config;
use crate::identity::{self, normalize_digits};
use crate::listing::fetch::{self, ListingRequest};
use crate::listing::{PageCursor, PostCard};
use crate::matcher::{self, MatchOptions, MatchQuery};
use crate::output::map;
use crate::output::types::ScenePerformer;
use crate::profile::{self, PerformerProfile};
use crate::telemetry::ctx::{LogCtx, OpMarker};
use crate::telemetry::ops::post::Phase as PostPhase;

/// Host inputs shared by the scene and gallery operations.
#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Post or profile URL passed by the host
    #[arg(long)]
    pub url: Option<String>,
    /// Explicit target post id
    #[arg(long)]
    pub id: Option<String>,
    /// Case-sensitive fragment matched against title/details
    #[arg(long)]
    pub fragment: Option<String>,
    /// Pagination start offset (overrides JFF_START_AT)
    #[arg(long)]
    pub start_at: Option<u32>,
    /// Page cap (overrides JFF_MAX_PAGES)
    #[arg(long)]
    pub max_pages: Option<u32>,
    /// Match locked posts too (overrides JFF_INCLUDE_LOCKED)
    #[arg(long)]
    pub include_locked: Option<bool>,
}

pub struct PostScrape {
    pub card: PostCard,
    pub performer: Option<ScenePerformer>,
    pub profile_url: Option<String>,
}

/// Resolve -> fetch -> match -> assemble. Returns Ok(None) for every
/// recoverable outcome (missing config, nothing matched); hard fetch/parse
/// failures propagate.
pub async fn scrape_post<O>(
    log: &LogCtx<O>,
    cfg: &Config,
    args: &ScrapeArgs,
    photos_only: bool,
) -> Result<Option<PostScrape>>
where
    O: OpMarker<Phase = PostPhase>,
{
    let Some((user_id, user_hash)) = cfg.credentials() else {
        log.warn("missing required config: set JFF_USER_ID and JFF_USER_HASH");
        return Ok(None);
    };

    // resolve the poster identity from url, config and mapping
    let (url_post_id, url_poster_id) = {
        let _s = log.span(&PostPhase::Resolve).entered();
        args.url.as_deref().map(identity::ids_from_url).unwrap_or((None, None))
    };
    let target_id = args
        .id
        .as_deref()
        .map(normalize_digits)
        .filter(|s| !s.is_empty())
        .or(url_post_id);
    let profile_url = args.url.clone().or_else(|| cfg.performer_url.clone());
    let username = profile_url.as_deref().and_then(identity::username_from_url);

    let mut poster_id = cfg.poster_id.clone().or(url_poster_id);
    if poster_id.is_none() {
        if let Some(u) = &username {
            poster_id = cfg.poster_map.resolve(u).map(str::to_string);
        }
    }

    let http = client::build_client(cfg.impersonate, cfg.user_agent.as_deref(), Some(user_hash))?;

    // profile page: performer data, and a poster-id fallback
    let mut performer_profile: Option<PerformerProfile> = None;
    if let Some(purl) = &profile_url {
        if poster_id.is_none() || cfg.performer_name.is_none() {
            let _s = log.span_kv(&PostPhase::Profile, [("url", purl.clone())]).entered();
            match fetch::fetch_profile(&http, purl).await {
                Ok(html) => {
                    if poster_id.is_none() {
                        poster_id = profile::extract_poster_id(&html);
                    }
                    performer_profile = Some(profile::parse_profile(purl, &html));
                }
                Err(e) => log.warn(format!("profile fetch failed: {e:#}")),
            }
        }
    }

    let Some(poster_id) = poster_id else {
        match &username {
            Some(u) => log.warn(format!(
                "poster id not found; add a mapping entry, e.g. JFF_POSTER_MAP={u}:<poster_id>"
            )),
            None => log.warn("poster id not found; set JFF_POSTER_ID or JFF_POSTER_MAP"),
        }
        return Ok(None);
    };

    let start_at = args.start_at.unwrap_or(cfg.start_at);
    let max_pages = args.max_pages.unwrap_or(cfg.max_pages);
    let include_locked = args.include_locked.unwrap_or(cfg.include_locked);

    let query = MatchQuery { post_id: target_id, fragment: args.fragment.clone() };
    let listing = ListingRequest {
        user_id: user_id.to_string(),
        poster_id: poster_id.clone(),
        user_hash: user_hash.to_string(),
        referer: profile_url.clone(),
    };

    let matched = {
        let _s = log
            .span_kv(&PostPhase::Match, [
                ("poster_id", poster_id.clone()),
                ("start_at", start_at.to_string()),
                ("max_pages", max_pages.to_string()),
                ("include_locked", include_locked.to_string()),
            ])
            .entered();
        let mut cursor = PageCursor::new(&http, listing, start_at, max_pages);
        matcher::find_post(&mut cursor, &query, MatchOptions { include_locked, photos_only }).await?
    };

    let Some(card) = matched else {
        if query.is_empty() {
            log.info("no posts available for this performer");
        } else {
            log.info("target post not found in scanned pages");
        }
        return Ok(None);
    };

    let _s = log.span(&PostPhase::Map).entered();
    let performer = map::select_scene_performer(
        cfg.performer_name.as_deref(),
        cfg.performer_url.as_deref(),
        performer_profile.as_ref(),
        profile_url.as_deref(),
    );
    Ok(Some(PostScrape { card, performer, profile_url }))
}
