use anyhow::Result;

use crate::listing::{PageSource, PostCard};

/// Caller-supplied match inputs. Empty means "latest visible post".
#[derive(Debug, Default, Clone)]
pub struct MatchQuery {
    /// Digit-normalized target post id
    pub post_id: Option<String>,
    /// Case-sensitive fragment matched against title or details
    pub fragment: Option<String>,
}

impl MatchQuery {
    pub fn is_empty(&self) -> bool {
        self.post_id.is_none() && self.fragment.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub include_locked: bool,
    /// Gallery pipeline: only photo candidates qualify. Bypassed when the
    /// query names an explicit post id.
    pub photos_only: bool,
}

/// First-match policy, in page then card order. Criteria per card, in
/// priority order: exact id equality, fragment substring, unconditional
/// when the query is empty. Stops fetching as soon as a card matches;
/// exhaustion is a NotFound outcome, not an error.
pub async fn find_post<S: PageSource>(
    pages: &mut S,
    query: &MatchQuery,
    opts: MatchOptions,
) -> Result<Option<PostCard>> {
    while let Some(cards) = pages.next_page().await? {
        for card in cards {
            if card.locked && !opts.include_locked {
                continue;
            }
            if opts.photos_only && query.post_id.is_none() && !card.is_gallery_candidate() {
                continue;
            }
            if card_matches(&card, query) {
                return Ok(Some(card));
            }
        }
    }
    Ok(None)
}

pub fn card_matches(card: &PostCard, query: &MatchQuery) -> bool {
    if let Some(id) = &query.post_id {
        if !card.id.is_empty() && card.id == *id {
            return true;
        }
    }
    if let Some(frag) = &query.fragment {
        if card.title.contains(frag.as_str()) || card.details.contains(frag.as_str()) {
            return true;
        }
    }
    query.is_empty()
}
