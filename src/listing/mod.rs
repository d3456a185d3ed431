use anyhow::Result;
use reqwest::Client;

pub mod fetch;
pub mod parse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Video,
    Photo,
    Text,
    Unknown,
}

/// One entry from a listing page. Lives only for the duration of a scrape.
#[derive(Debug, Clone)]
pub struct PostCard {
    /// Digit-normalized post id; empty when the card carries none
    pub id: String,
    pub media_type: MediaType,
    pub locked: bool,
    /// Whitespace-collapsed preview of the details text (80 chars)
    pub title: String,
    /// Full details text, newline-joined
    pub details: String,
    /// ISO date when the card subtitle could be parsed
    pub date: Option<String>,
    pub photos: Vec<String>,
    pub videos: Vec<String>,
}

impl PostCard {
    /// Primary media URL: first video if present, else first photo.
    pub fn primary_media(&self) -> Option<&str> {
        self.videos
            .first()
            .or_else(|| self.photos.first())
            .map(String::as_str)
    }

    pub fn is_gallery_candidate(&self) -> bool {
        self.media_type == MediaType::Photo
            || (!self.photos.is_empty() && self.media_type != MediaType::Video)
    }
}

/// One parsed listing page.
pub struct ListingPage {
    pub cards: Vec<PostCard>,
    pub next_start_at: Option<u32>,
}

/// Forward-only source of listing pages. Abstracted so the matcher can be
/// exercised without a network.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Next page of cards, or None when the sequence is exhausted.
    async fn next_page(&mut self) -> Result<Option<Vec<PostCard>>>;
}

/// Lazy, finite page sequence over the listing endpoint. Each `next_page`
/// is one network call; the sequence ends at the first empty page, when the
/// page stops advertising a further offset, or at the page cap.
pub struct PageCursor<'a> {
    client: &'a Client,
    req: fetch::ListingRequest,
    next_start: Option<u32>,
    pages_fetched: u32,
    max_pages: u32,
}

impl<'a> PageCursor<'a> {
    pub fn new(client: &'a Client, req: fetch::ListingRequest, start_at: u32, max_pages: u32) -> Self {
        PageCursor {
            client,
            req,
            next_start: Some(start_at),
            pages_fetched: 0,
            max_pages,
        }
    }
}

impl PageCursor<'_> {
    // Stop rules live apart from the network call so they can be driven
    // with canned pages.
    fn begin_fetch(&mut self) -> Option<u32> {
        let start = self.next_start?;
        if self.pages_fetched >= self.max_pages {
            return None;
        }
        self.pages_fetched += 1;
        Some(start)
    }

    fn absorb(&mut self, start: u32, page: ListingPage) -> Option<Vec<PostCard>> {
        // forward-only: a non-advancing offset would loop
        self.next_start = page.next_start_at.filter(|&n| n > start);
        if page.cards.is_empty() {
            self.next_start = None;
            return None;
        }
        Some(page.cards)
    }
}

impl PageSource for PageCursor<'_> {
    async fn next_page(&mut self) -> Result<Option<Vec<PostCard>>> {
        let Some(start) = self.begin_fetch() else {
            return Ok(None);
        };
        tracing::debug!(start_at = start, page = self.pages_fetched, "fetching listing page");
        let html = fetch::fetch_page(self.client, &self.req, start).await?;
        Ok(self.absorb(start, parse::parse_page(&html)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(client: &Client, start_at: u32, max_pages: u32) -> PageCursor<'_> {
        let req = fetch::ListingRequest {
            user_id: "1".to_string(),
            poster_id: "2".to_string(),
            user_hash: "hash".to_string(),
            referer: None,
        };
        PageCursor::new(client, req, start_at, max_pages)
    }

    fn page(card_ids: &[&str], next: Option<u32>) -> ListingPage {
        let cards = card_ids
            .iter()
            .map(|id| PostCard {
                id: (*id).to_string(),
                media_type: MediaType::Text,
                locked: false,
                title: String::new(),
                details: String::new(),
                date: None,
                photos: vec![],
                videos: vec![],
            })
            .collect();
        ListingPage { cards, next_start_at: next }
    }

    #[test]
    fn stops_at_page_cap() {
        let client = Client::new();
        let mut cur = cursor(&client, 0, 2);

        let start = cur.begin_fetch().unwrap();
        assert_eq!(start, 0);
        assert!(cur.absorb(start, page(&["1"], Some(10))).is_some());

        let start = cur.begin_fetch().unwrap();
        assert_eq!(start, 10);
        assert!(cur.absorb(start, page(&["2"], Some(20))).is_some());

        // cap reached with a further offset still advertised
        assert_eq!(cur.begin_fetch(), None);
        assert_eq!(cur.begin_fetch(), None);
    }

    #[test]
    fn stops_when_offset_does_not_advance() {
        let client = Client::new();
        let mut cur = cursor(&client, 10, 20);

        let start = cur.begin_fetch().unwrap();
        // the page re-advertises its own offset
        assert!(cur.absorb(start, page(&["1"], Some(10))).is_some());
        assert_eq!(cur.begin_fetch(), None);
    }

    #[test]
    fn empty_page_ends_sequence() {
        let client = Client::new();
        let mut cur = cursor(&client, 0, 20);

        let start = cur.begin_fetch().unwrap();
        // an empty page ends the walk even with a next offset present
        assert!(cur.absorb(start, page(&[], Some(10))).is_none());
        assert_eq!(cur.begin_fetch(), None);
    }

    #[test]
    fn resumes_from_configured_offset() {
        let client = Client::new();
        let mut cur = cursor(&client, 40, 20);
        assert_eq!(cur.begin_fetch(), Some(40));
    }
}
