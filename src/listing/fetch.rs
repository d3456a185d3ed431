use anyhow::Result;
use reqwest::Client;

use crate::client;

pub const POSTS_URL: &str = "https://justfor.fans/ajax/getPosts.php";

/// Credentials and context shared by every page request of one scrape.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub user_id: String,
    pub poster_id: String,
    pub user_hash: String,
    /// Profile URL, sent as Referer when known
    pub referer: Option<String>,
}

pub async fn fetch_page(client: &Client, req: &ListingRequest, start_at: u32) -> Result<String> {
    let start = start_at.to_string();
    let query = [
        ("UserID", req.user_id.as_str()),
        ("PosterID", req.poster_id.as_str()),
        ("Type", "One"),
        ("StartAt", start.as_str()),
        ("Page", "Profile"),
        ("UserHash4", req.user_hash.as_str()),
        ("SplitTest", "0"),
    ];
    client::get_text(client, POSTS_URL, &query, req.referer.as_deref()).await
}

pub async fn fetch_profile(client: &Client, url: &str) -> Result<String> {
    client::get_text(client, url, &[], None).await
}
