use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

pub const BASE_URL: &str = "https://justfor.fans";

/// Browser fingerprint preset. The upstream CDN blocks clients that do not
/// look like a real browser; the preset only shapes the default header set
/// and carries no other meaning.
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Impersonate {
    #[default]
    Chrome136,
    Chrome,
    Firefox,
    Safari,
}

impl Impersonate {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome136" => Some(Impersonate::Chrome136),
            "chrome" => Some(Impersonate::Chrome),
            "firefox" => Some(Impersonate::Firefox),
            "safari" => Some(Impersonate::Safari),
            _ => None,
        }
    }

    fn user_agent(self) -> &'static str {
        match self {
            Impersonate::Chrome136 => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36"
            }
            Impersonate::Chrome => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36"
            }
            Impersonate::Firefox => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:139.0) Gecko/20100101 Firefox/139.0"
            }
            Impersonate::Safari => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/18.4 Safari/605.1.15"
            }
        }
    }

    fn headers(self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(self.user_agent()));
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        if matches!(self, Impersonate::Chrome136 | Impersonate::Chrome) {
            let brand = match self {
                Impersonate::Chrome136 => {
                    "\"Chromium\";v=\"136\", \"Google Chrome\";v=\"136\", \"Not.A/Brand\";v=\"99\""
                }
                _ => "\"Chromium\";v=\"140\", \"Google Chrome\";v=\"140\", \"Not.A/Brand\";v=\"99\"",
            };
            headers.insert(
                HeaderName::from_static("sec-ch-ua"),
                HeaderValue::from_static(brand),
            );
            headers.insert(
                HeaderName::from_static("sec-ch-ua-mobile"),
                HeaderValue::from_static("?0"),
            );
            headers.insert(
                HeaderName::from_static("sec-ch-ua-platform"),
                HeaderValue::from_static("\"Windows\""),
            );
        }
        headers
    }
}

/// Build the per-invocation HTTP client: impersonation headers, optional
/// user-agent override, session cookie in the jar.
pub fn build_client(
    profile: Impersonate,
    user_agent: Option<&str>,
    user_hash: Option<&str>,
) -> Result<Client> {
    let mut headers = profile.headers();
    if let Some(ua) = user_agent {
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(ua).context("invalid user-agent override")?,
        );
    }

    let jar = Arc::new(Jar::default());
    if let Some(hash) = user_hash {
        let base: reqwest::Url = BASE_URL.parse().context("parse base url")?;
        jar.add_cookie_str(
            &format!("UserHash4={hash}; Domain=justfor.fans; Path=/"),
            &base,
        );
    }

    Client::builder()
        .default_headers(headers)
        .cookie_provider(jar)
        .build()
        .context("build http client")
}

/// One GET, checked. Non-success status and anti-bot challenge pages both
/// surface as fetch errors; there is no retry.
pub async fn get_text(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    referer: Option<&str>,
) -> Result<String> {
    let mut req = client.get(url);
    if !query.is_empty() {
        req = req.query(query);
    }
    if let Some(r) = referer {
        req = req.header(header::REFERER, r);
    }

    let resp = req.send().await.with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    if status.as_u16() >= 400 {
        bail!("request failed with status {status}");
    }
    let body = resp.text().await.context("read response body")?;
    ensure_not_challenge(&body)?;
    Ok(body)
}

pub fn ensure_not_challenge(body: &str) -> Result<()> {
    let lowered = body.to_lowercase();
    if lowered.contains("just a moment") && lowered.contains("cloudflare") {
        bail!("request blocked by Cloudflare challenge");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_presets() {
        assert_eq!(Impersonate::parse("chrome136"), Some(Impersonate::Chrome136));
        assert_eq!(Impersonate::parse(" Chrome "), Some(Impersonate::Chrome));
        assert_eq!(Impersonate::parse("edge"), None);
        assert_eq!(Impersonate::default(), Impersonate::Chrome136);
    }

    #[test]
    fn challenge_detection() {
        assert!(ensure_not_challenge("<title>Just a moment...</title> cloudflare").is_err());
        assert!(ensure_not_challenge("<title>Just a moment...</title>").is_ok());
        assert!(ensure_not_challenge("<div>posts</div>").is_ok());
    }

    #[test]
    fn firefox_has_no_client_hints() {
        let headers = Impersonate::Firefox.headers();
        assert!(headers.get("sec-ch-ua").is_none());
        assert!(headers.get(header::USER_AGENT).unwrap().to_str().unwrap().contains("Firefox"));
    }
}
