use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::output::{self, map};
use crate::scrape::{self, ScrapeArgs};
use crate::telemetry;

#[derive(Args, Debug)]
pub struct GalleryCmd {
    #[command(flatten)]
    pub scrape: ScrapeArgs,
}

pub async fn run(cfg: &Config, args: GalleryCmd) -> Result<()> {
    let log = telemetry::gallery();
    let _g = log
        .root_span_kv([
            ("url", format!("{:?}", args.scrape.url)),
            ("id", format!("{:?}", args.scrape.id)),
            ("fragment", format!("{:?}", args.scrape.fragment)),
        ])
        .entered();

    match scrape::scrape_post(&log, cfg, &args.scrape, true).await? {
        Some(scraped) => {
            // "wrong content type" is not the same as "nothing matched"
            if scraped.card.photos.is_empty() {
                log.warn_kv("matched post has no photos; no gallery to emit", [(
                    "code",
                    scraped.card.id.clone(),
                )]);
                output::print_null();
                return Ok(());
            }
            let url = args.scrape.url.clone().or(scraped.profile_url);
            let gallery = map::build_gallery(&scraped.card, url.as_deref(), scraped.performer);
            log.info_kv("gallery scraped", [
                ("code", gallery.code.clone().unwrap_or_default()),
                ("photos", gallery.urls.len().to_string()),
            ]);
            output::print_record(&gallery)
        }
        None => {
            output::print_null();
            Ok(())
        }
    }
}
