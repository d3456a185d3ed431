use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::output::{self, map};
use crate::scrape::{self, ScrapeArgs};
use crate::telemetry;

#[derive(Args, Debug)]
pub struct SceneCmd {
    #[command(flatten)]
    pub scrape: ScrapeArgs,
}

pub async fn run(cfg: &Config, args: SceneCmd) -> Result<()> {
    let log = telemetry::scene();
    let _g = log
        .root_span_kv([
            ("url", format!("{:?}", args.scrape.url)),
            ("id", format!("{:?}", args.scrape.id)),
            ("fragment", format!("{:?}", args.scrape.fragment)),
        ])
        .entered();

    match scrape::scrape_post(&log, cfg, &args.scrape, false).await? {
        Some(scraped) => {
            let url = args.scrape.url.clone().or(scraped.profile_url);
            let scene = map::build_scene(&scraped.card, url.as_deref(), scraped.performer);
            log.info_kv("scene scraped", [
                ("code", scene.code.clone().unwrap_or_default()),
                ("title", scene.title.clone()),
            ]);
            output::print_record(&scene)
        }
        None => {
            output::print_null();
            Ok(())
        }
    }
}
