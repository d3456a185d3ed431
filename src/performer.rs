use anyhow::{bail, Result};
use clap::Args;

use crate::client;
use crate::config::Config;
use crate::identity::slugify_name;
use crate::listing::fetch;
use crate::output::{self, map};
use crate::profile;
use crate::telemetry;
use crate::telemetry::ops::performer::Phase as PerformerPhase;

#[derive(Args, Debug)]
pub struct PerformerCmd {
    /// Profile URL passed by the host
    #[arg(long)]
    pub url: Option<String>,
    /// Performer name; slugified into a profile URL when no URL was given
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn run(cfg: &Config, args: PerformerCmd) -> Result<()> {
    let log = telemetry::performer();
    let _g = log
        .root_span_kv([
            ("url", format!("{:?}", args.url)),
            ("name", format!("{:?}", args.name)),
        ])
        .entered();

    let Some(user_hash) = cfg.user_hash.as_deref() else {
        log.warn("missing required config: set JFF_USER_HASH");
        output::print_null();
        return Ok(());
    };

    let url = match (&args.url, &args.name) {
        (Some(u), _) => u.clone(),
        (None, Some(n)) => format!("{}/{}", client::BASE_URL, slugify_name(n)),
        (None, None) => bail!("missing performer url (pass --url or --name)"),
    };

    let http = client::build_client(cfg.impersonate, cfg.user_agent.as_deref(), Some(user_hash))?;
    let html = {
        let _s = log.span_kv(&PerformerPhase::Fetch, [("url", url.clone())]).entered();
        fetch::fetch_profile(&http, &url).await?
    };

    let parsed = {
        let _s = log.span(&PerformerPhase::Parse).entered();
        profile::parse_profile(&url, &html)
    };

    let _s = log.span(&PerformerPhase::Map).entered();
    let result = map::build_performer(&parsed);
    log.info_kv("performer scraped", [("name", result.name.clone())]);
    output::print_record(&result)
}
