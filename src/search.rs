use anyhow::Result;
use clap::Args;

use crate::client;
use crate::identity::slugify_name;
use crate::output;
use crate::output::types::PerformerRef;

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Performer name to search for
    #[arg(long)]
    pub name: String,
}

// No search endpoint exists upstream; the best candidate is the profile URL
// the name would slugify to. Offline, no credentials needed.
pub async fn run(args: SearchCmd) -> Result<()> {
    let candidate = PerformerRef {
        name: args.name.trim().to_string(),
        url: format!("{}/{}", client::BASE_URL, slugify_name(&args.name)),
    };
    output::print_record(&vec![candidate])
}
