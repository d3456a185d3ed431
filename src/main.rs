use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod client;
mod config;
mod gallery;
mod identity;
mod listing;
mod matcher;
mod output;
mod performer;
mod profile;
mod scene;
mod scrape;
mod search;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "jff-scraper", about = "JustForFans scraper CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Scene(scene::SceneCmd),
    Gallery(gallery::GalleryCmd),
    Performer(performer::PerformerCmd),
    Search(search::SearchCmd),
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    // logging/tracing on stderr; respect RUST_LOG and JFF_LOG_FORMAT
    telemetry::config::init_tracing();
    let cfg = config::Config::from_env();

    let outcome = match cli.command {
        Commands::Scene(args) => scene::run(&cfg, args).await,
        Commands::Gallery(args) => gallery::run(&cfg, args).await,
        Commands::Performer(args) => performer::run(&cfg, args).await,
        Commands::Search(args) => search::run(args).await,
    };

    // the host expects well-formed output even when a scrape fails hard
    if let Err(e) = outcome {
        tracing::error!("{e:#}");
        output::print_null();
        std::process::exit(1);
    }
}
