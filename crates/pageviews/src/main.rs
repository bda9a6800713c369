use crate::prelude::*;
use clap::Parser;

mod client;
mod error;
mod prelude;
mod server;
mod views;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Monthly view counts for English Wikipedia articles, from the terminal or over HTTP"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the pageviews REST API
    #[clap(
        long,
        env = "PAGEVIEWS_API_BASE",
        global = true,
        default_value = pageviews_core::pageviews::DEFAULT_API_BASE
    )]
    api_base: String,

    /// Timeout in seconds for upstream requests (default: none)
    #[clap(long, env = "PAGEVIEWS_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "PAGEVIEWS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the article view count HTTP API
    Serve(crate::server::ServeOptions),

    /// Look up the view count of an article for one month
    Views(crate::views::ViewsOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Views(options) => crate::views::run(options, app.global).await,
    }
}
