use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_REDIRECT_DELAY_MS;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Catalog file (YAML or JSON) to use instead of the bundled catalog.
    #[arg(long, global = true, env = "DEVSHOWCASE_CATALOG")]
    pub catalog: Option<String>,

    /// Delay before the not-found page returns to the catalog.
    #[arg(
        long,
        global = true,
        env = "DEVSHOWCASE_REDIRECT_DELAY_MS",
        default_value_t = DEFAULT_REDIRECT_DELAY_MS
    )]
    pub redirect_delay_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects matching a search query and tag.
    List(ListArgs),
    /// Print the tag vocabulary.
    Tags,
    /// Show one project's detail page.
    Show(ShowArgs),
    /// Browse the catalog interactively on stdin/stdout.
    Browse,
    /// Write the catalog out as a static site.
    Export(ExportArgs),
    /// Host an exported site.
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against title, description and tags.
    #[arg(long, default_value = "")]
    pub query: String,

    /// Exact tag to require, or "All".
    #[arg(long, default_value = "All")]
    pub tag: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Project id.
    pub id: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory for the static site.
    #[arg(long)]
    pub out: String,

    /// Replace the output directory if it already exists.
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Directory copied into `assets/` of the exported site.
    #[arg(long)]
    pub assets: Option<String>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,

    /// Exported site directory (created by `export`).
    #[arg(long, default_value = "site")]
    pub site: String,
}
