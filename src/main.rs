use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser as _;

use devshowcase::catalog::Catalog;
use devshowcase::cli::{Cli, Command};
use devshowcase::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    devshowcase::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = Config::with_redirect_delay_ms(cli.redirect_delay_ms);
    let catalog = Catalog::load(cli.catalog.as_deref().map(Path::new)).context("load catalog")?;

    match cli.command {
        Command::List(args) => devshowcase::list::run(&catalog, args).context("list")?,
        Command::Tags => devshowcase::list::tags(&catalog).context("tags")?,
        Command::Show(args) => devshowcase::show::run(&catalog, args).context("show")?,
        Command::Browse => devshowcase::browse::run(Arc::new(catalog), &config)
            .await
            .context("browse")?,
        Command::Export(args) => {
            devshowcase::export::run(&catalog, &config, args).context("export")?;
        }
        Command::Serve(args) => devshowcase::serve::run(args).await.context("serve")?,
    }

    Ok(())
}
