use std::io::Write as _;

use anyhow::Context as _;

use crate::catalog::Catalog;
use crate::cli::{OutputFormat, ShowArgs};
use crate::render::text;
use crate::view::{DetailView, View};

pub fn run(catalog: &Catalog, args: ShowArgs) -> anyhow::Result<()> {
    let view = DetailView::open(catalog, &args.id);
    let DetailView::Found(detail) = &view else {
        anyhow::bail!("project not found: {}", args.id);
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, detail.record()).context("serialize project")?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            out.write_all(text::render_view(catalog, &View::Detail(view)).as_bytes())?;
        }
    }
    out.flush().context("flush stdout")?;
    Ok(())
}
