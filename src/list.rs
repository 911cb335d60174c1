use std::io::Write;

use anyhow::Context as _;

use crate::catalog::Catalog;
use crate::cli::{ListArgs, OutputFormat};
use crate::filter::TagFilter;
use crate::render::NO_MATCHES;

pub fn run(catalog: &Catalog, args: ListArgs) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_list(catalog, &args, &mut stdout.lock())
}

pub fn tags(catalog: &Catalog) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_tags(catalog, &mut stdout.lock())
}

fn write_list(catalog: &Catalog, args: &ListArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let tag = TagFilter::parse(&args.tag);
    let matches = catalog.filter(&args.query, &tag);
    tracing::debug!(
        query = %args.query,
        tag = %tag,
        matches = matches.len(),
        "filtered catalog"
    );

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &matches).context("serialize projects")?;
            writeln!(out)?;
        }
        OutputFormat::Text if matches.is_empty() => writeln!(out, "{NO_MATCHES}")?,
        OutputFormat::Text => {
            for record in matches {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    record.id,
                    record.title,
                    record.tech_stack.join(", ")
                )?;
            }
        }
    }
    out.flush().context("flush stdout")?;
    Ok(())
}

fn write_tags(catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<()> {
    for tag in catalog.tags() {
        writeln!(out, "{tag}")?;
    }
    out.flush().context("flush stdout")?;
    Ok(())
}
