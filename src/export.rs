use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::catalog::Catalog;
use crate::cli::ExportArgs;
use crate::config::Config;
use crate::filter::TagFilter;
use crate::render::html::{self, TagSlugs};
use crate::view::{HomeView, ProjectDetail};

pub const NOT_FOUND_PAGE: &str = "not-found.html";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages: usize,
    pub assets: usize,
}

pub fn run(catalog: &Catalog, config: &Config, args: ExportArgs) -> anyhow::Result<ExportSummary> {
    let out_dir = PathBuf::from(&args.out);
    if out_dir.exists() {
        if !args.force {
            anyhow::bail!("export output already exists: {}", out_dir.display());
        }
        if let Some(assets) = &args.assets {
            ensure_assets_outside(&out_dir, Path::new(assets))?;
        }
        remove_existing(&out_dir)?;
    }
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("create export dir: {}", out_dir.display()))?;

    let mut summary = ExportSummary::default();
    write_file(&out_dir.join("style.css"), html::style_css())?;

    let tags = catalog.tags();
    let slugs = TagSlugs::new(&tags);
    write_page(
        &mut summary,
        &out_dir.join("index.html"),
        &html::home_page(catalog, &HomeView::new(), &slugs),
    )?;
    for tag in &tags {
        let Some(slug) = slugs.get(tag) else {
            continue;
        };
        let home = HomeView::with_filter("", TagFilter::Tag(tag.clone()));
        write_page(
            &mut summary,
            &out_dir.join("tags").join(slug).join("index.html"),
            &html::home_page(catalog, &home, &slugs),
        )?;
    }

    for record in catalog.records() {
        let project_dir = out_dir.join("project").join(&record.id);
        let mut detail = ProjectDetail::new(record.clone());
        write_page(
            &mut summary,
            &project_dir.join("index.html"),
            &html::detail_page(catalog.site(), &detail),
        )?;

        for index in 0..detail.carousel().len() {
            detail
                .carousel_mut()
                .select(index)
                .with_context(|| format!("select screenshot {index} of {}", record.id))?;
            write_page(
                &mut summary,
                &project_dir
                    .join("shots")
                    .join(index.to_string())
                    .join("index.html"),
                &html::detail_page(catalog.site(), &detail),
            )?;
        }
    }

    write_page(
        &mut summary,
        &out_dir.join(NOT_FOUND_PAGE),
        &html::not_found_page(catalog.site(), config.redirect_delay),
    )?;

    if let Some(assets) = &args.assets {
        summary.assets = copy_assets(Path::new(assets), &out_dir.join("assets"))?;
    }

    tracing::info!(
        out = %out_dir.display(),
        pages = summary.pages,
        assets = summary.assets,
        "exported site"
    );
    Ok(summary)
}

/// Removing `out_dir` must never take the asset source with it.
fn ensure_assets_outside(out_dir: &Path, assets: &Path) -> anyhow::Result<()> {
    let out_dir = fs::canonicalize(out_dir)
        .with_context(|| format!("resolve export output: {}", out_dir.display()))?;
    let assets = fs::canonicalize(assets)
        .with_context(|| format!("resolve assets dir: {}", assets.display()))?;
    if assets.starts_with(&out_dir) || out_dir.starts_with(&assets) {
        anyhow::bail!(
            "assets dir {} overlaps export output {}",
            assets.display(),
            out_dir.display()
        );
    }
    Ok(())
}

fn remove_existing(out_dir: &Path) -> anyhow::Result<()> {
    let removed = if out_dir.is_dir() {
        fs::remove_dir_all(out_dir)
    } else {
        fs::remove_file(out_dir)
    };
    removed.with_context(|| format!("remove existing export: {}", out_dir.display()))
}

fn write_page(summary: &mut ExportSummary, path: &Path, contents: &str) -> anyhow::Result<()> {
    write_file(path, contents)?;
    summary.pages += 1;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write: {}", path.display()))
}

fn copy_assets(src_dir: &Path, dest_dir: &Path) -> anyhow::Result<usize> {
    let files = list_files_recursively_sorted(src_dir)?;
    for file in &files {
        let rel = file
            .strip_prefix(src_dir)
            .with_context(|| format!("asset outside source dir: {}", file.display()))?;
        let dest = dest_dir.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create asset dir: {}", parent.display()))?;
        }
        fs::copy(file, &dest)
            .with_context(|| format!("copy asset: {} -> {}", file.display(), dest.display()))?;
    }
    Ok(files.len())
}

fn list_files_recursively_sorted(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let entries = fs::read_dir(&current)
            .with_context(|| format!("read dir: {}", current.display()))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("list dir: {}", current.display()))?;

        for entry in entries {
            let path = entry.path();
            let file_type = entry.file_type().context("read entry type")?;
            if file_type.is_dir() {
                stack.push(path);
            } else if file_type.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
