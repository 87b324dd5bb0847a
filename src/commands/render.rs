//! Render local markdown files with the blog's markdown subset

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::MarkdownRenderer;
use crate::Folio;

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// Markdown files under `path` (or `path` itself), sorted
pub fn collect_sources(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markdown_file(p))
        .collect();
    sources.sort();
    sources
}

/// Render `path`. Without `out` a single file is printed to stdout;
/// with `out` every source is written as `.html` mirroring its relative path.
pub fn run(folio: &Folio, path: &Path, out: Option<&Path>) -> Result<()> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        folio.base_dir.join(path)
    };
    if !path.exists() {
        bail!("No such file or directory: {:?}", path);
    }

    let renderer = MarkdownRenderer::with_escape(folio.config.escape_html);
    let sources = collect_sources(&path);

    let Some(out) = out else {
        if sources.len() != 1 {
            bail!("{} markdown files found; use --out to write them", sources.len());
        }
        println!("{}", renderer.render(&fs::read_to_string(&sources[0])?));
        return Ok(());
    };

    let root = if path.is_file() {
        path.parent().unwrap_or(Path::new("")).to_path_buf()
    } else {
        path.clone()
    };
    let written = render_all(&renderer, &root, &sources, out)?;
    println!("Rendered {} files into {:?}", written, out);
    Ok(())
}

/// Write each source as HTML under `out`; returns how many files were written
pub fn render_all(
    renderer: &MarkdownRenderer,
    root: &Path,
    sources: &[PathBuf],
    out: &Path,
) -> Result<usize> {
    for source in sources {
        let relative = source.strip_prefix(root).unwrap_or(source);
        let target = out.join(relative).with_extension("html");
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let html = renderer.render(&fs::read_to_string(source)?);
        fs::write(&target, html)?;
        tracing::debug!("Rendered {:?} -> {:?}", source, target);
    }
    Ok(sources.len())
}
