//! Command handler functions for the covview CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::annotate::{render_lines, AnnotateOptions};
use crate::html::{escape_html, render_page, Theme};
use crate::input::{FileList, SourceView};
use crate::model::{Profile, RatioClass};
use crate::profile;
use crate::tree::TreeView;

fn load(report: &Path, format: Option<&str>) -> Result<Vec<Profile>> {
    let (_, profiles) = profile::read_profiles(report, format)
        .with_context(|| format!("Failed to read coverage report {}", report.display()))?;
    Ok(profiles)
}

pub fn cmd_tree(report: &Path, format: Option<&str>, expand_all: bool) -> Result<String> {
    let profiles = load(report, format)?;
    if profiles.is_empty() {
        return Ok("No files in coverage report.\n".to_string());
    }

    let records: Vec<_> = profiles.iter().map(Profile::to_file_record).collect();
    let mut view = TreeView::new(&records);
    if expand_all {
        view.expand_all();
    }
    Ok(format_tree(&view))
}

/// Render the visible rows of `view` as an indented table.
pub fn format_tree(view: &TreeView) -> String {
    let tree = view.tree();
    let mut out = String::new();
    writeln!(out, "{:<50} {:>8} {:>8} {:>8}", "FILE", "HITS", "LINES", "RATE").unwrap();
    writeln!(out, "{}", "-".repeat(77)).unwrap();

    for id in view.visible_rows() {
        let node = tree.node(id);
        let indent = "  ".repeat(node.depth);
        let label = if node.is_dir() {
            let marker = if node.expanded { '-' } else { '+' };
            format!("{indent}{marker} {}/", node.name)
        } else {
            format!("{indent}  {}", node.name)
        };
        let flag = match node.ratio_class() {
            RatioClass::Negative => " !",
            _ => "",
        };
        writeln!(
            out,
            "{:<50} {:>8} {:>8} {:>8}{}",
            label,
            node.hits,
            node.lines,
            node.ratio_label(),
            flag
        )
        .unwrap();
    }

    let root = tree.root();
    writeln!(out, "{}", "-".repeat(77)).unwrap();
    writeln!(
        out,
        "{:<50} {:>8} {:>8} {:>8}",
        "TOTAL",
        root.hits,
        root.lines,
        root.ratio_label()
    )
    .unwrap();
    out
}

pub fn cmd_files(
    report: &Path,
    format: Option<&str>,
    revision: &str,
    time: DateTime<Utc>,
) -> Result<String> {
    let profiles = load(report, format)?;
    let list = FileList::from_profiles(&profiles, revision, time);
    let mut out = serde_json::to_string_pretty(&list).context("Failed to serialize file list")?;
    out.push('\n');
    Ok(out)
}

/// Arguments for [`cmd_annotate`].
pub struct AnnotateArgs {
    /// Source file on disk.
    pub source: PathBuf,
    /// Name of the file in the report (default: `source` as given).
    pub name: Option<String>,
    /// Pre-highlighted markup to use instead of the escaped source.
    pub markup: Option<PathBuf>,
    pub theme: Theme,
    pub standalone: bool,
}

pub fn cmd_annotate(report: &Path, format: Option<&str>, args: &AnnotateArgs) -> Result<String> {
    let profiles = load(report, format)?;

    let code = match &args.markup {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markup {}", path.display()))?,
        None => {
            let text = std::fs::read_to_string(&args.source)
                .with_context(|| format!("Failed to read source {}", args.source.display()))?;
            escape_html(&text)
        }
    };

    let name = args
        .name
        .clone()
        .unwrap_or_else(|| args.source.to_string_lossy().into_owned());
    let view = SourceView::for_file(&profiles, &name, code)?;
    let lines = view.annotate(&AnnotateOptions::default());

    if args.standalone {
        let (hits, total) = view.totals();
        Ok(render_page(&view.filename, hits, total, &lines, args.theme))
    } else {
        let mut out = render_lines(&lines);
        out.push('\n');
        Ok(out)
    }
}
