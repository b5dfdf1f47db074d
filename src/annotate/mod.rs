//! Coverage-annotated source lines.
//!
//! [`annotate`] takes the highlighter's markup for a whole file and the
//! file's coverage ranges, and returns one self-contained [`RenderedLine`]
//! per source line.

pub mod balance;
pub mod cursor;

pub use balance::{balance_lines, SpanBalancer, TagFamily};
pub use cursor::CoverageRangeCursor;

use crate::model::{CoverageClass, CoverageRange, RenderedLine};

/// Inline style of the per-line container.
pub const DEFAULT_CONTAINER_STYLE: &str =
    "display: inline-block; width: 100%; padding-left: 10px";

/// Rendering knobs for [`annotate_with`].
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Minimum width of the right-aligned line number label.
    pub label_width: usize,
    pub container_style: String,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            label_width: 4,
            container_style: DEFAULT_CONTAINER_STYLE.to_string(),
        }
    }
}

/// Annotate `markup` with the default options.
pub fn annotate(markup: &str, ranges: &[CoverageRange]) -> Vec<RenderedLine> {
    annotate_with(markup, ranges, &AnnotateOptions::default())
}

/// Split `markup` into lines, balance each, and tag it with its coverage.
///
/// `ranges` must be sorted by start line and disjoint. Trailing whitespace
/// is trimmed first, so a final newline does not produce an extra line and
/// blank input produces no lines at all.
pub fn annotate_with(
    markup: &str,
    ranges: &[CoverageRange],
    options: &AnnotateOptions,
) -> Vec<RenderedLine> {
    let markup = markup.trim_end();
    if markup.is_empty() {
        return Vec::new();
    }

    let mut balancer = SpanBalancer::new();
    let mut cursor = CoverageRangeCursor::new(ranges);
    let mut lines = Vec::new();

    for (line_number, line) in (1u32..).zip(markup.split('\n')) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let body = balancer.balance_line(line);
        let coverage_class = cursor.classify(line_number);
        lines.push(RenderedLine {
            line_number,
            markup: wrap_line(line_number, &body, coverage_class, options),
            coverage_class,
        });
    }
    balancer.finish();

    lines
}

fn wrap_line(
    line_number: u32,
    body: &str,
    class: CoverageClass,
    options: &AnnotateOptions,
) -> String {
    format!(
        "<span class=\"{class}\" style=\"{style}\">{line_number:>width$}  {body}</span>",
        class = class.css_class(),
        style = options.container_style,
        width = options.label_width,
    )
}

/// Join rendered lines into the body of a `<code>` block.
pub fn render_lines(lines: &[RenderedLine]) -> String {
    lines
        .iter()
        .map(|l| l.markup.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
