//! HTML output helpers for the source view.

use std::fmt::Write;

use clap::ValueEnum;

use crate::annotate::render_lines;
use crate::model::{format_percent, RenderedLine};

/// Escape text for inclusion in HTML. Plain source escaped this way is valid
/// (if colorless) highlighter output.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Color scheme for hit/miss line backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn hit_background(&self) -> &'static str {
        match self {
            Theme::Light => "palegreen",
            Theme::Dark => "darkblue",
        }
    }

    pub fn miss_background(&self) -> &'static str {
        match self {
            Theme::Light => "pink",
            Theme::Dark => "darkred",
        }
    }

    /// highlight.js stylesheet matching the theme.
    pub fn highlight_stylesheet(&self) -> &'static str {
        match self {
            Theme::Light => "github.min.css",
            Theme::Dark => "github-dark.min.css",
        }
    }
}

const STYLESHEET_BASE: &str = "https://unpkg.com/@highlightjs/cdn-assets@11.5.1/styles/";

/// Standalone page for one annotated file.
pub fn render_page(title: &str, hits: u64, lines: u64, body: &[RenderedLine], theme: Theme) -> String {
    let mut html = String::new();
    let title = escape_html(title);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(html, "<title>{title}</title>").unwrap();
    writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"{STYLESHEET_BASE}{}\">",
        theme.highlight_stylesheet()
    )
    .unwrap();
    writeln!(
        html,
        "<style>.hit {{ background: {}; }} .miss {{ background: {}; }}</style>",
        theme.hit_background(),
        theme.miss_background()
    )
    .unwrap();
    html.push_str("</head>\n<body>\n");

    writeln!(html, "<h4>{title}</h4>").unwrap();
    writeln!(
        html,
        "<p>Coverage {} | Hit {hits} lines | Miss {} lines</p>",
        format_percent(hits, lines),
        lines.saturating_sub(hits)
    )
    .unwrap();
    html.push_str("<pre style=\"border: solid 1px darkgray;\"><code class=\"hljs\" style=\"padding: 0px;\">");
    html.push_str(&render_lines(body));
    html.push_str("</code></pre>\n</body>\n</html>\n");

    html
}
