/// Reader for Go's `-coverprofile` format.
///
/// Reference: https://go.dev/blog/cover
///
/// Format:
///   mode: set|count|atomic
///   <file>:<startLine>.<startCol>,<endLine>.<endCol> <numStatements> <count>
///
/// Each block is expanded to one entry per source line regardless of its
/// statement count: a block from line 10 to 12 covers lines 10, 11 and 12.
/// Counts of blocks touching the same line are summed by
/// [`super::normalize`].
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CovviewError, Result};
use crate::model::{CoverageRange, Profile};

use super::ProfileParser;

/// Longest block accepted. Blocks are expanded line by line, so a corrupt end
/// line must not turn into billions of entries.
const MAX_BLOCK_LINES: u32 = 1_000_000;

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+):(\d+)\.(\d+),(\d+)\.(\d+) (\d+) (\d+)$").expect("valid block regex")
});

/// Go coverage profile parser.
pub struct GocoverParser;

impl ProfileParser for GocoverParser {
    fn parse(&self, input: &[u8]) -> Result<Vec<Profile>> {
        let text = std::str::from_utf8(input).map_err(|e| CovviewError::Parse {
            line: 0,
            message: format!("Invalid UTF-8 in Go coverage data: {e}"),
        })?;
        parse_str(text)
    }
}

/// Quick heuristic used by format detection.
/// e.g. "github.com/user/repo/file.go:10.1,20.5 3 1"
pub(crate) fn looks_like_block(line: &str) -> bool {
    line.contains(".go:") && BLOCK_RE.is_match(line.trim())
}

struct Block<'a> {
    file: &'a str,
    start_line: u32,
    end_line: u32,
    count: u64,
}

fn parse_block_line(line: &str) -> Option<Block<'_>> {
    let caps = BLOCK_RE.captures(line)?;
    let file = caps.get(1)?.as_str();
    let start_line = caps[2].parse().ok()?;
    let end_line = caps[4].parse().ok()?;
    let count = caps[7].parse().ok()?;
    Some(Block {
        file,
        start_line,
        end_line,
        count,
    })
}

fn parse_str(text: &str) -> Result<Vec<Profile>> {
    // Preserve first-seen file order.
    let mut profiles: Vec<Profile> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("mode:") {
            continue;
        }

        let block = parse_block_line(line).ok_or_else(|| CovviewError::Parse {
            line: index + 1,
            message: format!("bad Go coverage block: {line}"),
        })?;
        if block.end_line < block.start_line {
            return Err(CovviewError::Parse {
                line: index + 1,
                message: format!("block ends before it starts: {line}"),
            });
        }
        if block.end_line - block.start_line >= MAX_BLOCK_LINES {
            return Err(CovviewError::Parse {
                line: index + 1,
                message: format!("block spans more than {MAX_BLOCK_LINES} lines: {line}"),
            });
        }

        let slot = *index_of.entry(block.file).or_insert_with(|| {
            profiles.push(Profile::new(block.file.to_string()));
            profiles.len() - 1
        });
        let profile = &mut profiles[slot];
        for line_number in block.start_line..=block.end_line {
            profile
                .blocks
                .push(CoverageRange::new(line_number, line_number, block.count));
        }
    }

    Ok(profiles)
}
