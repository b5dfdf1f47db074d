//! Coverage report readers.
//!
//! Each parser turns a report into one [`Profile`] per source file: the
//! file's coverage as sorted, disjoint [`CoverageRange`] blocks plus hit and
//! line totals. Those profiles feed both the file list (tree side) and the
//! source view (annotation side).
//!
//! Format selection:
//!   1. explicit `--format` override
//!   2. file extension
//!   3. a peek at the first few KB of content

pub mod gocover;
pub mod lcov;

use std::path::Path;

use crate::error::{CovviewError, Result};
use crate::model::{CoverageRange, Profile};

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Lcov,
    Gocover,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Lcov => "lcov",
            Format::Gocover => "gocover",
        }
    }
}

impl std::str::FromStr for Format {
    type Err = CovviewError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lcov" => Ok(Format::Lcov),
            "gocover" | "go" => Ok(Format::Gocover),
            _ => Err(CovviewError::Parse {
                line: 0,
                message: format!("Unknown format: '{s}'. Supported: lcov, gocover"),
            }),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every report parser implements this trait.
pub trait ProfileParser {
    /// Parse raw report bytes into per-file profiles, in report order.
    /// Blocks need not be sorted or merged yet; see [`normalize`].
    fn parse(&self, input: &[u8]) -> Result<Vec<Profile>>;
}

/// Detect the format from the file name, then from the content.
pub fn detect_format(path: &Path, content: &[u8]) -> Option<Format> {
    detect_by_extension(path).or_else(|| detect_by_content(content))
}

fn detect_by_extension(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "info" | "lcov" => Some(Format::Lcov),
        "coverprofile" | "gocov" => Some(Format::Gocover),
        _ => None,
    }
}

fn detect_by_content(content: &[u8]) -> Option<Format> {
    let head_len = content.len().min(4096);
    let head = String::from_utf8_lossy(&content[..head_len]);

    if head.lines().next().is_some_and(|l| l.starts_with("mode: ")) {
        return Some(Format::Gocover);
    }

    let has_sf = head.lines().any(|l| l.starts_with("SF:"));
    let has_da = head.lines().any(|l| l.starts_with("DA:"));
    if has_sf && has_da {
        return Some(Format::Lcov);
    }

    if head.lines().any(gocover::looks_like_block) {
        return Some(Format::Gocover);
    }

    None
}

/// Parse `content` as `format` and normalize every profile.
pub fn parse_with_format(format: Format, content: &[u8]) -> Result<Vec<Profile>> {
    let mut profiles = match format {
        Format::Lcov => lcov::LcovParser.parse(content)?,
        Format::Gocover => gocover::GocoverParser.parse(content)?,
    };
    for profile in &mut profiles {
        normalize(profile);
    }
    Ok(profiles)
}

/// Read a report from disk, auto-detecting its format unless overridden.
pub fn read_profiles(path: &Path, format_override: Option<&str>) -> Result<(Format, Vec<Profile>)> {
    let content = std::fs::read(path)?;
    let format = match format_override {
        Some(f) => f.parse::<Format>()?,
        None => detect_format(path, &content).ok_or(CovviewError::UnknownFormat)?,
    };
    let profiles = parse_with_format(format, &content)?;
    tracing::debug!(%format, files = profiles.len(), path = %path.display(), "read coverage report");
    Ok((format, profiles))
}

/// Sort blocks, fold blocks that start on the same line (summing their
/// counts), merge adjacent blocks with equal counts, and recompute totals.
///
/// Afterwards the blocks are sorted and disjoint, `lines` is the number of
/// instrumented lines and `hits` the number of those executed at least once.
pub fn normalize(profile: &mut Profile) {
    profile.blocks.sort_by_key(|b| (b.start_line, b.end_line));

    let mut folded: Vec<CoverageRange> = Vec::with_capacity(profile.blocks.len());
    for block in profile.blocks.drain(..) {
        match folded.last_mut() {
            Some(last) if last.start_line == block.start_line => {
                last.end_line = last.end_line.max(block.end_line);
                last.hit_count += block.hit_count;
            }
            _ => folded.push(block),
        }
    }

    let mut merged: Vec<CoverageRange> = Vec::with_capacity(folded.len());
    for block in folded {
        match merged.last_mut() {
            Some(last)
                if last.end_line + 1 == block.start_line && last.hit_count == block.hit_count =>
            {
                last.end_line = block.end_line;
            }
            _ => merged.push(block),
        }
    }
    profile.blocks = merged;

    profile.hits = 0;
    profile.lines = 0;
    for block in &profile.blocks {
        let n = block.line_count();
        if block.hit_count > 0 {
            profile.hits += n;
        }
        profile.lines += n;
    }
}

/// Find the profile for a source file.
///
/// An exact match wins; otherwise `name` may be a path suffix of exactly one
/// profile on a `/` boundary (Go reports use import paths, while a local
/// checkout uses relative paths).
pub fn find_profile<'a>(profiles: &'a [Profile], name: &str) -> Result<&'a Profile> {
    if let Some(p) = profiles.iter().find(|p| p.filename == name) {
        return Ok(p);
    }

    let name = name.trim_start_matches("./");
    let suffix = format!("/{name}");
    let mut matches = profiles.iter().filter(|p| p.filename.ends_with(&suffix));
    match (matches.next(), matches.next()) {
        (Some(p), None) => Ok(p),
        _ => Err(CovviewError::FileNotFound(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(blocks: &[(u32, u32, u64)]) -> Profile {
        Profile {
            filename: "f.go".to_string(),
            blocks: blocks.iter().map(|&b| b.into()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_merges_adjacent_equal_counts() {
        let mut p = profile(&[(1, 1, 2), (2, 2, 2), (3, 3, 0), (5, 5, 0), (6, 6, 0)]);
        normalize(&mut p);
        assert_eq!(
            p.blocks,
            vec![
                CoverageRange::new(1, 2, 2),
                CoverageRange::new(3, 3, 0),
                CoverageRange::new(5, 6, 0),
            ]
        );
        assert_eq!((p.hits, p.lines), (2, 5));
    }

    #[test]
    fn test_normalize_sums_same_start() {
        let mut p = profile(&[(4, 4, 1), (1, 1, 0), (4, 4, 3)]);
        normalize(&mut p);
        assert_eq!(
            p.blocks,
            vec![CoverageRange::new(1, 1, 0), CoverageRange::new(4, 4, 4)]
        );
        assert_eq!((p.hits, p.lines), (1, 2));
    }

    #[test]
    fn test_normalize_empty() {
        let mut p = profile(&[]);
        normalize(&mut p);
        assert_eq!((p.hits, p.lines), (0, 0));
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect_format(Path::new("lcov.info"), b""), Some(Format::Lcov));
        assert_eq!(
            detect_format(Path::new("c.coverprofile"), b""),
            Some(Format::Gocover)
        );
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(
            detect_format(Path::new("cover.out"), b"mode: set\n"),
            Some(Format::Gocover)
        );
        assert_eq!(
            detect_format(Path::new("report"), b"TN:\nSF:a.rs\nDA:1,1\n"),
            Some(Format::Lcov)
        );
        assert_eq!(
            detect_format(Path::new("cover.out"), b"example.com/m/a.go:1.1,2.2 1 0\n"),
            Some(Format::Gocover)
        );
        assert_eq!(detect_format(Path::new("x.txt"), b"hello"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("LCOV".parse::<Format>().unwrap(), Format::Lcov);
        assert_eq!("go".parse::<Format>().unwrap(), Format::Gocover);
        assert!("cobertura".parse::<Format>().is_err());
    }

    #[test]
    fn test_find_profile() {
        let profiles = vec![
            Profile::new("example.com/m/pkg/a.go".to_string()),
            Profile::new("example.com/m/b/a.go".to_string()),
            Profile::new("src/lib.rs".to_string()),
        ];
        assert_eq!(find_profile(&profiles, "src/lib.rs").unwrap().filename, "src/lib.rs");
        assert_eq!(
            find_profile(&profiles, "./pkg/a.go").unwrap().filename,
            "example.com/m/pkg/a.go"
        );
        // Ambiguous suffix.
        assert!(find_profile(&profiles, "a.go").is_err());
        assert!(find_profile(&profiles, "missing.rs").is_err());
    }
}
