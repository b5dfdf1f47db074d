//! Shared value types for both halves of the crate: coverage ranges and
//! rendered lines on the source view side, file records on the tree side.

use serde::{Deserialize, Serialize};

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// Coverage percentage (0.0-100.0). Zero lines yields 0.0, never NaN.
#[must_use]
pub fn percent(hits: u64, lines: u64) -> f64 {
    rate(hits, lines) * 100.0
}

/// Format a percentage for display, using `-` when there is nothing to cover.
#[must_use]
pub fn format_percent(hits: u64, lines: u64) -> String {
    if lines == 0 {
        "-".to_string()
    } else {
        format!("{:.1}%", percent(hits, lines))
    }
}

/// A contiguous, inclusive run of source lines sharing one hit count.
///
/// On the wire a range is the three-element array `[start, end, count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32, u64)", into = "(u32, u32, u64)")]
pub struct CoverageRange {
    pub start_line: u32,
    pub end_line: u32,
    pub hit_count: u64,
}

impl CoverageRange {
    pub fn new(start_line: u32, end_line: u32, hit_count: u64) -> Self {
        Self {
            start_line,
            end_line,
            hit_count,
        }
    }

    #[must_use]
    pub fn contains(&self, line_number: u32) -> bool {
        self.start_line <= line_number && line_number <= self.end_line
    }

    /// Number of lines spanned by this range.
    #[must_use]
    pub fn line_count(&self) -> u64 {
        u64::from(self.end_line.saturating_sub(self.start_line)) + 1
    }
}

impl From<(u32, u32, u64)> for CoverageRange {
    fn from((start_line, end_line, hit_count): (u32, u32, u64)) -> Self {
        Self::new(start_line, end_line, hit_count)
    }
}

impl From<CoverageRange> for (u32, u32, u64) {
    fn from(r: CoverageRange) -> Self {
        (r.start_line, r.end_line, r.hit_count)
    }
}

/// How a single source line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverageClass {
    #[default]
    None,
    Hit,
    Miss,
}

impl CoverageClass {
    /// CSS class name used on the line container.
    pub fn css_class(&self) -> &'static str {
        match self {
            CoverageClass::None => "",
            CoverageClass::Hit => "hit",
            CoverageClass::Miss => "miss",
        }
    }
}

/// One annotated source line, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub line_number: u32,
    pub markup: String,
    pub coverage_class: CoverageClass,
}

/// Per-file coverage counts, the input to the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "filename")]
    pub path: String,
    pub hits: u64,
    pub lines: u64,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, hits: u64, lines: u64) -> Self {
        Self {
            path: path.into(),
            hits,
            lines,
        }
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        percent(self.hits, self.lines)
    }
}

/// Coarse styling bucket for a coverage ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioClass {
    /// Below 50%.
    Negative,
    Neutral,
    /// Above 80%.
    Positive,
}

impl RatioClass {
    #[must_use]
    pub fn of(ratio: f64) -> Self {
        if ratio < 50.0 {
            RatioClass::Negative
        } else if ratio > 80.0 {
            RatioClass::Positive
        } else {
            RatioClass::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RatioClass::Negative => "negative",
            RatioClass::Neutral => "",
            RatioClass::Positive => "positive",
        }
    }
}

/// Coverage data for a single source file as read from a coverage report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub filename: String,
    pub hits: u64,
    pub lines: u64,
    pub blocks: Vec<CoverageRange>,
}

impl Profile {
    pub fn new(filename: String) -> Self {
        Self {
            filename,
            ..Default::default()
        }
    }

    pub fn to_file_record(&self) -> FileRecord {
        FileRecord::new(self.filename.clone(), self.hits, self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_zero_lines() {
        let p = percent(0, 0);
        assert!(p.is_finite());
        assert_eq!(p, 0.0);
        assert_eq!(format_percent(0, 0), "-");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1, 3), "33.3%");
        assert_eq!(format_percent(4, 4), "100.0%");
    }

    #[test]
    fn test_range_wire_shape() {
        let r: CoverageRange = serde_json::from_str("[3, 5, 0]").unwrap();
        assert_eq!(r, CoverageRange::new(3, 5, 0));
        assert_eq!(r.line_count(), 3);
        assert!(r.contains(5));
        assert!(!r.contains(6));
        assert_eq!(serde_json::to_string(&r).unwrap(), "[3,5,0]");
    }

    #[test]
    fn test_inverted_range_line_count() {
        let r: CoverageRange = serde_json::from_str("[5, 3, 0]").unwrap();
        assert_eq!(r.line_count(), 1);
    }

    #[test]
    fn test_ratio_class() {
        assert_eq!(RatioClass::of(49.9), RatioClass::Negative);
        assert_eq!(RatioClass::of(50.0), RatioClass::Neutral);
        assert_eq!(RatioClass::of(80.0), RatioClass::Neutral);
        assert_eq!(RatioClass::of(80.1), RatioClass::Positive);
    }

    #[test]
    fn test_file_record_json_uses_filename() {
        let rec = FileRecord::new("a/x.go", 2, 4);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"filename":"a/x.go","hits":2,"lines":4}"#);
        assert_eq!(rec.ratio(), 50.0);
    }
}
