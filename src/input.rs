//! The two records handed to the core by the data layer: the file list for
//! a revision and the source view for one file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::annotate::{annotate_with, AnnotateOptions};
use crate::error::Result;
use crate::model::{CoverageRange, FileRecord, Profile, RenderedLine};
use crate::profile::find_profile;
use crate::tree::TreeView;

/// Revision-wide totals accompanying a file list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileListMeta {
    pub hits: u64,
    pub lines: u64,
    pub time: DateTime<Utc>,
    pub revision: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_url: Option<String>,
}

/// Per-file coverage counts for one revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileList {
    pub files: Vec<FileRecord>,
    pub meta: FileListMeta,
}

impl FileList {
    pub fn from_profiles(profiles: &[Profile], revision: impl Into<String>, time: DateTime<Utc>) -> Self {
        let files: Vec<FileRecord> = profiles.iter().map(Profile::to_file_record).collect();
        let hits = files.iter().map(|f| f.hits).sum();
        let lines = files.iter().map(|f| f.lines).sum();
        Self {
            files,
            meta: FileListMeta {
                hits,
                lines,
                time,
                revision: revision.into(),
                revision_url: None,
            },
        }
    }

    pub fn from_json(input: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(input)?)
    }

    /// A fresh, compacted tree view over this snapshot.
    pub fn tree_view(&self) -> TreeView {
        TreeView::new(&self.files)
    }
}

/// Highlighted (or plain, escaped) source plus its coverage blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceView {
    #[serde(default)]
    pub filename: String,
    pub code: String,
    pub blocks: Vec<CoverageRange>,
}

impl SourceView {
    /// Pair `code` with the blocks of the profile matching `name`.
    pub fn for_file(profiles: &[Profile], name: &str, code: String) -> Result<Self> {
        let profile = find_profile(profiles, name)?;
        Ok(Self {
            filename: profile.filename.clone(),
            code,
            blocks: profile.blocks.clone(),
        })
    }

    pub fn from_json(input: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(input)?)
    }

    /// `(hits, lines)` over the blocks: executed vs. instrumented lines.
    pub fn totals(&self) -> (u64, u64) {
        self.blocks.iter().fold((0, 0), |(hits, lines), b| {
            let n = b.line_count();
            (if b.hit_count > 0 { hits + n } else { hits }, lines + n)
        })
    }

    pub fn annotate(&self, options: &AnnotateOptions) -> Vec<RenderedLine> {
        annotate_with(&self.code, &self.blocks, options)
    }
}
