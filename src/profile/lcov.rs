/// Reader for the LCOV `.info` format.
///
/// Reference: https://ltp.sourceforge.net/coverage/lcov/geninfo.1.php
///
/// Only the records needed for line coverage are used:
///   TN:<test name>
///   SF:<path to source file>
///   DA:<line number>,<execution count>[,<checksum>]
///   end_of_record
///
/// Each `DA` record becomes a one-line block; [`super::normalize`] merges
/// them afterwards.
use crate::error::{CovviewError, Result};
use crate::model::{CoverageRange, Profile};

use super::ProfileParser;

/// LCOV format parser.
pub struct LcovParser;

impl ProfileParser for LcovParser {
    fn parse(&self, input: &[u8]) -> Result<Vec<Profile>> {
        let text = std::str::from_utf8(input).map_err(|e| CovviewError::Parse {
            line: 0,
            message: format!("Invalid UTF-8 in LCOV data: {e}"),
        })?;
        parse_str(text)
    }
}

fn parse_str(text: &str) -> Result<Vec<Profile>> {
    let mut profiles = Vec::new();
    let mut current: Option<Profile> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "end_of_record" {
            match current.take() {
                Some(profile) => profiles.push(profile),
                None => {
                    return Err(CovviewError::Parse {
                        line: index + 1,
                        message: "end_of_record without SF".to_string(),
                    })
                }
            }
            continue;
        }

        let Some((tag, value)) = line.split_once(':') else {
            continue;
        };

        match tag {
            "SF" => current = Some(Profile::new(value.to_string())),
            "DA" => {
                let Some(profile) = current.as_mut() else {
                    continue;
                };
                let mut parts = value.splitn(3, ',');
                let line_number = parts.next().and_then(|s| s.parse::<u32>().ok());
                let count = parts.next().and_then(|s| s.parse::<i64>().ok());
                if let (Some(line_number), Some(count)) = (line_number, count) {
                    // Negative counts mark non-instrumentable lines in some tools.
                    if count >= 0 {
                        profile
                            .blocks
                            .push(CoverageRange::new(line_number, line_number, count as u64));
                    }
                }
            }
            // TN, FN, BRDA, LF, LH... are not needed for line coverage.
            _ => {}
        }
    }

    // Tolerate a missing final end_of_record.
    if let Some(profile) = current.take() {
        profiles.push(profile);
    }

    Ok(profiles)
}
