use crate::model::{CoverageClass, CoverageRange};

/// Forward-only cursor over sorted, disjoint coverage ranges.
///
/// Line numbers passed to [`classify`](Self::classify) must increase from
/// call to call; ranges that end before the current line are skipped and
/// never revisited.
#[derive(Debug, Clone)]
pub struct CoverageRangeCursor<'a> {
    ranges: &'a [CoverageRange],
    index: usize,
}

impl<'a> CoverageRangeCursor<'a> {
    pub fn new(ranges: &'a [CoverageRange]) -> Self {
        Self { ranges, index: 0 }
    }

    pub fn classify(&mut self, line_number: u32) -> CoverageClass {
        while self
            .ranges
            .get(self.index)
            .is_some_and(|r| r.end_line < line_number)
        {
            self.index += 1;
        }

        match self.ranges.get(self.index) {
            Some(r) if r.contains(line_number) && r.hit_count > 0 => CoverageClass::Hit,
            Some(r) if r.contains(line_number) => CoverageClass::Miss,
            _ => CoverageClass::None,
        }
    }
}
