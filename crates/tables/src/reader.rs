use std::{
    fs::File,
    path::PathBuf,
};

use primitives::{EraBlockRange, ReportError, Result};
use tracing::debug;

/// Loads the persisted era range table.
#[derive(Debug, Clone)]
pub struct EraRangeReader {
    path: PathBuf,
}

impl EraRangeReader {
    /// Reader for the table at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Every range in the table, in file order. The header row is skipped.
    pub fn read(&self) -> Result<Vec<EraBlockRange>> {
        let file = File::open(&self.path).map_err(|e| ReportError::io(&self.path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut ranges = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            // header is line 1
            let line = idx as u64 + 2;
            let record = record.map_err(|e| self.corrupt(line, e))?;
            ranges.push(self.parse_record(line, &record)?);
        }
        debug!(path = ?self.path, ranges = ranges.len(), "Loaded era ranges");
        Ok(ranges)
    }

    fn parse_record(&self, line: u64, record: &csv::StringRecord) -> Result<EraBlockRange> {
        let width = EraBlockRange::HEADER.len();
        if record.len() != width {
            return Err(self.corrupt(
                line,
                format!("expected {} columns, found {}", width, record.len()),
            ));
        }
        let int = |idx: usize| {
            let cell = &record[idx];
            cell.parse::<u64>().map_err(|e| {
                self.corrupt(line, format!("{} {:?}: {}", EraBlockRange::HEADER[idx], cell, e))
            })
        };
        let era_index = int(0).and_then(|era| {
            u32::try_from(era).map_err(|e| self.corrupt(line, format!("era index {}: {}", era, e)))
        })?;
        let range = EraBlockRange {
            era_index,
            block_start: int(1)?,
            block_start_hash: record[2].to_owned(),
            block_end: int(3)?,
            block_end_hash: record[4].to_owned(),
        };
        if range.block_start > range.block_end {
            return Err(self.corrupt(
                line,
                format!("block start {} after block end {}", range.block_start, range.block_end),
            ));
        }
        Ok(range)
    }

    fn corrupt(&self, line: u64, reason: impl ToString) -> ReportError {
        ReportError::CorruptRangeTable { path: self.path.clone(), line, reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn table(contents: &str) -> (tempfile::TempDir, EraRangeReader) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranges.csv");
        fs::write(&path, contents).unwrap();
        (dir, EraRangeReader::new(path))
    }

    #[test]
    fn reads_rows_after_the_header() {
        let (_dir, reader) = table(
            "Era Index,Block Start,Block Start Hash,Block End,Block End Hash\n\
             0,0,0xaa,999,0xbb\n\
             1,1000,0xcc,1999,0xdd\n",
        );
        let ranges = reader.read().unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[1].era_index, 1);
        assert_eq!(ranges[1].block_start, 1000);
        assert_eq!(ranges[1].block_start_hash, "0xcc");
        assert_eq!(ranges[1].block_end, 1999);
        assert_eq!(ranges[1].block_end_hash, "0xdd");
    }

    #[test]
    fn header_only_table_is_empty() {
        let (_dir, reader) =
            table("Era Index,Block Start,Block Start Hash,Block End,Block End Hash\n");
        assert!(reader.read().unwrap().is_empty());
    }

    #[test]
    fn wrong_column_count_reports_the_line() {
        let (_dir, reader) = table(
            "Era Index,Block Start,Block Start Hash,Block End,Block End Hash\n\
             0,0,0xaa,999,0xbb\n\
             1,1000,0xcc,1999\n",
        );
        let err = reader.read().unwrap_err();
        assert!(matches!(err, ReportError::CorruptRangeTable { line: 3, .. }), "{err}");
    }

    #[test]
    fn non_numeric_heights_are_corrupt() {
        let (_dir, reader) = table(
            "Era Index,Block Start,Block Start Hash,Block End,Block End Hash\n\
             0,zero,0xaa,999,0xbb\n",
        );
        let err = reader.read().unwrap_err();
        assert!(matches!(err, ReportError::CorruptRangeTable { line: 2, .. }), "{err}");
    }

    #[test]
    fn missing_table_is_an_io_error() {
        let reader = EraRangeReader::new("/nonexistent/ranges.csv");
        assert!(matches!(reader.read(), Err(ReportError::Io { .. })));
    }
}
