use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use primitives::{ReportError, Result};
use tempfile::NamedTempFile;
use tracing::info;

use crate::ReportFile;

/// Mode of persisted tables; staging files start out owner only.
#[cfg(unix)]
const REPORT_MODE: u32 = 0o644;

/// Writes report tables into a data directory, replacing earlier output.
#[derive(Debug, Clone)]
pub struct TabularReportWriter {
    data_dir: PathBuf,
}

impl TabularReportWriter {
    /// Writer placing tables under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Persist `header` followed by `rows` as `report`, fully overwriting any
    /// previous content. The table is staged in a temporary file next to the
    /// target and renamed into place, so readers never observe a partial table.
    pub fn write<H, R>(&self, report: ReportFile, header: H, rows: R) -> Result<PathBuf>
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let path = report.path_in(&self.data_dir);
        fs::create_dir_all(&self.data_dir).map_err(|e| ReportError::io(&self.data_dir, e))?;

        let staged = NamedTempFile::new_in(&self.data_dir).map_err(|e| ReportError::io(&path, e))?;
        let mut writer = csv::Writer::from_writer(staged);
        let to_io = |e: csv::Error| ReportError::io(&path, io::Error::from(e));

        writer.write_record(header.into_iter().map(|h| h.as_ref().to_owned())).map_err(to_io)?;
        let mut count = 0usize;
        for row in rows {
            writer.write_record(&row).map_err(to_io)?;
            count += 1;
        }

        let mut staged =
            writer.into_inner().map_err(|e| ReportError::io(&path, e.into_error()))?;
        staged.flush().map_err(|e| ReportError::io(&path, e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(fs::Permissions::from_mode(REPORT_MODE))
                .map_err(|e| ReportError::io(&path, e))?;
        }
        staged.persist(&path).map_err(|e| ReportError::io(&path, e.error))?;

        info!(report = %report, rows = count, path = ?path, "Wrote report");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EraRangeReader;
    use primitives::EraBlockRange;

    fn ranges() -> Vec<EraBlockRange> {
        vec![
            EraBlockRange {
                era_index: 0,
                block_start: 0,
                block_start_hash: "0x046f1b3d".to_owned(),
                block_end: 999,
                block_end_hash: "0x00ab".to_owned(),
            },
            EraBlockRange {
                era_index: 2,
                block_start: 1000,
                block_start_hash: "0xffee".to_owned(),
                block_end: 18_446_744_073_709_551_615,
                block_end_hash: "0x0000".to_owned(),
            },
        ]
    }

    #[test]
    fn range_table_reads_back_field_for_field() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TabularReportWriter::new(dir.path());
        let path = writer
            .write(
                ReportFile::EraBlockRanges,
                EraBlockRange::HEADER,
                ranges().iter().map(EraBlockRange::to_record),
            )
            .unwrap();

        assert_eq!(path, dir.path().join("0_era_block_ranges.csv"));
        assert_eq!(EraRangeReader::new(path).read().unwrap(), ranges());
    }

    #[test]
    fn rewriting_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TabularReportWriter::new(dir.path());
        let header = ["Era Index", "From Block", "To Block", "Total Stake"];
        let row = |stake: &str| vec!["1".to_owned(), "0".to_owned(), "9".to_owned(), stake.to_owned()];

        writer.write(ReportFile::StakingVolume, header, vec![row("5"), row("6")]).unwrap();
        let path = writer.write(ReportFile::StakingVolume, header, vec![row("7")]).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "Era Index,From Block,To Block,Total Stake\n1,0,9,7\n");
        // no staged files are left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn tables_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = TabularReportWriter::new(dir.path())
            .write(ReportFile::EraBlockRanges, EraBlockRange::HEADER, Vec::<Vec<String>>::new())
            .unwrap();
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, REPORT_MODE);
    }

    #[test]
    fn creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        let path = TabularReportWriter::new(&nested)
            .write(ReportFile::NftMintVolume, ["Era Index"], Vec::<Vec<String>>::new())
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "Era Index\n");
    }
}
