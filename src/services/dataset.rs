use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord};
use tracing::{error, info};

use crate::domain::models::{BranchRecord, UNKNOWN};

use super::errors::DatasetError;

const BRANCH_COLUMN: &str = "branch";
const BANK_NAME_COLUMN: &str = "bank_name";
const IFSC_COLUMN: &str = "ifsc";

/// Cell contents treated the same as an empty cell.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetStatus {
    Loaded,
    Degraded { reason: String },
}

impl DatasetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetStatus::Loaded => "loaded",
            DatasetStatus::Degraded { .. } => "degraded",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            DatasetStatus::Loaded => None,
            DatasetStatus::Degraded { reason } => Some(reason),
        }
    }
}

/// The branch directory, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct BranchDataset {
    records: Vec<BranchRecord>,
    source: Option<PathBuf>,
    status: DatasetStatus,
}

impl BranchDataset {
    pub fn from_records(records: Vec<BranchRecord>) -> Self {
        Self {
            records,
            source: None,
            status: DatasetStatus::Loaded,
        }
    }

    /// Loads `path`, falling back to an empty, degraded dataset when the file
    /// cannot be read or parsed. Never fails.
    pub fn load_or_degrade(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match load(path) {
            Ok(records) => {
                info!(path = %path.display(), records = records.len(), "branch dataset loaded");
                Self {
                    records,
                    source: Some(path.to_path_buf()),
                    status: DatasetStatus::Loaded,
                }
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "error loading branch dataset");
                Self {
                    records: Vec::new(),
                    source: Some(path.to_path_buf()),
                    status: DatasetStatus::Degraded {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    pub fn records(&self) -> &[BranchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn status(&self) -> &DatasetStatus {
        &self.status
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, DatasetStatus::Degraded { .. })
    }
}

pub fn load(path: &Path) -> Result<Vec<BranchRecord>, DatasetError> {
    let file = File::open(path)?;
    load_from_reader(file)
}

/// Reads header-named CSV rows in file order. Columns other than `branch`,
/// `bank_name` and `ifsc` are ignored.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<BranchRecord>, DatasetError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    let branch_idx = column_index(&headers, BRANCH_COLUMN)?;
    let bank_name_idx = column_index(&headers, BANK_NAME_COLUMN)?;
    let ifsc_idx = column_index(&headers, IFSC_COLUMN)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        if row.len() > headers.len() {
            return Err(DatasetError::RowTooLong {
                line: row.position().map(|pos| pos.line()).unwrap_or_default(),
                found: row.len(),
                expected: headers.len(),
            });
        }

        records.push(BranchRecord {
            branch: cell_or_unknown(&row, branch_idx),
            bank_name: cell_or_unknown(&row, bank_name_idx),
            ifsc: cell_or_unknown(&row, ifsc_idx),
        });
    }

    Ok(records)
}

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or(DatasetError::MissingColumn(name))
}

fn cell_or_unknown(row: &StringRecord, idx: usize) -> String {
    match row.get(idx) {
        Some(value) if !MISSING_MARKERS.contains(&value) => value.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn load_str(contents: &str) -> Result<Vec<BranchRecord>, DatasetError> {
        load_from_reader(contents.as_bytes())
    }

    #[test]
    fn loads_every_well_formed_row_in_file_order() {
        let records = load_str(
            "branch,bank_name,ifsc\n\
             Main St,First Bank,FB0001\n\
             Harbour Rd,Second Bank,SB0002\n\
             Hill View,First Bank,FB0003\n",
        )
        .expect("dataset should load");

        assert_eq!(
            records,
            vec![
                BranchRecord::new("Main St", "First Bank", "FB0001"),
                BranchRecord::new("Harbour Rd", "Second Bank", "SB0002"),
                BranchRecord::new("Hill View", "First Bank", "FB0003"),
            ]
        );
    }

    #[test]
    fn fills_absent_cells_with_unknown() {
        let records = load_str(
            "branch,bank_name,ifsc\n\
             Main St,,FB0001\n\
             ,First Bank,FB0002\n\
             Hill View,First Bank,\n",
        )
        .expect("dataset should load");

        assert_eq!(records[0].bank_name, UNKNOWN);
        assert_eq!(records[1].branch, UNKNOWN);
        assert_eq!(records[2].ifsc, UNKNOWN);
        assert!(records
            .iter()
            .all(|r| !r.branch.is_empty() && !r.bank_name.is_empty() && !r.ifsc.is_empty()));
    }

    #[test]
    fn treats_missing_value_markers_as_absent() {
        let records = load_str(
            "branch,bank_name,ifsc\n\
             NA,null,N/A\n\
             Main St,NaN,FB0001\n",
        )
        .expect("dataset should load");

        assert_eq!(records[0], BranchRecord::new(UNKNOWN, UNKNOWN, UNKNOWN));
        assert_eq!(records[1], BranchRecord::new("Main St", UNKNOWN, "FB0001"));
    }

    #[test]
    fn short_rows_fill_trailing_columns_with_unknown() {
        let records = load_str("branch,bank_name,ifsc\nMain St,First Bank\n")
            .expect("dataset should load");

        assert_eq!(records, vec![BranchRecord::new("Main St", "First Bank", UNKNOWN)]);
    }

    #[test]
    fn ignores_extra_columns_and_column_order() {
        let records = load_str(
            "city,ifsc,district,bank_name,branch\n\
             Pune,FB0001,Pune,First Bank,Main St\n",
        )
        .expect("dataset should load");

        assert_eq!(records, vec![BranchRecord::new("Main St", "First Bank", "FB0001")]);
    }

    #[test]
    fn rejects_header_without_tracked_column() {
        let err = load_str("branch,bank,ifsc\nMain St,First Bank,FB0001\n").unwrap_err();

        assert!(matches!(err, DatasetError::MissingColumn("bank_name")));
    }

    #[test]
    fn rejects_rows_longer_than_header() {
        let err = load_str("branch,bank_name,ifsc\nMain St,First Bank,FB0001,extra\n").unwrap_err();

        match err {
            DatasetError::RowTooLong {
                line,
                found,
                expected,
            } => {
                assert_eq!(line, 2);
                assert_eq!(found, 4);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn header_only_file_is_an_empty_but_loaded_dataset() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "branch,bank_name,ifsc").expect("write header");

        let dataset = BranchDataset::load_or_degrade(file.path());

        assert!(dataset.is_empty());
        assert_eq!(dataset.status(), &DatasetStatus::Loaded);
    }

    #[test]
    fn missing_file_degrades_to_empty_dataset() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bank_branches.csv");

        let dataset = BranchDataset::load_or_degrade(&path);

        assert!(dataset.is_empty());
        assert!(dataset.is_degraded());
        assert_eq!(dataset.status().as_str(), "degraded");
        assert!(dataset.status().reason().is_some());
        assert_eq!(dataset.source(), Some(path.as_path()));
    }

    #[test]
    fn malformed_file_degrades_to_empty_dataset() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "branch,bank_name,ifsc\nMain St,First Bank,FB0001,surplus\n")
            .expect("write rows");

        let dataset = BranchDataset::load_or_degrade(file.path());

        assert!(dataset.is_empty());
        match dataset.status() {
            DatasetStatus::Degraded { reason } => assert!(reason.contains("line 2")),
            other => panic!("unexpected status: {:?}", other),
        }
    }
}
