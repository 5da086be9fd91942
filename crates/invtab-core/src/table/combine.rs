//! Combine per-document CSV files into a single table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Result;
use crate::error::TableError;

/// Counters from one combine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombineReport {
    /// CSV files found in the input directory.
    pub files_found: usize,
    /// Files whose rows made it into the output.
    pub files_processed: usize,
    /// Data rows written, headers excluded.
    pub rows_written: usize,
}

/// Merge every CSV file in `input_dir` into `output_path`.
///
/// The header row comes from the first readable file in directory
/// enumeration order (not sorted); data rows follow in that same order.
/// A file that cannot be read is reported and skipped, the rest are
/// still combined.
pub fn combine_tables(input_dir: &Path, output_path: &Path) -> Result<CombineReport> {
    if !input_dir.exists() {
        return Err(TableError::MissingInput(input_dir.to_path_buf()));
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();

    if files.is_empty() {
        return Err(TableError::NoFiles(input_dir.to_path_buf()));
    }

    let mut report = CombineReport {
        files_found: files.len(),
        ..CombineReport::default()
    };

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output_path)?;
    let mut header_written = false;

    for path in &files {
        match append_rows(path, &mut writer, &mut header_written) {
            Ok(rows) => {
                report.files_processed += 1;
                report.rows_written += rows;
                debug!("added {} rows from {}", rows, path.display());
            }
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
            }
        }
    }

    writer.flush()?;
    Ok(report)
}

/// Copy one file's data rows into the combined output, writing the
/// shared header first if it has not been written yet.
fn append_rows(
    path: &Path,
    writer: &mut csv::Writer<fs::File>,
    header_written: &mut bool,
) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    if !*header_written {
        writer.write_record(reader.headers()?)?;
        *header_written = true;
    }

    let mut rows = 0;
    for record in reader.records() {
        writer.write_record(&record?)?;
        rows += 1;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "ORLN,PartID,Rev,Description,ShipQty,UnitPrice,Amount,Filename";

    fn write_table(dir: &Path, name: &str, rows: &[&str]) {
        let mut content = String::from(HEADER);
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_combines_headers_once() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("combined.csv");

        write_table(dir.path(), "a.csv", &["1,123-456,,Widget A,2,$5.00,$10.00,a.txt"]);
        write_table(dir.path(), "b.csv", &["1,987-654,,Widget B,1,$3.00,$3.00,b.txt"]);
        write_table(dir.path(), "c.csv", &["1,555-666,,Widget C,4,$1.00,$4.00,c.txt"]);

        let report = combine_tables(dir.path(), &out).unwrap();
        assert_eq!(report.files_found, 3);
        assert_eq!(report.files_processed, 3);
        assert_eq!(report.rows_written, 3);

        let content = fs::read_to_string(&out).unwrap();
        let headers = content.lines().filter(|l| *l == HEADER).count();
        assert_eq!(headers, 1);
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let out = dir.path().join("combined.csv");

        let err = combine_tables(&missing, &out).unwrap_err();
        assert!(matches!(err, TableError::MissingInput(_)));
    }

    #[test]
    fn test_directory_without_tables_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "not a table").unwrap();
        let out = dir.path().join("combined.csv");

        let err = combine_tables(dir.path(), &out).unwrap_err();
        assert!(matches!(err, TableError::NoFiles(_)));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("csv");
        fs::create_dir_all(&input).unwrap();
        let out = dir.path().join("combined.csv");

        write_table(&input, "a.csv", &["1,123-456,,Widget A,2,$5.00,$10.00,a.txt"]);
        write_table(&input, "b.csv", &["1,987-654,,Widget B,1,$3.00,$3.00,b.txt"]);
        // A directory with a .csv name cannot be opened as a file.
        fs::create_dir(input.join("bad.csv")).unwrap();

        let report = combine_tables(&input, &out).unwrap();
        assert_eq!(report.files_found, 3);
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.rows_written, 2);

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
