//! CSV output of a [Series].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::series::{CountRecord, Series};

pub const HEADER: [&str; 3] = ["version", "timestamp", "patches"];

#[derive(Debug, Serialize, Deserialize)]
struct Row {
    version: String,
    timestamp: i64,
    patches: u64,
}

/// Writes `series` to `path`, replacing any existing file.
///
/// The header row is always written, so an empty series yields a
/// header-only file.
pub fn write_series<P: AsRef<Path>>(path: P, series: &Series) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(HEADER)?;
    for entry in series {
        writer.serialize(Row {
            version: entry.version.clone(),
            timestamp: entry.record.timestamp,
            patches: entry.record.count,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads a file produced by [write_series] back into a [Series]
pub fn read_series<P: AsRef<Path>>(path: P) -> Result<Series> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut series = Series::new();

    for row in reader.deserialize() {
        let row: Row = row?;
        series.push(
            row.version,
            CountRecord {
                timestamp: row.timestamp,
                count: row.patches,
            },
        );
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        let mut series = Series::new();
        series.push("v5.10", CountRecord { timestamp: 1607897370, count: 10 });
        series.push("v5.10.1", CountRecord { timestamp: 1607960000, count: 12 });
        series.push("v5.10.2", CountRecord { timestamp: 1608200000, count: 17 });
        series
    }

    #[test]
    fn test_write_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("syzkaller_5.10.csv");
        write_series(&path, &sample()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "version,timestamp,patches\n\
             v5.10,1607897370,10\n\
             v5.10.1,1607960000,12\n\
             v5.10.2,1608200000,17\n"
        );
    }

    #[test]
    fn test_empty_series_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_series(&path, &Series::new()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "version,timestamp,patches\n");
        assert!(read_series(&path).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let series = sample();
        write_series(&path, &series).unwrap();

        assert_eq!(read_series(&path).unwrap(), series);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        std::fs::write(&path, "stale content that is longer than the new file\n".repeat(20))
            .unwrap();

        write_series(&path, &Series::new()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "version,timestamp,patches\n"
        );
    }

    #[test]
    fn test_quotes_awkward_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let mut series = Series::new();
        series.push("odd,tag", CountRecord { timestamp: 1, count: 2 });
        write_series(&path, &series).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"odd,tag\",1,2"));
        assert_eq!(read_series(&path).unwrap(), series);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("series.csv");
        assert!(write_series(&path, &Series::new()).is_err());
    }
}
