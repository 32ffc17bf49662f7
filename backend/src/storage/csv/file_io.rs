//! Record-level helpers shared by the CSV repositories.
//!
//! All data files are `|`-delimited with one header row. Full rewrites go
//! through a temp file in the same directory followed by a rename.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::connection::DELIMITER;

/// Read every record of a file. A missing file reads as empty.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .comment(Some(b'#'))
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let record: T = result.with_context(|| format!("Malformed row {} in {}", index + 1, path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// Replace the contents of a file with a header and `records`
pub fn write_records_atomic<T: Serialize>(path: &Path, header: &[&str], records: &[T]) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    {
        let file = File::create(&temp_path)?;
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        writer.write_record(header)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }

    fs::rename(&temp_path, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Append records to an existing file without rewriting it
pub fn append_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for append", path.display()))?;
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Append raw comment lines (`# ...`) that readers skip
pub fn append_comment_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "# {}", line)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        count: u32,
    }

    #[test]
    fn test_write_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");

        write_records_atomic(&path, &["name", "count"], &[Row { name: "a|b".to_string(), count: 1 }]).unwrap();
        append_comment_lines(&path, &["batch".to_string()]).unwrap();
        append_records(&path, &[Row { name: "c".to_string(), count: 2 }]).unwrap();

        let rows: Vec<Row> = read_records(&path).unwrap();
        assert_eq!(
            rows,
            vec![
                Row { name: "a|b".to_string(), count: 1 },
                Row { name: "c".to_string(), count: 2 },
            ]
        );
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let rows: Vec<Row> = read_records(&temp_dir.path().join("none.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.csv");
        fs::write(&path, "name|count\nx|not-a-number\n").unwrap();
        assert!(read_records::<Row>(&path).is_err());
    }
}
