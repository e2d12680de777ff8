//! JSON batch artifact
//!
//! The batch is one pretty-printed JSON array of records, UTF-8, with
//! Cyrillic text written as-is.

use crate::output::traits::{OutputError, OutputResult, RecordSink};
use crate::record::EngineRecord;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the record batch to a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> OutputError {
        OutputError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordSink for JsonFileSink {
    fn write_records(&self, records: &[EngineRecord]) -> OutputResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let file = fs::File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a batch artifact back into records
pub fn read_records(path: &Path) -> OutputResult<Vec<EngineRecord>> {
    let content = fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EngineType;
    use tempfile::TempDir;

    fn record(id: u64) -> EngineRecord {
        EngineRecord {
            source: "mysakura".to_string(),
            source_url: format!("https://mysakura.ru/product/{}", id),
            product_id: Some(id),
            title: Some("Двигатель 1KD-FTV дизель".to_string()),
            make: Some("Toyota".to_string()),
            model: None,
            year: None,
            engine_code: Some("1KD-FTV".to_string()),
            engine_type: EngineType::Diesel,
            price: Some(185000),
            currency: "RUB".to_string(),
            stock_text: None,
            oem: None,
            description: None,
            images: vec!["https://storage.yandexcloud.net/mysakura/1.jpg".to_string()],
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/nested/engines.json");
        let sink = JsonFileSink::new(&path);

        sink.write_records(&[record(1), record(2)]).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].product_id, Some(2));
    }

    #[test]
    fn test_cyrillic_written_unescaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engines.json");
        JsonFileSink::new(&path).write_records(&[record(7)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Двигатель 1KD-FTV дизель"));
        assert!(content.contains("\"engine_type\": \"diesel\""));
        assert!(content.contains("\"source_url\""));
        assert!(content.starts_with("[\n"));
    }

    #[test]
    fn test_empty_batch_is_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engines.json");
        JsonFileSink::new(&path).write_records(&[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
        assert!(read_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_overwrites_previous_batch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engines.json");
        let sink = JsonFileSink::new(&path);

        sink.write_records(&[record(1), record(2), record(3)]).unwrap();
        sink.write_records(&[record(4)]).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_id, Some(4));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_records(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(OutputError::Io { .. })));
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(read_records(&path), Err(OutputError::Json(_))));
    }
}
