//! File I/O utilities with atomic writes
//!
//! Table files are either completely written or not modified at all.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

/// Read JSON from a file that must exist
pub fn read_json<T, P>(path: P) -> Result<T, LedgerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        LedgerError::StoreUnavailable(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        LedgerError::StoreUnavailable(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::StoreUnavailable(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| {
        LedgerError::StoreUnavailable(format!("Failed to create temp file: {}", e))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| LedgerError::StoreUnavailable(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::StoreUnavailable(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::StoreUnavailable(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::StoreUnavailable(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Sheet {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    }

    fn sample() -> Sheet {
        Sheet {
            headers: vec!["name".into()],
            rows: vec![vec!["Jon".into()]],
        }
    }

    #[test]
    fn test_read_missing_file_is_store_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json::<Sheet, _>(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("barbers.json");

        write_json_atomic(&path, &sample()).unwrap();
        let loaded: Sheet = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("barbers.json");

        write_json_atomic(&path, &sample()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("barbers.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data").join("barbers.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_store_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("barbers.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(read_json::<Sheet, _>(&path).unwrap_err().is_store_unavailable());
    }
}
