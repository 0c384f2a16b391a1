use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use satchel_core::errors::DomainError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("could not read `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("could not parse `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("could not serialize state for `{path}`: {source}")]
    Serialize { path: PathBuf, source: serde_json::Error },
    #[error("no valid products in `{path}`")]
    NoValidProducts { path: PathBuf },
}

/// Read and parse a JSON file. A missing file is `None`; a present but
/// unparsable file is an error the caller decides how to treat.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::Read { path: path.to_path_buf(), source }),
    };

    let value = serde_json::from_str(&raw)
        .map_err(|source| StoreError::Parse { path: path.to_path_buf(), source })?;
    Ok(Some(value))
}

/// Startup loader for the mutable stores: a missing or corrupt file falls
/// back to the empty state with a warning, so one bad file cannot keep the
/// service from starting.
pub fn read_json_or_empty<T: DeserializeOwned + Default>(path: &Path, store: &'static str) -> T {
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(error) => {
            warn!(
                event_name = "store.load_fallback",
                store,
                error = %error,
                "starting with empty state"
            );
            T::default()
        }
    }
}

/// Atomically replace `path` with the JSON rendering of `value`, via a
/// `.tmp` sibling and rename, so a crash mid-write cannot truncate the
/// previous state.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|source| StoreError::Serialize { path: path.to_path_buf(), source })?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json.as_bytes())
        .map_err(|source| StoreError::Write { path: tmp.clone(), source })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Write { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use tempfile::TempDir;

    use super::{read_json, read_json_or_empty, write_json_atomic};

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().expect("tempdir");
        let read: Option<BTreeMap<String, u32>> =
            read_json(&dir.path().join("absent.json")).expect("read");
        assert!(read.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("state.json");
        let state = BTreeMap::from([("a".to_string(), 1u32), ("b".to_string(), 2u32)]);

        write_json_atomic(&path, &state).expect("write");
        let read: Option<BTreeMap<String, u32>> = read_json(&path).expect("read");

        assert_eq!(read, Some(state));
        assert!(!dir.path().join("state.tmp").exists(), "tmp sibling should be renamed away");
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").expect("write");

        let result: Result<Option<BTreeMap<String, u32>>, _> = read_json(&path);
        assert!(result.is_err());
    }

    #[test]
    fn read_or_empty_falls_back_on_corrupt_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::write(&path, "][").expect("write");

        let state: BTreeMap<String, u32> = read_json_or_empty(&path, "test");
        assert!(state.is_empty());
    }
}
