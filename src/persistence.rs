//! JSON persistence for settings and high scores
//!
//! Data files live next to the executable. Every failure path logs and falls
//! back to defaults; persistence is never allowed to take the game down.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Resolve a data file next to the executable, falling back to the working
/// directory when the executable path is unavailable.
pub fn data_path(file_name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(file_name)))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Read and decode a JSON data file. Returns None when the file is missing
/// or unreadable; corrupt contents are logged and treated as missing.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let json = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{} is corrupt, ignoring: {err}", path.display());
            None
        }
    }
}

/// Encode and write a JSON data file, logging on failure
pub fn save_json<T: Serialize>(path: &Path, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            if let Err(err) = fs::write(path, json) {
                log::warn!("Failed to write {}: {err}", path.display());
            }
        }
        Err(err) => log::warn!("Failed to encode {}: {err}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        save_json(&path, &vec![1u32, 2, 3]);
        let loaded: Vec<u32> = load_json(&path).unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert_eq!(load_json::<Vec<u32>>(&path), None);
    }

    #[test]
    fn test_corrupt_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&path), None);
    }
}
