//! Live filesystem adapter using `std::fs`.

use std::io::ErrorKind;
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn remove(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result =
            if path.is_dir() { std::fs::remove_dir_all(path) } else { std::fs::remove_file(path) };
        match result {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            other => Ok(other?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_remove_is_recursive() {
        let dir = std::env::temp_dir().join("flightcall_live_fs_test");
        let _ = std::fs::remove_dir_all(&dir);
        let file = dir.join("bucket").join("entry.body");

        LiveFileSystem.write(&file, b"{\"callsign\":\"BAW123\"}").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&file).unwrap(), "{\"callsign\":\"BAW123\"}");
        assert_eq!(LiveFileSystem.list_dir(&dir).unwrap(), vec!["bucket"]);

        LiveFileSystem.remove(&dir.join("bucket")).unwrap();
        assert!(!LiveFileSystem.exists(&file));
        LiveFileSystem.remove(&dir.join("bucket")).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
