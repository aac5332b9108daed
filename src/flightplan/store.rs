//! Remembers the last flight plan between runs.
//!
//! Directory layout:
//!
//! ```text
//! <home>/
//!   ├── last_flight_plan.json
//!   └── last_username
//! ```

use std::path::{Path, PathBuf};

use crate::ports::filesystem::FileSystem;

use super::FlightPlan;

const PLAN_FILE: &str = "last_flight_plan.json";
const USERNAME_FILE: &str = "last_username";

/// Errors raised while persisting state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying write or delete failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// The file involved.
        path: PathBuf,
        /// The port error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Persistence for the last fetched flight plan and username.
///
/// All I/O goes through the `FileSystem` port.
pub struct FlightPlanStore<'a> {
    fs: &'a dyn FileSystem,
    root: PathBuf,
}

impl<'a> FlightPlanStore<'a> {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, root: &Path) -> Self {
        Self { fs, root: root.to_path_buf() }
    }

    /// Saves `plan` byte for byte along with the username it was fetched for.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn save(&self, plan: &FlightPlan, username: &str) -> Result<(), StoreError> {
        self.write(PLAN_FILE, plan.as_json())?;
        self.write(USERNAME_FILE, username)
    }

    /// Loads the saved plan.
    ///
    /// A missing file is `None`. An unreadable or corrupt file is logged
    /// and also treated as `None`, so startup never fails on bad state.
    #[must_use]
    pub fn load(&self) -> Option<FlightPlan> {
        let path = self.root.join(PLAN_FILE);
        if !self.fs.exists(&path) {
            return None;
        }
        let contents = match self.fs.read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read saved flight plan");
                return None;
            }
        };
        match FlightPlan::from_json(&contents) {
            Ok(plan) => Some(plan),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt saved flight plan");
                None
            }
        }
    }

    /// The username of the last successful fetch.
    #[must_use]
    pub fn last_username(&self) -> Option<String> {
        let path = self.root.join(USERNAME_FILE);
        if !self.fs.exists(&path) {
            return None;
        }
        self.fs
            .read_to_string(&path)
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    /// Forgets the saved plan. The username is kept for the next fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), StoreError> {
        let path = self.root.join(PLAN_FILE);
        self.fs.remove(&path).map_err(|source| StoreError::Io { action: "remove", path, source })
    }

    fn write(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.root.join(name);
        self.fs
            .write(&path, contents.as_bytes())
            .map_err(|source| StoreError::Io { action: "write", path, source })
    }
}
