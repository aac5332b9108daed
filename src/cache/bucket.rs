//! Versioned cache buckets on top of the `FileSystem` port.
//!
//! Directory layout:
//!
//! ```text
//! <root>/
//!   └── <bucket>/
//!       ├── index.yaml      request key -> entry metadata
//!       └── <id>.body       exact response body
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::http::{HttpRequest, HttpResponse};
use crate::ports::id_gen::IdGenerator;

const INDEX_FILE: &str = "index.yaml";

/// Errors raised by bucket storage.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Reading, writing or deleting bucket files failed.
    #[error("cache storage failed to {action} {}: {source}", .path.display())]
    Storage {
        /// What was being attempted.
        action: &'static str,
        /// The file or directory involved.
        path: PathBuf,
        /// The port error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A bucket index could not be serialised.
    #[error("cache index for bucket {bucket} could not be encoded: {source}")]
    Encode {
        /// Bucket name.
        bucket: String,
        /// The YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Metadata for one cached response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Body file name inside the bucket directory.
    pub body: String,
    /// HTTP status captured.
    pub status: u16,
    /// `Content-Type` captured.
    pub content_type: Option<String>,
    /// When the entry was written.
    pub stored_at: DateTime<Utc>,
}

type Index = BTreeMap<String, CacheEntry>;

/// All buckets under one root directory.
pub struct BucketStore<'a> {
    fs: &'a dyn FileSystem,
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock,
    root: PathBuf,
}

impl<'a> BucketStore<'a> {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(
        fs: &'a dyn FileSystem,
        ids: &'a dyn IdGenerator,
        clock: &'a dyn Clock,
        root: &Path,
    ) -> Self {
        Self { fs, ids, clock, root: root.to_path_buf() }
    }

    /// Names of every bucket, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the root exists but cannot be listed.
    pub fn names(&self) -> Result<Vec<String>, CacheError> {
        if !self.fs.exists(&self.root) {
            return Ok(Vec::new());
        }
        self.fs.list_dir(&self.root).map_err(|source| CacheError::Storage {
            action: "list",
            path: self.root.clone(),
            source,
        })
    }

    /// Creates `bucket` if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty index cannot be written.
    pub fn open(&self, bucket: &str) -> Result<(), CacheError> {
        if self.fs.exists(&self.index_path(bucket)) {
            return Ok(());
        }
        self.write_index(bucket, &Index::new())
    }

    /// Deletes `bucket` and everything in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed.
    pub fn delete(&self, bucket: &str) -> Result<(), CacheError> {
        let path = self.root.join(bucket);
        self.fs.remove(&path).map_err(|source| CacheError::Storage {
            action: "delete",
            path,
            source,
        })
    }

    /// Number of entries in `bucket`; zero for a missing bucket.
    #[must_use]
    pub fn entry_count(&self, bucket: &str) -> usize {
        self.read_index(bucket).len()
    }

    /// Looks up the response stored for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index names a body file that cannot be read.
    pub fn lookup(
        &self,
        bucket: &str,
        request: &HttpRequest,
    ) -> Result<Option<HttpResponse>, CacheError> {
        let index = self.read_index(bucket);
        let Some(entry) = index.get(&request.cache_key()) else {
            return Ok(None);
        };
        let path = self.root.join(bucket).join(&entry.body);
        let body = self.fs.read(&path).map_err(|source| CacheError::Storage {
            action: "read",
            path,
            source,
        })?;
        Ok(Some(HttpResponse { status: entry.status, content_type: entry.content_type.clone(), body }))
    }

    /// Stores `response` for `request`, replacing any previous copy.
    ///
    /// The body is written before the index points at it, so a reader
    /// never sees an entry without its body. Concurrent writers to the
    /// same key resolve last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the body or the index cannot be written.
    pub fn put(
        &self,
        bucket: &str,
        request: &HttpRequest,
        response: &HttpResponse,
    ) -> Result<(), CacheError> {
        let body = format!("{}.body", self.ids.generate_id());
        let path = self.root.join(bucket).join(&body);
        self.fs.write(&path, &response.body).map_err(|source| CacheError::Storage {
            action: "write",
            path,
            source,
        })?;

        let mut index = self.read_index(bucket);
        let entry = CacheEntry {
            body: body.clone(),
            status: response.status,
            content_type: response.content_type.clone(),
            stored_at: self.clock.now(),
        };
        let replaced = index.insert(request.cache_key(), entry);
        if let Err(e) = self.write_index(bucket, &index) {
            self.discard_body(bucket, &body);
            return Err(e);
        }

        if let Some(old) = replaced {
            self.discard_body(bucket, &old.body);
        }
        Ok(())
    }

    /// Removes a body file no index entry points at.
    fn discard_body(&self, bucket: &str, body: &str) {
        let path = self.root.join(bucket).join(body);
        if let Err(e) = self.fs.remove(&path) {
            tracing::warn!(path = %path.display(), error = %e, "could not remove orphaned cache body");
        }
    }

    fn index_path(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket).join(INDEX_FILE)
    }

    /// Reads a bucket index. A missing or unreadable index is an empty
    /// bucket; the cache is rebuilt from the network in that case.
    fn read_index(&self, bucket: &str) -> Index {
        let path = self.index_path(bucket);
        if !self.fs.exists(&path) {
            return Index::new();
        }
        let parsed = self
            .fs
            .read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|yaml| serde_yaml::from_str(&yaml).map_err(|e| e.to_string()));
        parsed.unwrap_or_else(|e| {
            tracing::warn!(bucket, error = %e, "discarding unreadable cache index");
            Index::new()
        })
    }

    fn write_index(&self, bucket: &str, index: &Index) -> Result<(), CacheError> {
        let yaml = serde_yaml::to_string(index)
            .map_err(|source| CacheError::Encode { bucket: bucket.to_string(), source })?;
        let path = self.index_path(bucket);
        self.fs.write(&path, yaml.as_bytes()).map_err(|source| CacheError::Storage {
            action: "write",
            path,
            source,
        })
    }
}
