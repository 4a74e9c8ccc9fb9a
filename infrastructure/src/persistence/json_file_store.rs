//! JSON file snapshot of veto requests
//!
//! The whole table is written as one pretty-printed JSON array. Writes go
//! to a uniquely named sibling temp file that is then renamed over the
//! target, so readers never observe a half-written snapshot and concurrent
//! writers never share a temp file.

use council_application::VetoStore;
use council_domain::{VetoError, VetoRequest};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// [`VetoStore`] backed by a single JSON file
pub struct JsonFileVetoStore {
    path: PathBuf,
}

impl JsonFileVetoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn persistence_error(action: &str, path: &Path, error: impl std::fmt::Display) -> VetoError {
    VetoError::Persistence(format!("{} {}: {}", action, path.display(), error))
}

impl VetoStore for JsonFileVetoStore {
    fn save(&self, requests: &[VetoRequest]) -> Result<(), VetoError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)
            .map_err(|e| persistence_error("could not create directory", dir, e))?;

        let temp = NamedTempFile::new_in(dir)
            .map_err(|e| persistence_error("could not create temp file in", dir, e))?;
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, requests)
            .map_err(|e| persistence_error("could not serialize to", temp.path(), e))?;
        writer
            .flush()
            .map_err(|e| persistence_error("could not write", temp.path(), e))?;
        drop(writer);

        temp.persist(&self.path)
            .map_err(|e| persistence_error("could not replace", &self.path, e))?;
        debug!(path = %self.path.display(), count = requests.len(), "Wrote veto snapshot");
        Ok(())
    }

    fn load(&self) -> Result<Vec<VetoRequest>, VetoError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(persistence_error("could not read", &self.path, e)),
        };
        serde_json::from_str(&content)
            .map_err(|e| persistence_error("corrupt snapshot", &self.path, e))
    }
}
