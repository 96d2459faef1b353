//! Local JSON file store, used for manual export and import

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{encode_document, parse_document, TimerStore};
use crate::{error::Result, state::TimerRecord};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a hand-picked save file; missing files and blank or malformed
    /// text are all errors here
    pub async fn import(&self) -> Result<Vec<TimerRecord>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl TimerStore for FileStore {
    async fn load(&self) -> Result<Option<Vec<TimerRecord>>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No timer document at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        parse_document(&text)
    }

    async fn save(&self, records: &[TimerRecord]) -> Result<()> {
        let text = encode_document(records)?;
        tokio::fs::write(&self.path, text).await?;
        debug!("Wrote {} timers to {}", records.len(), self.path.display());
        Ok(())
    }
}
