use crate::error::AppError;
use crate::model::Task;
use crate::storage::SnapshotStore;
use std::path::{Path, PathBuf};
use tracing::debug;

const STORE_FILE_NAME: &str = "tasks.json";
const STORE_ENV_VAR: &str = "TASKLIST_STORE_PATH";

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("tasklist").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("tasklist")
            .join(STORE_FILE_NAME))
    }
}

/// Serializes the whole list as a JSON array of `{id, text, completed}`.
pub fn encode_snapshot(tasks: &[Task]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

pub fn decode_snapshot(blob: &str) -> Result<Vec<Task>, AppError> {
    serde_json::from_str(blob).map_err(|err| AppError::invalid_data(format!("snapshot: {err}")))
}

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the location resolved by [`store_path`].
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, AppError> {
        if !self.path.exists() {
            debug!(file = %self.path.display(), "no snapshot on disk");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        debug!(file = %self.path.display(), bytes = content.len(), "loaded snapshot");
        Ok(Some(content))
    }

    fn save(&mut self, blob: &str) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, blob)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)?;
        }

        debug!(file = %self.path.display(), bytes = blob.len(), "saved snapshot");
        Ok(())
    }
}
