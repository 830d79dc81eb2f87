// src/infrastructure/file_run_state.rs
//
// JSON file holding the per-action last-run timestamps, durable across
// cycles and process restarts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ports::RunStateStore;
use crate::domain::NotifyAction;
use crate::error::NotifyError;

pub struct FileRunState {
    path: PathBuf,
    timestamps: Mutex<HashMap<String, i64>>,
}

impl FileRunState {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NotifyError> {
        let path = path.as_ref().to_path_buf();
        let timestamps = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| NotifyError::State(format!("read {}: {}", path.display(), e)))?;
            serde_json::from_str(&content)
                .map_err(|e| NotifyError::State(format!("parse {}: {}", path.display(), e)))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            timestamps: Mutex::new(timestamps),
        })
    }

    fn persist(&self, timestamps: &HashMap<String, i64>) -> Result<(), NotifyError> {
        let content = serde_json::to_string_pretty(timestamps)
            .map_err(|e| NotifyError::State(format!("serialize run state: {}", e)))?;
        fs::write(&self.path, content)
            .map_err(|e| NotifyError::State(format!("write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl RunStateStore for FileRunState {
    async fn last_run(&self, action: NotifyAction) -> Result<i64, NotifyError> {
        let timestamps = self
            .timestamps
            .lock()
            .map_err(|_| NotifyError::State("run state lock poisoned".to_string()))?;
        Ok(timestamps.get(&action.state_key()).copied().unwrap_or(0))
    }

    async fn set_last_run(&self, action: NotifyAction, timestamp: i64) -> Result<(), NotifyError> {
        let mut timestamps = self
            .timestamps
            .lock()
            .map_err(|_| NotifyError::State("run state lock poisoned".to_string()))?;
        timestamps.insert(action.state_key(), timestamp);
        self.persist(&timestamps)
    }
}
