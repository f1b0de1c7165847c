//! Scene persistence facade.

use std::fs;
use std::path::PathBuf;

use shared::SceneData;

use crate::error::EditorError;

/// Storage backend for the scene. The orchestrator saves after every undo
/// head change and loads once at startup.
pub trait ScenePersistence {
    fn save(&mut self, data: &SceneData) -> Result<(), EditorError>;

    /// Load the stored scene. `Ok(None)` means nothing has been saved yet.
    fn load(&mut self) -> Result<Option<SceneData>, EditorError>;
}

/// Stores the scene as a JSON file on disk.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persistence rooted in the platform's per-user data directory.
    pub fn in_data_dir() -> Result<Self, EditorError> {
        let dirs = directories::ProjectDirs::from("com", "touch-editor", "touch-editor")
            .ok_or_else(|| EditorError::Persistence("no user data directory".into()))?;

        let dir = dirs.data_dir();
        fs::create_dir_all(dir).map_err(|e| EditorError::Persistence(e.to_string()))?;

        Ok(Self::new(dir.join("scene_data.json")))
    }
}

impl ScenePersistence for JsonFilePersistence {
    fn save(&mut self, data: &SceneData) -> Result<(), EditorError> {
        let json = data
            .to_json()
            .map_err(|e| EditorError::Persistence(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| EditorError::Persistence(e.to_string()))
    }

    fn load(&mut self) -> Result<Option<SceneData>, EditorError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| EditorError::Persistence(e.to_string()))?;
        let data =
            SceneData::from_json(&json).map_err(|e| EditorError::Persistence(e.to_string()))?;
        Ok(Some(data))
    }
}
