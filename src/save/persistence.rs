//! Fishing save persistence (load/save to disk).

use super::types::FishingSave;
use crate::core::constants::SAVE_FILE_NAME;
use directories::ProjectDirs;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads and writes the fishing save record as pretty-printed JSON.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager pointing at the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "angling").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the record, stamping `last_save_time` first.
    pub fn save(&self, save: &mut FishingSave) -> io::Result<()> {
        save.last_save_time = chrono::Utc::now().timestamp();

        let json = save
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.save_path, json)?;
        debug!("fishing save written to {}", self.save_path.display());
        Ok(())
    }

    /// Reads the record, failing on a missing or unparsable file.
    pub fn try_load(&self) -> io::Result<FishingSave> {
        let json = fs::read_to_string(&self.save_path)?;
        FishingSave::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Reads the record, or a fresh one if there is nothing usable on disk.
    pub fn load(&self) -> FishingSave {
        match self.try_load() {
            Ok(save) => save,
            Err(e) if e.kind() == io::ErrorKind::NotFound => FishingSave::default(),
            Err(e) => {
                warn!(
                    "fishing save at {} unreadable, starting fresh: {}",
                    self.save_path.display(),
                    e
                );
                FishingSave::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angler::AnglerRole;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_manager() -> SaveManager {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "angling-test-{}-{}",
            std::process::id(),
            test_id
        ));
        SaveManager::with_path(dir.join(SAVE_FILE_NAME))
    }

    #[test]
    fn test_save_and_load() {
        let manager = temp_manager();
        let mut save = FishingSave::new();
        save.failed_attempts = 2;
        save.profile_mut("Jeb", AnglerRole::Pilot).increase_skill(3.0);

        manager.save(&mut save).unwrap();
        assert!(manager.save_exists());
        assert!(save.last_save_time > 0);

        let loaded = manager.load();
        assert_eq!(loaded, save);

        fs::remove_file(manager.path()).ok();
    }

    #[test]
    fn test_missing_file_loads_default() {
        let manager = temp_manager();
        assert!(!manager.save_exists());
        assert_eq!(manager.load(), FishingSave::default());
        assert!(manager.try_load().is_err());
    }

    #[test]
    fn test_garbage_file_loads_default() {
        let manager = temp_manager();
        fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
        fs::write(manager.path(), "\u{0}\u{1}garbage").unwrap();

        assert_eq!(manager.load(), FishingSave::default());
        let err = manager.try_load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        fs::remove_file(manager.path()).ok();
    }
}
