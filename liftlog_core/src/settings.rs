//! User settings persistence with file locking.

use crate::{Error, Result, UserSettings};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl UserSettings {
    /// Load settings with a shared lock
    ///
    /// Returns `None` if no settings document exists yet. An unreadable or
    /// corrupt document is logged and treated as absent.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!("No settings file at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open settings {:?}: {}. Using defaults.", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock settings {:?}: {}. Using defaults.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;

        if let Err(e) = read {
            tracing::warn!("Failed to read settings {:?}: {}. Using defaults.", path, e);
            return Ok(None);
        }

        match serde_json::from_str::<UserSettings>(&contents) {
            Ok(settings) => {
                tracing::debug!("Loaded settings from {:?}", path);
                Ok(Some(settings))
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings {:?}: {}. Using defaults.", path, e);
                Ok(None)
            }
        }
    }

    /// Load settings, falling back to `default` when none are stored
    pub fn load_or(path: &Path, default: UserSettings) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or(default))
    }

    /// Save settings atomically (temp file, fsync, rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Other(format!("settings path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Load (or start from `default`), modify, and save back
    pub fn update<F>(path: &Path, default: UserSettings, f: F) -> Result<Self>
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut settings = Self::load_or(path, default)?;
        f(&mut settings);
        settings.save(path)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeightUnit;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = UserSettings {
            weight_unit: WeightUnit::Lbs,
        };
        settings.save(&path).unwrap();

        let loaded = UserSettings::load(&path).unwrap();
        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let loaded = UserSettings::load(&temp_dir.path().join("missing.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ weight_unit: stone").unwrap();

        let loaded = UserSettings::load_or(
            &path,
            UserSettings {
                weight_unit: WeightUnit::Lbs,
            },
        )
        .unwrap();
        assert_eq!(loaded.weight_unit, WeightUnit::Lbs);
    }

    #[test]
    fn test_update_persists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        UserSettings::update(&path, UserSettings::default(), |s| {
            s.weight_unit = WeightUnit::Lbs;
        })
        .unwrap();

        let loaded = UserSettings::load(&path).unwrap().unwrap();
        assert_eq!(loaded.weight_unit, WeightUnit::Lbs);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        UserSettings::default().save(&path).unwrap();
        UserSettings::default().save(&path).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "settings.json")
            .collect();
        assert!(extras.is_empty(), "Unexpected files: {:?}", extras);
    }
}
