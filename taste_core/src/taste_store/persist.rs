//! Loading and saving the taste store as pretty-printed JSON.

use gift_catalogue::EntityId;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::store::{empty_categories, skeleton, TasteMap};
use super::{TasteStore, VisibilityPolicy};
use crate::error::StorageError;

/// Where a loaded store's contents came from.
#[derive(Debug)]
pub enum LoadOrigin {
    /// The file was read successfully.
    Restored { entities: usize },
    /// No file existed; the store is an empty skeleton.
    Missing,
    /// The file held no entities; the store is an empty skeleton.
    Empty,
    /// The file could not be read or parsed; the store is an empty skeleton.
    Corrupt(StorageError),
}

impl TasteStore {
    /// Load the store at `path`.
    ///
    /// Never fails: a missing, empty, unreadable or corrupt file yields an
    /// empty skeleton over `entities`. Entities from the catalogue that the
    /// file lacks are added, and every entity ends up with every category.
    pub fn load<'a>(
        path: impl Into<PathBuf>,
        entities: impl IntoIterator<Item = &'a EntityId>,
        visibility: VisibilityPolicy,
    ) -> (Self, LoadOrigin) {
        let path = path.into();
        let catalogue = skeleton(entities);

        let (tastes, origin) = match read_tastes(&path) {
            Ok(Some(tastes)) if !tastes.is_empty() => {
                let entities = tastes.len();
                tracing::info!(path = %path.display(), entities, "Loaded gift tastes");
                (merge_catalogue(tastes, catalogue), LoadOrigin::Restored { entities })
            }
            Ok(Some(_)) => {
                tracing::warn!(path = %path.display(), "Taste file has no entities, rebuilding");
                (catalogue, LoadOrigin::Empty)
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "No taste file, starting fresh");
                (catalogue, LoadOrigin::Missing)
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "Failed to load gift tastes: {}", err);
                (catalogue, LoadOrigin::Corrupt(err))
            }
        };

        (Self::from_tastes(path, tastes, visibility), origin)
    }

    /// Write the store to its file.
    ///
    /// The data goes to a temporary sibling first and is renamed into place,
    /// so the target is either the old contents or the complete new ones.
    pub fn save(&self) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&self.tastes)?;
        write_atomic(&self.path, contents.as_bytes())?;
        tracing::debug!(path = %self.path.display(), facts = self.fact_count(), "Saved gift tastes");
        Ok(())
    }
}

/// Read a taste file. `Ok(None)` means the file does not exist.
fn read_tastes(path: &Path) -> Result<Option<TasteMap>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    if contents.trim().is_empty() {
        return Ok(Some(TasteMap::new()));
    }

    let mut tastes: TasteMap = serde_json::from_str(&contents)?;
    tastes.retain(|id, _| !id.is_universal());
    Ok(Some(tastes))
}

/// Fill in catalogue entities and categories the file is missing.
fn merge_catalogue(mut tastes: TasteMap, catalogue: TasteMap) -> TasteMap {
    for categories in tastes.values_mut() {
        for (category, items) in empty_categories() {
            categories.entry(category).or_insert(items);
        }
    }
    for (id, categories) in catalogue {
        tastes.entry(id).or_insert(categories);
    }
    tastes
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| StorageError::InvalidPath(path.to_path_buf()))?;
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let temp = parent.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        Uuid::new_v4()
    ));
    let result = fs::write(&temp, contents).and_then(|()| fs::rename(&temp, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    Ok(result?)
}
