use std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
};

use super::template::{RoomTemplate, WorkRoomConfig};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Room templates keyed by file stem, plus the work room override.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    templates: BTreeMap<String, RoomTemplate>,
    work_room: WorkRoomConfig,
}

impl RoomCatalog {
    /// Reads every `*.json` file in `rooms_dir` as a room template and the
    /// optional work room config. Missing paths are treated as empty.
    pub fn load(rooms_dir: &Path, work_room_config: &Path) -> Result<Self, CatalogError> {
        let templates = load_templates(rooms_dir)?;
        let work_room = load_work_room(work_room_config)?;

        tracing::info!(
            rooms = templates.len(),
            background = work_room.background().is_some(),
            "loaded room catalog from {}",
            rooms_dir.display(),
        );

        Ok(Self { templates, work_room })
    }

    pub fn get(&self, name: &str) -> Option<&RoomTemplate> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Room names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    pub fn work_room(&self) -> &WorkRoomConfig {
        &self.work_room
    }
}

fn load_templates(rooms_dir: &Path) -> Result<BTreeMap<String, RoomTemplate>, CatalogError> {
    let mut templates = BTreeMap::new();

    let entries = match fs::read_dir(rooms_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("rooms directory {} does not exist", rooms_dir.display());
            return Ok(templates);
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: rooms_dir.to_path_buf(),
                source,
            })
        }
    };

    for entry in entries {
        let path = entry
            .map_err(|source| CatalogError::Io {
                path: rooms_dir.to_path_buf(),
                source,
            })?
            .path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if !is_valid_room_name(name) {
            tracing::warn!(
                "skipping {}: room names may only use letters, digits, '-' and '_'",
                path.display(),
            );
            continue;
        }

        let template: RoomTemplate = read_json(&path)?;
        tracing::debug!(room = name, items = template.items.len(), "loaded room template");
        templates.insert(name.to_string(), template);
    }

    Ok(templates)
}

/// Room names end up in URL paths and inline handlers unescaped.
pub fn is_valid_room_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn load_work_room(path: &Path) -> Result<WorkRoomConfig, CatalogError> {
    if !path.exists() {
        tracing::debug!("no work room config at {}", path.display());
        return Ok(WorkRoomConfig::default());
    }
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}
