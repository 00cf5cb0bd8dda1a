//! `package.json` access
//!
//! Several steps contribute to the manifest over one assembly, so every
//! mutation re-reads the file, applies its change and writes it back. Nothing
//! is cached between calls. Top-level keys keep the order they have on disk;
//! the `scripts` object is re-sorted by key on every merge.

use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const MANIFEST_FILE: &str = "package.json";

const SCRIPTS_KEY: &str = "scripts";

/// Reads and writes the manifest of a project root
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestStore;

impl ManifestStore {
    pub fn new() -> Self {
        Self
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE)
    }

    /// Whether the manifest is present; errors when that cannot be determined
    pub async fn exists(&self, root: &Path) -> Result<bool, ManifestError> {
        let path = self.path(root);
        fs::try_exists(&path)
            .await
            .map_err(|source| ManifestError::Io { path, source })
    }

    pub async fn ensure_exists(&self, root: &Path) -> Result<(), ManifestError> {
        if self.exists(root).await? {
            Ok(())
        } else {
            Err(ManifestError::NotFound(self.path(root)))
        }
    }

    /// Load the manifest's top-level object
    pub async fn read(&self, root: &Path) -> Result<Map<String, Value>, ManifestError> {
        self.ensure_exists(root).await?;
        let path = self.path(root);
        let content = fs::read_to_string(&path)
            .await
            .map_err(|source| ManifestError::Io {
                path: path.clone(),
                source,
            })?;

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(_) => Err(ManifestError::Malformed {
                path,
                message: "top level is not an object".to_string(),
            }),
            Err(source) => Err(ManifestError::Parse { path, source }),
        }
    }

    /// Persist the manifest: 2-space indent, trailing newline
    pub async fn write(&self, root: &Path, fields: &Map<String, Value>) -> Result<(), ManifestError> {
        let path = self.path(root);
        let mut content = serde_json::to_string_pretty(fields)
            .map_err(|source| ManifestError::Parse {
                path: path.clone(),
                source,
            })?;
        content.push('\n');

        fs::write(&path, content)
            .await
            .map_err(|source| ManifestError::Io { path, source })
    }

    /// Set one top-level field, leaving every other key untouched
    pub async fn set_field(
        &self,
        root: &Path,
        key: &str,
        value: Value,
    ) -> Result<(), ManifestError> {
        let mut fields = self.read(root).await?;
        debug!(key, "setting manifest field");
        fields.insert(key.to_string(), value);
        self.write(root, &fields).await
    }

    /// Merge scripts into the manifest; `additions` win on collision and the
    /// result is sorted by key
    pub async fn merge_scripts<K, V>(
        &self,
        root: &Path,
        additions: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), ManifestError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = self.read(root).await?;

        let existing = match fields.get(SCRIPTS_KEY) {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(scripts)) => scripts.clone(),
            Some(_) => {
                return Err(ManifestError::Malformed {
                    path: self.path(root),
                    message: "\"scripts\" is not an object".to_string(),
                })
            }
        };

        let additions: Map<String, Value> = additions
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        debug!(keys = ?additions.keys().collect::<Vec<_>>(), "merging scripts");

        let merged = merge_script_maps(existing, additions);
        // Replacing an existing key keeps its position
        fields.insert(SCRIPTS_KEY.to_string(), Value::Object(merged));
        self.write(root, &fields).await
    }

    /// Drop a script if `matches` accepts its current command.
    /// Returns whether anything was removed.
    pub async fn remove_script_if(
        &self,
        root: &Path,
        key: &str,
        matches: impl Fn(&str) -> bool,
    ) -> Result<bool, ManifestError> {
        let mut fields = self.read(root).await?;

        let Some(Value::Object(scripts)) = fields.get(SCRIPTS_KEY) else {
            return Ok(false);
        };
        let hit = scripts
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|command| matches(command));
        if !hit {
            return Ok(false);
        }

        let remaining: Map<String, Value> = scripts
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        fields.insert(SCRIPTS_KEY.to_string(), Value::Object(remaining));
        self.write(root, &fields).await?;
        Ok(true)
    }
}

/// Union of two script maps, `additions` overriding, sorted ascending by key
pub fn merge_script_maps(
    existing: Map<String, Value>,
    additions: Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = existing;
    for (key, value) in additions {
        merged.insert(key, value);
    }

    let mut entries: Vec<(String, Value)> = merged.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries.into_iter().collect()
}
