//! Material registry and TOML loading
//!
//! A malformed definition fails that single file with a descriptive error;
//! the directory walker logs it and keeps going, so one bad data file never
//! takes down the load.

use ahash::AHashMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::error::{ForgeError, Result};
use crate::core::types::MaterialId;
use crate::materials::definition::Material;

#[derive(Default)]
pub struct MaterialRegistry {
    materials: AHashMap<MaterialId, Arc<Material>>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, material: Material) -> Result<MaterialId> {
        let id = material.id.clone();
        if self.materials.contains_key(&id) {
            return Err(ForgeError::DuplicateRegistration(id.to_string()));
        }
        self.materials.insert(id.clone(), Arc::new(material));
        Ok(id)
    }

    pub fn get(&self, id: &MaterialId) -> Result<Arc<Material>> {
        self.materials
            .get(id)
            .cloned()
            .ok_or_else(|| ForgeError::MaterialNotFound(id.clone()))
    }

    pub fn contains(&self, id: &MaterialId) -> bool {
        self.materials.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &MaterialId> {
        self.materials.keys()
    }

    /// Load a material from a TOML file
    pub fn load_file(&mut self, path: &Path) -> Result<MaterialId> {
        let content = std::fs::read_to_string(path)?;
        let material: Material =
            toml::from_str(&content).map_err(|e| ForgeError::InvalidDefinition {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        self.register(material)
    }

    /// Load all .toml files from a directory recursively
    ///
    /// Individual bad definitions are logged and skipped; only I/O failure
    /// on the directory itself is fatal.
    pub fn load_directory(&mut self, path: &Path) -> Result<Vec<MaterialId>> {
        let mut ids = Vec::new();
        self.load_directory_recursive(path, &mut ids)?;
        tracing::info!(count = ids.len(), dir = %path.display(), "loaded materials");
        Ok(ids)
    }

    fn load_directory_recursive(&mut self, path: &Path, ids: &mut Vec<MaterialId>) -> Result<()> {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let entry_path = entry.path();

            if entry_path.is_dir() {
                self.load_directory_recursive(&entry_path, ids)?;
            } else if entry_path.extension().is_some_and(|ext| ext == "toml") {
                match self.load_file(&entry_path) {
                    Ok(id) => ids.push(id),
                    Err(e) => {
                        tracing::warn!(path = %entry_path.display(), error = %e, "skipping material definition");
                    }
                }
            }
        }
        Ok(())
    }
}
