//! Memoized baked models keyed by material
//!
//! The one component shared between the simulation and render threads.
//! Entries are never invalidated individually; a resource reload discards
//! the whole cache (and the missing-texture dedup set) and bumps the
//! generation counter.

use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::config::config;
use crate::core::types::MaterialId;
use crate::render::model::{BakedModel, ModelBaker};

#[derive(Default)]
pub struct ModelCache {
    models: DashMap<MaterialId, Arc<BakedModel>>,
    /// Missing textures already logged this generation
    missing_logged: DashSet<String>,
    generation: AtomicU64,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached model for a material, baking it on first request
    ///
    /// Distinct materials bake independently; repeated requests for the
    /// same material return the identical `Arc`, computed at most once per
    /// generation.
    pub fn get_or_bake(&self, material: &MaterialId, baker: &ModelBaker) -> Arc<BakedModel> {
        if let Some(model) = self.models.get(material) {
            return Arc::clone(&model);
        }

        let entry = self
            .models
            .entry(material.clone())
            .or_insert_with(|| {
                let output = baker.bake(material);
                if let Some(location) = output.missing_texture {
                    self.log_missing(location);
                }
                tracing::debug!(%material, "baked material model");
                Arc::new(output.model)
            });
        Arc::clone(&entry)
    }

    /// Log a missing texture at most once per location per generation
    fn log_missing(&self, location: String) {
        if config().log_missing_textures && self.missing_logged.insert(location.clone()) {
            tracing::debug!(%location, "texture missing from resource pack, using fallback");
        }
    }

    /// Discard everything on a global resource reload
    ///
    /// Bakes in flight during the reset may still land in the old
    /// generation's map slot; the next request simply rebakes them.
    pub fn reset_generation(&self) {
        self.models.clear();
        self.missing_logged.clear();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
