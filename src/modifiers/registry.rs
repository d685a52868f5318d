//! Modifier registry: lookup-by-id for everything the tag blob references
//!
//! A missing id is a hard [`ForgeError::ModifierNotFound`]; the registry
//! never substitutes a default modifier. Callers decide whether to skip
//! the entry (tag parsing does, with a warning) or propagate.

use ahash::AHashMap;
use std::sync::Arc;

use crate::core::error::{ForgeError, Result};
use crate::core::types::ModifierId;
use crate::modifiers::hooks::Modifier;

#[derive(Default)]
pub struct ModifierRegistry {
    modifiers: AHashMap<ModifierId, Arc<dyn Modifier>>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a modifier under its own id
    ///
    /// Registration is write-once; a second modifier with the same id is
    /// rejected rather than silently replacing the first.
    pub fn register(&mut self, modifier: Arc<dyn Modifier>) -> Result<()> {
        let id = modifier.id();
        if self.modifiers.contains_key(&id) {
            return Err(ForgeError::DuplicateRegistration(id.to_string()));
        }
        self.modifiers.insert(id, modifier);
        Ok(())
    }

    pub fn get(&self, id: &ModifierId) -> Result<Arc<dyn Modifier>> {
        self.modifiers
            .get(id)
            .cloned()
            .ok_or_else(|| ForgeError::ModifierNotFound(id.clone()))
    }

    pub fn contains(&self, id: &ModifierId) -> bool {
        self.modifiers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModifierId> {
        self.modifiers.keys()
    }
}
