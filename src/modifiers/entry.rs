//! A modifier attached to a tool at a level

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::types::ModifierId;
use crate::modifiers::hooks::Modifier;

/// One slot in a tool's ordered modifier list
#[derive(Clone)]
pub struct ModifierEntry {
    modifier: Arc<dyn Modifier>,
    level: u32,
}

impl ModifierEntry {
    pub fn new(modifier: Arc<dyn Modifier>, level: u32) -> Self {
        Self { modifier, level }
    }

    pub fn id(&self) -> ModifierId {
        self.modifier.id()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn modifier(&self) -> &dyn Modifier {
        self.modifier.as_ref()
    }

    /// Same entry one level higher
    pub fn incremented(&self) -> Self {
        Self {
            modifier: Arc::clone(&self.modifier),
            level: self.level + 1,
        }
    }

    /// Persisted form: (id, level)
    pub fn saved(&self) -> SavedModifier {
        SavedModifier {
            id: self.id(),
            level: self.level,
        }
    }
}

impl fmt::Debug for ModifierEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierEntry")
            .field("id", &self.id())
            .field("level", &self.level)
            .finish()
    }
}

/// Serialized representation of a modifier entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedModifier {
    pub id: ModifierId,
    pub level: u32,
}
