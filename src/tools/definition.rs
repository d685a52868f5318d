//! Static tool definitions and their lookup table

use ahash::AHashMap;
use std::sync::Arc;

use crate::core::error::{ForgeError, Result};
use crate::core::types::ItemId;
use crate::stats::definitions::StatTable;

/// Immutable definition of a tool item
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub id: ItemId,
    pub name: String,
    /// Stats before materials and modifiers apply
    pub base_stats: StatTable,
    /// Part items consumed when building this tool at the station
    pub parts: Vec<ItemId>,
}

impl ToolDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, base_stats: StatTable) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_stats,
            parts: Vec::new(),
        }
    }

    pub fn with_parts(mut self, parts: Vec<ItemId>) -> Self {
        self.parts = parts;
        self
    }
}

/// Registry of tool definitions keyed by item id
#[derive(Default)]
pub struct ToolDefinitions {
    tools: AHashMap<ItemId, Arc<ToolDefinition>>,
}

impl ToolDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: ToolDefinition) -> Result<Arc<ToolDefinition>> {
        let id = definition.id.clone();
        if self.tools.contains_key(&id) {
            return Err(ForgeError::DuplicateRegistration(id.to_string()));
        }
        let definition = Arc::new(definition);
        self.tools.insert(id, Arc::clone(&definition));
        Ok(definition)
    }

    pub fn get(&self, id: &ItemId) -> Result<Arc<ToolDefinition>> {
        self.tools
            .get(id)
            .cloned()
            .ok_or_else(|| ForgeError::UnknownToolItem(id.clone()))
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.tools.contains_key(id)
    }
}
