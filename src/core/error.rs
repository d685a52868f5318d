use thiserror::Error;

use crate::core::types::{ItemId, MaterialId, ModifierId};

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Modifier not found: {0}")]
    ModifierNotFound(ModifierId),

    #[error("Material not found: {0}")]
    MaterialNotFound(MaterialId),

    #[error("Unknown tool item: {0}")]
    UnknownToolItem(ItemId),

    #[error("Duplicate registration: {0}")]
    DuplicateRegistration(String),

    #[error("Invalid definition {path}: {message}")]
    InvalidDefinition { path: String, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
