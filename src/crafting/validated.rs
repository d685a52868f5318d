//! Three-way outcome of recipe evaluation
//!
//! `Error` is a normal, user-visible return value shown in the station UI,
//! not a fault: the recipe still structurally matches, it just cannot be
//! applied ("incompatible modifier", "missing material", ...).

use crate::crafting::inventory::ItemStack;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedResult {
    /// No result; the recipe matched but produces nothing here
    Pass,
    /// A craftable result
    Success(ItemStack),
    /// A user-visible reason the recipe cannot apply
    Error(String),
}

impl ValidatedResult {
    /// Wrap a non-empty result stack
    pub fn success(stack: ItemStack) -> Self {
        debug_assert!(!stack.is_empty(), "success result must not be empty");
        ValidatedResult::Success(stack)
    }

    pub fn error(message: impl Into<String>) -> Self {
        ValidatedResult::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidatedResult::Success(_))
    }

    pub fn has_error(&self) -> bool {
        matches!(self, ValidatedResult::Error(_))
    }

    pub fn result(&self) -> Option<&ItemStack> {
        match self {
            ValidatedResult::Success(stack) => Some(stack),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ValidatedResult::Error(message) => Some(message),
            _ => None,
        }
    }
}
