pub mod entry;
pub mod hooks;
pub mod library;
pub mod registry;

pub use entry::{ModifierEntry, SavedModifier};
pub use hooks::{BreakSpeedEvent, Modifier, ToolView, NO_COLOR_OVERRIDE};
pub use registry::ModifierRegistry;
