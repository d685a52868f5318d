pub mod definition;
pub mod registry;

pub use definition::{Material, MaterialRenderInfo};
pub use registry::MaterialRegistry;
