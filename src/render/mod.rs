pub mod model;
pub mod model_cache;

pub use model::{BakedModel, ModelBaker, SpriteHandle, TextureResolver};
pub use model_cache::ModelCache;
