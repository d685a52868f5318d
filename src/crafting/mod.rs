pub mod inventory;
pub mod loader;
pub mod recipe;
pub mod recipes;
pub mod registry;
pub mod station;
pub mod sync;
pub mod validated;

pub use inventory::{BasicInventory, ItemStack, MutableRecipeInventory, RecipeInventory};
pub use recipe::StationRecipe;
pub use registry::RecipeRegistry;
pub use station::CraftingStation;
pub use validated::ValidatedResult;
