//! Material-driven model baking
//!
//! Baking is deterministic and side-effect-free given (base texture slot,
//! material render info, transform). Sprite resolution is a host seam; a
//! texture missing from the resource pack falls back to the tinted base
//! sprite and is reported to the caller for deduplicated logging.

use std::sync::Arc;

use crate::core::types::MaterialId;
use crate::materials::registry::MaterialRegistry;

/// Handle to a resolved sprite in the host's atlas
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteHandle {
    pub location: String,
}

impl SpriteHandle {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Host seam mapping (texture slot, material) to sprites
pub trait TextureResolver: Send + Sync {
    /// Sprite for a material-specific texture; None when absent on disk
    fn resolve(&self, slot: &str, material: &MaterialId) -> Option<SpriteHandle>;

    /// Base sprite for the bare slot texture; always available
    fn fallback(&self, slot: &str) -> SpriteHandle;
}

/// Baked render representation for one material
#[derive(Debug, Clone, PartialEq)]
pub struct BakedModel {
    pub material: MaterialId,
    pub sprite: SpriteHandle,
    /// Tint as packed RGB; white when the material ships its own texture
    pub color: u32,
    pub luminosity: u8,
    /// Pixel offset applied to the part layer
    pub offset: [f32; 2],
}

/// Result of one bake, with the missing-texture location when the
/// material texture was absent and the fallback was used
pub struct BakeOutput {
    pub model: BakedModel,
    pub missing_texture: Option<String>,
}

const UNTINTED: u32 = 0xFFFFFF;

/// Bakes models for one texture slot
pub struct ModelBaker {
    materials: Arc<MaterialRegistry>,
    resolver: Arc<dyn TextureResolver>,
    texture_slot: String,
    offset: [f32; 2],
}

impl ModelBaker {
    pub fn new(
        materials: Arc<MaterialRegistry>,
        resolver: Arc<dyn TextureResolver>,
        texture_slot: impl Into<String>,
        offset: [f32; 2],
    ) -> Self {
        Self {
            materials,
            resolver,
            texture_slot: texture_slot.into(),
            offset,
        }
    }

    /// Bake the model for a material
    ///
    /// A material with its own texture uses it untinted; otherwise the base
    /// sprite is tinted with the material color. Unknown materials fall all
    /// the way back to the untinted base sprite.
    pub fn bake(&self, material_id: &MaterialId) -> BakeOutput {
        let fallback = self.resolver.fallback(&self.texture_slot);

        let Ok(material) = self.materials.get(material_id) else {
            return BakeOutput {
                model: BakedModel {
                    material: material_id.clone(),
                    sprite: fallback,
                    color: UNTINTED,
                    luminosity: 0,
                    offset: self.offset,
                },
                missing_texture: None,
            };
        };

        let info = &material.render;
        let (sprite, color, missing_texture) = if info.texture.is_some() {
            match self.resolver.resolve(&self.texture_slot, material_id) {
                Some(sprite) => (sprite, UNTINTED, None),
                None => {
                    let location = format!("{}_{}", self.texture_slot, material_id);
                    (fallback, info.packed_color(), Some(location))
                }
            }
        } else {
            (fallback, info.packed_color(), None)
        };

        BakeOutput {
            model: BakedModel {
                material: material_id.clone(),
                sprite,
                color,
                luminosity: info.luminosity,
                offset: self.offset,
            },
            missing_texture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::definition::Material;
    use crate::materials::registry::MaterialRegistry;

    /// Resolver that only knows sprites for the given materials
    struct FixedResolver(Vec<String>);

    impl TextureResolver for FixedResolver {
        fn resolve(&self, slot: &str, material: &MaterialId) -> Option<SpriteHandle> {
            let location = format!("{}_{}", slot, material);
            self.0
                .contains(&material.to_string())
                .then(|| SpriteHandle::new(location))
        }

        fn fallback(&self, slot: &str) -> SpriteHandle {
            SpriteHandle::new(slot.to_string())
        }
    }

    fn registry() -> Arc<MaterialRegistry> {
        let mut materials = MaterialRegistry::new();
        let with_texture: Material = toml::from_str(
            r#"
            id = "cobalt"
            name = "Cobalt"

            [render]
            color = [35, 118, 221]
            texture = "cobalt"
            "#,
        )
        .unwrap();
        let tinted: Material = toml::from_str(
            r#"
            id = "slimewood"
            name = "Slimewood"

            [render]
            color = [141, 208, 85]
            luminosity = 3
            "#,
        )
        .unwrap();
        materials.register(with_texture).unwrap();
        materials.register(tinted).unwrap();
        Arc::new(materials)
    }

    #[test]
    fn test_material_texture_used_untinted() {
        let baker = ModelBaker::new(
            registry(),
            Arc::new(FixedResolver(vec!["cobalt".into()])),
            "pick_head",
            [0.0, 0.0],
        );
        let output = baker.bake(&MaterialId::from("cobalt"));
        assert_eq!(output.model.sprite.location, "pick_head_cobalt");
        assert_eq!(output.model.color, 0xFFFFFF);
        assert!(output.missing_texture.is_none());
    }

    #[test]
    fn test_missing_texture_falls_back_tinted() {
        let baker = ModelBaker::new(
            registry(),
            Arc::new(FixedResolver(vec![])),
            "pick_head",
            [0.0, 0.0],
        );
        let output = baker.bake(&MaterialId::from("cobalt"));
        assert_eq!(output.model.sprite.location, "pick_head");
        assert_eq!(output.model.color, 0x2376DD);
        assert_eq!(output.missing_texture.as_deref(), Some("pick_head_cobalt"));
    }

    #[test]
    fn test_tint_only_material_never_reports_missing() {
        let baker = ModelBaker::new(
            registry(),
            Arc::new(FixedResolver(vec![])),
            "pick_head",
            [0.0, 0.0],
        );
        let output = baker.bake(&MaterialId::from("slimewood"));
        assert_eq!(output.model.color, 0x8DD055);
        assert_eq!(output.model.luminosity, 3);
        assert!(output.missing_texture.is_none());
    }

    #[test]
    fn test_unknown_material_uses_untinted_fallback() {
        let baker = ModelBaker::new(
            registry(),
            Arc::new(FixedResolver(vec![])),
            "pick_head",
            [1.0, -2.0],
        );
        let output = baker.bake(&MaterialId::from("unobtainium"));
        assert_eq!(output.model.color, 0xFFFFFF);
        assert_eq!(output.model.offset, [1.0, -2.0]);
    }
}
