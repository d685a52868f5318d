//! Material definitions
//!
//! Materials are data: loaded from TOML, contributing stats when a tool is
//! built from parts and render info when its model is baked.

use serde::{Deserialize, Serialize};

use crate::core::types::MaterialId;
use crate::stats::definitions::StatTable;

/// One material variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    /// Harvest tier this material belongs to
    #[serde(default)]
    pub tier: u32,
    /// Damage restored per unit when used in a repair recipe
    #[serde(default)]
    pub repair_value: u32,
    /// Stat bonuses a part of this material contributes to a built tool
    #[serde(default)]
    pub stats: StatTable,
    #[serde(default)]
    pub render: MaterialRenderInfo,
}

/// How a material tints and lights the part textures it is applied to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRenderInfo {
    /// Tint as an RGB triple
    #[serde(default = "white")]
    pub color: [u8; 3],
    /// Emissive light level, 0 = none
    #[serde(default)]
    pub luminosity: u8,
    /// Texture suffix when the material ships its own part textures;
    /// absent means "tint the base texture"
    #[serde(default)]
    pub texture: Option<String>,
}

fn white() -> [u8; 3] {
    [255, 255, 255]
}

impl Default for MaterialRenderInfo {
    fn default() -> Self {
        Self {
            color: white(),
            luminosity: 0,
            texture: None,
        }
    }
}

impl MaterialRenderInfo {
    /// Tint as packed RGB
    pub fn packed_color(&self) -> u32 {
        (u32::from(self.color[0]) << 16) | (u32::from(self.color[1]) << 8) | u32::from(self.color[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::definitions::StatId;

    #[test]
    fn test_parse_full_definition() {
        let material: Material = toml::from_str(
            r#"
            id = "cobalt"
            name = "Cobalt"
            tier = 3
            repair_value = 25

            [stats]
            durability = 150.0
            mining_speed = 1.5

            [render]
            color = [35, 118, 221]
            luminosity = 0
            "#,
        )
        .unwrap();

        assert_eq!(material.id, MaterialId::from("cobalt"));
        assert_eq!(material.stats.get(StatId::Durability), 150.0);
        assert_eq!(material.render.packed_color(), 0x2376DD);
    }

    #[test]
    fn test_parse_minimal_definition_uses_defaults() {
        let material: Material = toml::from_str(
            r#"
            id = "stone"
            name = "Stone"
            "#,
        )
        .unwrap();

        assert_eq!(material.tier, 0);
        assert_eq!(material.render.color, [255, 255, 255]);
        assert!(material.render.texture.is_none());
    }

    #[test]
    fn test_wrong_color_array_length_fails() {
        let result: Result<Material, _> = toml::from_str(
            r#"
            id = "bad"
            name = "Bad"

            [render]
            color = [1, 2]
            "#,
        );
        assert!(result.is_err());
    }
}
