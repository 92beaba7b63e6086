use std::sync::Arc;

use calluna_core::Texture2D;
use glam::Vec4;

/// Textured, tinted 2D quad.
///
/// The `tilling_factor` name mirrors the canonical scene-document key
/// (`tillingFactor`); renaming it would silently orphan existing
/// documents.
#[derive(Debug, Clone)]
pub struct SpriteRenderer {
    pub color: Vec4,
    /// Loaded texture handle; `None` renders the flat color. Documents
    /// store the texture as a workspace-relative path, never pixel data.
    pub texture: Option<Arc<Texture2D>>,
    pub tilling_factor: f32,
    pub z_index: i32,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            texture: None,
            tilling_factor: 1.0,
            z_index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_untextured_white() {
        let sprite = SpriteRenderer::default();
        assert_eq!(sprite.color, Vec4::ONE);
        assert!(sprite.texture.is_none());
        assert_eq!(sprite.tilling_factor, 1.0);
        assert_eq!(sprite.z_index, 0);
    }
}
