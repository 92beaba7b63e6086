use std::sync::Arc;

use calluna_core::{Mesh, Texture2D};

/// Renders mesh geometry imported from an OBJ file.
///
/// `path` is the workspace-relative source the geometry was built from and
/// is what scene documents persist; `mesh` is rebuilt from it on load.
#[derive(Debug, Clone, Default)]
pub struct MeshRenderer {
    pub path: String,
    pub texture: Option<Arc<Texture2D>>,
    pub mesh: Option<Arc<Mesh>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let renderer = MeshRenderer::default();
        assert!(renderer.path.is_empty());
        assert!(renderer.texture.is_none());
        assert!(renderer.mesh.is_none());
    }
}
