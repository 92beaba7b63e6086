//! Workspace-rooted asset loading.
//!
//! [`AssetServer`] resolves relative asset paths against a project
//! workspace root, loads textures and meshes, and hands out shared
//! handles. Load failures are logged and surfaced as `None` so callers
//! can leave component references unset instead of holding broken
//! resources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::mesh::Mesh;
use crate::texture::Texture2D;

/// Reasons an asset failed to load.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("obj import failed: {0}")]
    Obj(#[from] tobj::LoadError),
}

/// Loads assets relative to a workspace root, caching handles by path.
///
/// The caches are mutex-guarded so one server can be shared by reference
/// between the serializer and editor panels; loads themselves are
/// synchronous and blocking.
pub struct AssetServer {
    root: PathBuf,
    textures: Mutex<HashMap<PathBuf, Arc<Texture2D>>>,
    meshes: Mutex<HashMap<PathBuf, Arc<Mesh>>>,
}

impl AssetServer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: Mutex::new(HashMap::new()),
            meshes: Mutex::new(HashMap::new()),
        }
    }

    /// The workspace root all relative asset paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the texture at `relative`, resolved against the workspace
    /// root.
    ///
    /// Returns `None` (with a warning log) when the file is missing or
    /// does not decode. Repeated loads of one path share a cached handle.
    pub fn load_texture(&self, relative: impl AsRef<Path>) -> Option<Arc<Texture2D>> {
        let path = self.root.join(relative);
        if let Some(texture) = self.textures.lock().get(&path) {
            return Some(texture.clone());
        }
        match Texture2D::load(&path) {
            Ok(texture) => {
                let texture = Arc::new(texture);
                self.textures.lock().insert(path, texture.clone());
                Some(texture)
            }
            Err(err) => {
                log::warn!("could not load texture '{}': {err}", path.display());
                None
            }
        }
    }

    /// Load the OBJ mesh at `relative`, resolved against the workspace
    /// root. Same contract as [`AssetServer::load_texture`].
    pub fn load_mesh(&self, relative: impl AsRef<Path>) -> Option<Arc<Mesh>> {
        let path = self.root.join(relative);
        if let Some(mesh) = self.meshes.lock().get(&path) {
            return Some(mesh.clone());
        }
        match Mesh::load(&path) {
            Ok(mesh) => {
                let mesh = Arc::new(mesh);
                self.meshes.lock().insert(path, mesh.clone());
                Some(mesh)
            }
            Err(err) => {
                log::warn!("could not load mesh '{}': {err}", path.display());
                None
            }
        }
    }

    /// Render `path` relative to the workspace root for storage in a
    /// scene document. Paths outside the root are returned as given.
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}
