//! # Calluna Core
//!
//! CPU-side resource types and asset resolution for the Calluna engine.
//!
//! ## Core Types
//!
//! - [`Texture2D`] — RGBA8 pixel data decoded from an image file
//! - [`Mesh`] / [`SubMesh`] — triangulated geometry imported from OBJ
//! - [`AssetServer`] — workspace-rooted asset loading and path rendering
//! - [`AssetError`] — decode/import failure reasons
//!
//! Uploading any of this to a GPU backend is a renderer concern and lives
//! outside this workspace.

mod assets;
mod mesh;
mod texture;

pub use assets::{AssetError, AssetServer};
pub use mesh::{Mesh, SubMesh};
pub use texture::Texture2D;
