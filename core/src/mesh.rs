//! Mesh geometry imported from OBJ files.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};

use crate::assets::AssetError;

/// One triangulated piece of a mesh, with per-vertex attributes.
///
/// Attribute arrays are indexed together: `positions[i]`, `normals[i]` and
/// `texcoords[i]` describe the same vertex. `normals` and `texcoords` are
/// empty when the source file does not provide them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SubMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Geometry imported from a Wavefront OBJ file, one [`SubMesh`] per object.
#[derive(Clone)]
pub struct Mesh {
    path: PathBuf,
    submeshes: Vec<SubMesh>,
}

impl Mesh {
    /// Import the OBJ file at `path`, triangulating faces and unifying
    /// attribute indices. Materials are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;
        Ok(Self {
            path: path.to_path_buf(),
            submeshes: models.into_iter().map(submesh_from_model).collect(),
        })
    }

    /// The path this mesh was imported from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn submeshes(&self) -> &[SubMesh] {
        &self.submeshes
    }

    pub fn vertex_count(&self) -> usize {
        self.submeshes.iter().map(SubMesh::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(SubMesh::triangle_count).sum()
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("path", &self.path)
            .field("submeshes", &self.submeshes.len())
            .field("vertices", &self.vertex_count())
            .finish_non_exhaustive()
    }
}

fn submesh_from_model(model: tobj::Model) -> SubMesh {
    let mesh = model.mesh;
    SubMesh {
        name: model.name,
        positions: mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect(),
        normals: mesh
            .normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect(),
        texcoords: mesh
            .texcoords
            .chunks_exact(2)
            .map(|t| Vec2::new(t[0], t[1]))
            .collect(),
        indices: mesh.indices,
    }
}
