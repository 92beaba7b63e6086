//! CPU-side texture data.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::assets::AssetError;

/// RGBA8 pixel data decoded from an image file.
///
/// Remembers the path it was loaded from so scene documents can store the
/// reference instead of re-embedding pixel data.
#[derive(Clone)]
pub struct Texture2D {
    path: PathBuf,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture2D {
    /// Decode the image at `path` into RGBA8 pixels.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            pixels: image.into_raw(),
        })
    }

    /// Build a texture from raw RGBA8 pixels.
    ///
    /// `pixels` length must be `width * height * 4`.
    pub fn from_rgba8(path: impl Into<PathBuf>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            path: path.into(),
            width,
            height,
            pixels,
        }
    }

    /// The path this texture was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for Texture2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture2D")
            .field("path", &self.path)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
