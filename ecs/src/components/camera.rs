use std::f32::consts::FRAC_PI_3;

/// Which projection a [`Camera`] uses.
///
/// The discriminants are the scene-document `type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionType {
    #[default]
    Perspective = 0,
    Orthographic = 1,
}

impl ProjectionType {
    /// Maps a document discriminant back to a projection type. Unknown
    /// values fall back to perspective.
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Self::Orthographic,
            0 => Self::Perspective,
            other => {
                log::debug!("unknown camera projection type {other}, using perspective");
                Self::Perspective
            }
        }
    }

    pub fn index(self) -> i64 {
        self as i64
    }
}

/// Perspective projection parameters. `fov` is vertical, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov: FRAC_PI_3,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Orthographic projection parameters. `size` is the half-height of the
/// view volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    pub size: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Orthographic {
    fn default() -> Self {
        Self {
            size: 10.0,
            near: -1.0,
            far: 1.0,
        }
    }
}

/// Scene camera. Both parameter sets are kept so switching projection in
/// the editor does not lose the other set's values; both are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub projection: ProjectionType,
    pub perspective: Perspective,
    pub orthographic: Orthographic,
}
