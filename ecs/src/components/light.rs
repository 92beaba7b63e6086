use glam::Vec3;

/// Kind of light source. Discriminants are the scene-document `type`
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    #[default]
    Directional = 0,
    Point = 1,
    Spot = 2,
}

impl LightKind {
    /// Maps a document discriminant back to a light kind. Unknown values
    /// fall back to directional.
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Self::Point,
            2 => Self::Spot,
            0 => Self::Directional,
            other => {
                log::debug!("unknown light type {other}, using directional");
                Self::Directional
            }
        }
    }

    pub fn index(self) -> i64 {
        self as i64
    }
}

/// Light source attached to an entity.
///
/// `range` applies to point and spot lights, `angle` and `smoothness` to
/// spot lights only; the unused parameters are kept (and persisted) so
/// switching kinds in the editor is lossless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub range: f32,
    /// Spot cone angle, radians.
    pub angle: f32,
    /// Spot edge falloff.
    pub smoothness: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            color: Vec3::ONE,
            range: 10.0,
            angle: std::f32::consts::FRAC_PI_4,
            smoothness: 1.0,
        }
    }
}
