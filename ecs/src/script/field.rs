//! Dynamic field model for script-exposed attributes.
//!
//! A scripted behavior exposes named attributes whose types are only known
//! at runtime. [`FieldValue`] is the closed tagged union over the
//! supported value kinds; [`DynamicField`] pairs a value with its
//! attribute name. The kind is derived from the value arm, so an
//! inconsistent kind/value pair is unrepresentable.

use glam::{Vec2, Vec3, Vec4};

/// The closed set of value kinds a dynamic field can hold.
///
/// Discriminants are the scene-document `type` tags and must not be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Int = 0,
    Float = 1,
    String = 2,
    List = 3,
    Dict = 4,
    EntityRef = 5,
    Vector2 = 6,
    Vector3 = 7,
    Vector4 = 8,
    Unserializable = 9,
}

impl FieldKind {
    /// Maps a document `type` tag back to a kind. Unknown tags are
    /// `None`; the codec treats such fields as unserializable.
    pub fn from_tag(tag: i64) -> Option<Self> {
        Some(match tag {
            0 => Self::Int,
            1 => Self::Float,
            2 => Self::String,
            3 => Self::List,
            4 => Self::Dict,
            5 => Self::EntityRef,
            6 => Self::Vector2,
            7 => Self::Vector3,
            8 => Self::Vector4,
            9 => Self::Unserializable,
            _ => return None,
        })
    }

    pub fn tag(self) -> i64 {
        self as i64
    }
}

/// A runtime-typed script attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f32),
    String(String),
    /// Homogeneous list. `element` is the declared element kind; items
    /// that are themselves lists or dicts degrade to
    /// [`FieldValue::Unserializable`] when persisted (one nesting level
    /// only).
    List {
        element: FieldKind,
        items: Vec<FieldValue>,
    },
    /// Recognized but never persisted — encode and decode are both
    /// no-ops for dict fields.
    Dict,
    /// Weak reference to another entity by UUID string. Never validated
    /// at encode or decode time; consumers must tolerate dangling
    /// references.
    EntityRef(String),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Unserializable,
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::String(_) => FieldKind::String,
            Self::List { .. } => FieldKind::List,
            Self::Dict => FieldKind::Dict,
            Self::EntityRef(_) => FieldKind::EntityRef,
            Self::Vector2(_) => FieldKind::Vector2,
            Self::Vector3(_) => FieldKind::Vector3,
            Self::Vector4(_) => FieldKind::Vector4,
            Self::Unserializable => FieldKind::Unserializable,
        }
    }
}

/// A named script attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicField {
    pub name: String,
    pub value: FieldValue,
}

impl DynamicField {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }
}
