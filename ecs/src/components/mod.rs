//! The engine's fixed component schema.
//!
//! [`Name`] and [`Transform`] are mandatory — every entity carries exactly
//! one of each from creation. The rest are optional records attached and
//! removed through the [`Registry`](crate::Registry).

mod camera;
mod light;
mod mesh_renderer;
mod name;
mod script;
mod sprite_renderer;
mod transform;

pub use camera::{Camera, Orthographic, Perspective, ProjectionType};
pub use light::{Light, LightKind};
pub use mesh_renderer::MeshRenderer;
pub use name::Name;
pub use script::Script;
pub use sprite_renderer::SpriteRenderer;
pub use transform::Transform;

use crate::registry::Component;

impl Component for Camera {}
impl Component for Light {}
impl Component for MeshRenderer {}
impl Component for Name {}
impl Component for Script {}
impl Component for SpriteRenderer {}
impl Component for Transform {}
