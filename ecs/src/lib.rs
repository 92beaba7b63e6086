//! # Calluna ECS
//!
//! Entity-component scene model and JSON scene serialization for the
//! Calluna engine.
//!
//! ## Core Types
//!
//! - [`Registry`] — identity-indexed entity/component store with stable
//!   per-entity UUIDs
//! - [`Scene`] — a named registry, the unit of save/load
//! - [`components`] — the fixed component schema ([`Name`] and
//!   [`Transform`] mandatory, the rest optional)
//! - [`DynamicField`] / [`ScriptHost`] — runtime-typed script attributes
//!   and the context object carrying their class schemas and per-entity
//!   state
//! - [`SceneSerializer`] — the document round-trip, resolving assets
//!   through a [`calluna_core::AssetServer`]
//!
//! The store is single-threaded by contract: serialize/deserialize assume
//! exclusive ownership of the registry for the duration of the call.

mod entity;
mod registry;
mod scene;
mod sparse_set;

pub mod components;
pub mod script;
pub mod serialize;

pub use components::{
    Camera, Light, LightKind, MeshRenderer, Name, Orthographic, Perspective, ProjectionType,
    Script, SpriteRenderer, Transform,
};
pub use entity::Entity;
pub use registry::{Component, Registry};
pub use scene::Scene;
pub use script::{DynamicField, FieldKind, FieldValue, ScriptClass, ScriptHost, ScriptInstance};
pub use serialize::{SceneError, SceneSerializer};
pub use sparse_set::SparseSet;
