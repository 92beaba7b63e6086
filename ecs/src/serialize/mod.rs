//! Scene serialization: the JSON document round-trip.
//!
//! Layered leaf-first: [`value`] converts vectors and scalars to tree
//! nodes, [`field`] handles the dynamic script attribute tagged union,
//! and [`SceneSerializer`] walks whole scenes.

mod error;
mod field;
mod scene;
mod value;

pub use error::SceneError;
pub use field::{decode_field, encode_field};
pub use scene::SceneSerializer;
pub use value::{
    decode_vec2, decode_vec3, decode_vec4, encode_vec2, encode_vec3, encode_vec4, get_f32,
    get_i32, get_i64, get_string,
};
