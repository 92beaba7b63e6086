//! Value codec: vectors and scalars to and from document tree nodes.
//!
//! Vectors are encoded as objects keyed by axis name (`x`, `y`, `z`,
//! `w`); colors are plain 3/4-vectors on the wire. Decoding never fails:
//! a missing or mistyped axis defaults to 0.0 with a debug log, and the
//! scalar helpers default to the type's zero. Precision is whatever
//! IEEE-754 single-precision carries through JSON.

use glam::{Vec2, Vec3, Vec4};
use serde_json::{json, Value};

// --- vectors ---

pub fn encode_vec2(v: Vec2) -> Value {
    json!({ "x": v.x, "y": v.y })
}

pub fn encode_vec3(v: Vec3) -> Value {
    json!({ "x": v.x, "y": v.y, "z": v.z })
}

pub fn encode_vec4(v: Vec4) -> Value {
    json!({ "x": v.x, "y": v.y, "z": v.z, "w": v.w })
}

pub fn decode_vec2(node: &Value) -> Vec2 {
    Vec2::new(axis(node, "x"), axis(node, "y"))
}

pub fn decode_vec3(node: &Value) -> Vec3 {
    Vec3::new(axis(node, "x"), axis(node, "y"), axis(node, "z"))
}

pub fn decode_vec4(node: &Value) -> Vec4 {
    Vec4::new(
        axis(node, "x"),
        axis(node, "y"),
        axis(node, "z"),
        axis(node, "w"),
    )
}

fn axis(node: &Value, key: &str) -> f32 {
    match node.get(key).and_then(Value::as_f64) {
        Some(value) => value as f32,
        None => {
            log::debug!("vector node missing axis '{key}', defaulting to 0.0");
            0.0
        }
    }
}

// --- scalars ---

pub fn get_f32(node: &Value, key: &str) -> f32 {
    node.get(key).and_then(Value::as_f64).unwrap_or(0.0) as f32
}

pub fn get_i64(node: &Value, key: &str) -> i64 {
    node.get(key).and_then(Value::as_i64).unwrap_or(0)
}

pub fn get_i32(node: &Value, key: &str) -> i32 {
    get_i64(node, key) as i32
}

pub fn get_string(node: &Value, key: &str) -> String {
    node.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn vec3_round_trip_exact() {
        let node = json!({ "x": 1.5, "y": -2.25, "z": 0.0 });
        let v = decode_vec3(&node);
        assert!(close(v.x, 1.5) && close(v.y, -2.25) && close(v.z, 0.0));

        let re = encode_vec3(v);
        let obj = re.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(close(decode_vec3(&re).x, 1.5));
        assert_eq!(re, node);
    }

    #[test]
    fn missing_axis_defaults_to_zero() {
        let node = json!({ "x": 4.0 });
        assert_eq!(decode_vec3(&node), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(decode_vec4(&json!({})), Vec4::ZERO);
    }

    #[test]
    fn mistyped_axis_defaults_to_zero() {
        let node = json!({ "x": "oops", "y": 2.0 });
        assert_eq!(decode_vec2(&node), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn vec2_and_vec4_round_trip() {
        let v2 = Vec2::new(0.25, -8.0);
        assert_eq!(decode_vec2(&encode_vec2(v2)), v2);
        let v4 = Vec4::new(0.1, 0.2, 0.3, 1.0);
        let back = decode_vec4(&encode_vec4(v4));
        assert!((back - v4).length() < 1e-6);
    }

    #[test]
    fn scalar_helpers_default_silently() {
        let node = json!({ "count": 7, "label": "hi", "ratio": 0.5 });
        assert_eq!(get_i64(&node, "count"), 7);
        assert_eq!(get_i64(&node, "missing"), 0);
        assert_eq!(get_string(&node, "label"), "hi");
        assert_eq!(get_string(&node, "count"), "");
        assert!(close(get_f32(&node, "ratio"), 0.5));
        assert_eq!(get_f32(&node, "missing"), 0.0);
        assert_eq!(get_i32(&node, "count"), 7);
    }
}
