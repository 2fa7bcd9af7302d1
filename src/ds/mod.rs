//! The data structures on both sides of the codec.
//!
//! The object graph side is [`Value`] (with [`Object`] and [`Pattern`]), the data side is
//! [`Json`]. [`Type`] names what a value is converted _as_.
use chrono::{DateTime, Utc};

mod obj;
mod pattern;
mod ty;
mod val;

pub use obj::{Fields, Object};
pub use pattern::Pattern;
pub use ty::{Name, Primitive, Type};
pub use val::Value;

/// A JSON value: the data side of the codec.
///
/// Object keys keep their insertion order.
pub type Json = serde_json::Value;

/// A JSON object.
pub type JsonMap = serde_json::Map<String, Json>;

/// Convert a number to JSON the way a dynamic runtime writes it.
///
/// Whole numbers become integers, non-finite numbers become `null`.
///
/// # Example
/// ```rust
/// # use dserd::*;
/// use serde_json::json;
///
/// assert_eq!(num_to_json(3.0), json!(3));
/// assert_eq!(num_to_json(-0.25), json!(-0.25));
/// assert_eq!(num_to_json(f64::NAN), Json::Null);
/// ```
pub fn num_to_json(n: f64) -> Json {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Json::from(n as i64)
    } else {
        Json::from(n)
    }
}

/// A short name of the JSON variant, used in error messages.
pub(crate) fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
