//! The [`Codec`]: encode object graphs to JSON and decode JSON back into object graphs.
//!
//! A `Codec` pairs a [`Registry`] with a [`Config`]. Conversion only reads both, so a configured
//! codec can be shared between threads.
//!
//! # Encoding
//! For a class, each registered field with an encode key is read from the instance. Absent
//! fields are skipped, present ones are converted by their descriptor's [`EncodeOp`] and written
//! under the (optionally cased) key, in registration order.
//!
//! # Decoding
//! Decoding _merges_. Fields not mentioned in the data are left alone on the target, and nested
//! objects, arrays, maps and dates are decoded into the target's current values. This makes a
//! codec usable for patching long-lived state with partial updates.
//!
//! ```rust
//! # use dserd::*;
//! use serde_json::json;
//!
//! let mut registry = Registry::default();
//! registry.register("Point", "x").auto_as(Primitive::Number);
//! registry.register("Point", "y").auto_as(Primitive::Number);
//! registry.register("Path", "name").auto_as(Primitive::Text);
//! registry.register("Path", "points").auto_as_array("Point");
//! let codec = Codec::new(registry);
//!
//! let mut path = codec
//!     .decode(&json!({ "name": "p", "points": [{ "x": 1, "y": 2 }] }), "Path")
//!     .unwrap();
//!
//! // a partial update only touches `y` of the first point
//! codec.decode_into(&json!({ "points": [{ "y": 5 }] }), "Path", &mut path, None).unwrap();
//!
//! assert_eq!(
//!     codec.encode(&path, "Path").unwrap(),
//!     json!({ "name": "p", "points": [{ "x": 1, "y": 5 }] })
//! );
//! ```
use crate::*;
use crate::ds::json_kind;

mod decoder;
mod encoder;
mod instantiate;
mod prim;
mod structural;

use self::decoder::Decoder;
use self::encoder::Encoder;
use self::instantiate::instantiate;

pub use self::prim::{decode as decode_primitive, encode as encode_primitive};

/// The conversion engine.
#[derive(Clone, Debug, Default)]
pub struct Codec {
    registry: Registry,
    config: Config,
}

impl Codec {
    /// A codec over a registry, with the default configuration.
    pub fn new(registry: Registry) -> Self {
        Self::with_config(registry, Config::default())
    }

    /// A codec over a registry and configuration.
    pub fn with_config(registry: Registry, config: Config) -> Self {
        Self { registry, config }
    }

    /// The registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The registry, for further setup.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The configuration, for further setup.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    fn encoder(&self) -> Encoder<'_> {
        Encoder {
            registry: &self.registry,
            config: &self.config,
        }
    }

    fn decoder(&self, policy: Option<Instantiation>) -> Decoder<'_> {
        Decoder {
            registry: &self.registry,
            config: &self.config,
            policy: policy.unwrap_or_else(|| self.config.default_instantiation()),
        }
    }

    // ********************* ENCODE ********************************************

    /// Encode an instance as a type.
    ///
    /// A nil instance encodes as `null`. A primitive type encodes to a JSON scalar, a class
    /// without descriptors to an empty object.
    pub fn encode<T: Into<Type>>(&self, instance: &Value, ty: T) -> Result<Json> {
        self.encoder().encode(instance, &ty.into())
    }

    /// Encode each element of a list as a type.
    pub fn encode_array<T: Into<Type>>(&self, source: &[Value], ty: T) -> Result<Vec<Json>> {
        let ty = ty.into();
        let encoder = self.encoder();
        source.iter().map(|v| encoder.encode(v, &ty)).collect()
    }

    /// Encode each value of an object as a type, casing the keys with the encode key transform.
    pub fn encode_map<T: Into<Type>>(&self, source: &Object, ty: T) -> Result<JsonMap> {
        let ty = ty.into();
        let encoder = self.encoder();
        let mut out = JsonMap::new();
        for (k, v) in source {
            out.insert(self.config.encode_key(k), encoder.encode(v, &ty)?);
        }
        Ok(out)
    }

    /// Encode any value structurally, ignoring the registry.
    ///
    /// # Example
    /// ```rust
    /// # use dserd::*;
    /// use serde_json::json;
    ///
    /// let codec = Codec::with_config(
    ///     Registry::default(),
    ///     Config::default().encode_keys(transform::kebab_case),
    /// );
    /// let v = Value::from(Object::plain().with("someKey", vec![1, 2]));
    /// assert_eq!(codec.encode_json(&v, true), json!({ "some-key": [1, 2] }));
    /// assert_eq!(codec.encode_json(&v, false), json!({ "someKey": [1, 2] }));
    /// ```
    pub fn encode_json(&self, value: &Value, transform_keys: bool) -> Json {
        structural::encode(value, &self.config, transform_keys)
    }

    // ********************* DECODE ********************************************

    /// Decode data as a type into a fresh value, with the default instantiation policy.
    ///
    /// `null` data decodes to [`Value::Null`]. A declared class without descriptors decodes to a
    /// bare instance, an unknown one to [`Value::Null`].
    pub fn decode<T: Into<Type>>(&self, data: &Json, ty: T) -> Result<Value> {
        let mut target = Value::Absent;
        self.decoder(None).decode(data, &ty.into(), &mut target)?;
        Ok(target)
    }

    /// Decode data as a type, merging into an existing target.
    ///
    /// An existing object target is reused whatever the policy, except for a declared class
    /// without descriptors, which is always built fresh. `policy` falls back to the configured
    /// default. A post-decode hook may replace the target entirely.
    ///
    /// On error the target may be partially updated.
    pub fn decode_into<T: Into<Type>>(
        &self,
        data: &Json,
        ty: T,
        target: &mut Value,
        policy: Option<Instantiation>,
    ) -> Result<()> {
        self.decoder(policy).decode(data, &ty.into(), target)
    }

    /// Decode an array of data, element by element, merging into a list target.
    pub fn decode_array<T: Into<Type>>(
        &self,
        data: &Json,
        ty: T,
        target: &mut Value,
        policy: Option<Instantiation>,
    ) -> Result<()> {
        self.decoder(policy).decode_array(data, &ty.into(), target)
    }

    /// Decode an object of data, value by value, merging into an object target.
    /// Keys are cased with the decode key transform.
    pub fn decode_map<T: Into<Type>>(
        &self,
        data: &Json,
        ty: T,
        target: &mut Value,
        policy: Option<Instantiation>,
    ) -> Result<()> {
        self.decoder(policy).decode_map(data, &ty.into(), target, true)
    }

    /// [`decode`](Codec::decode) producing plain containers instead of class instances.
    pub fn decode_raw<T: Into<Type>>(&self, data: &Json, ty: T) -> Result<Value> {
        let mut target = Value::Absent;
        self.decode_into(data, ty, &mut target, Some(Instantiation::Plain))?;
        Ok(target)
    }

    /// [`decode_array`](Codec::decode_array) producing plain containers.
    pub fn decode_array_raw<T: Into<Type>>(&self, data: &Json, ty: T) -> Result<Value> {
        let mut target = Value::Absent;
        self.decode_array(data, ty, &mut target, Some(Instantiation::Plain))?;
        Ok(target)
    }

    /// [`decode_map`](Codec::decode_map) producing plain containers.
    pub fn decode_map_raw<T: Into<Type>>(&self, data: &Json, ty: T) -> Result<Value> {
        let mut target = Value::Absent;
        self.decode_map(data, ty, &mut target, Some(Instantiation::Plain))?;
        Ok(target)
    }

    /// Decode any data structurally, ignoring the registry, merging into `target`.
    ///
    /// # Example
    /// ```rust
    /// # use dserd::*;
    /// use serde_json::json;
    ///
    /// let codec = Codec::with_config(
    ///     Registry::default(),
    ///     Config::default().decode_keys(transform::snake_case),
    /// );
    /// let mut v = Value::Absent;
    /// codec.decode_json(&json!({ "someKey": { "innerKey": null } }), true, &mut v);
    /// assert_eq!(
    ///     v.get("some_key").and_then(|o| o.get("inner_key")),
    ///     Some(&Value::Null)
    /// );
    /// ```
    pub fn decode_json(&self, data: &Json, transform_keys: bool, target: &mut Value) {
        structural::decode(data, &self.config, transform_keys, target)
    }
}
