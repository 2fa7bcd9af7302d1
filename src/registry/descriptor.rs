use super::*;
use std::fmt;

/// A user conversion from a field's value to JSON.
pub type EncodeFn = Arc<dyn Fn(&Value) -> Result<Json> + Send + Sync>;

/// A user conversion from JSON to a field's value.
///
/// Receives the source data, the field's current value (the merge destination,
/// [`Value::Absent`] if unset), and the active instantiation policy.
pub type DecodeFn = Arc<dyn Fn(&Json, Value, Instantiation) -> Result<Value> + Send + Sync>;

/// How a field is encoded.
#[derive(Clone)]
pub enum EncodeOp {
    /// As a primitive scalar.
    Primitive(Primitive),
    /// As a nested object of a class.
    Object(Name),
    /// As an array, each element converted as the type.
    Array(Type),
    /// As a string keyed map, each value converted as the type.
    Map(Type),
    /// Structurally, ignoring descriptors.
    Structural,
    /// Through a user function.
    Using(EncodeFn),
}

/// How a field is decoded.
#[derive(Clone)]
pub enum DecodeOp {
    /// As a primitive scalar.
    Primitive(Primitive),
    /// As a nested object of a class.
    Object(Name),
    /// As an array, each element converted as the type.
    Array(Type),
    /// As a string keyed map, each value converted as the type.
    Map(Type),
    /// Structurally, ignoring descriptors.
    Structural,
    /// Through a user function.
    Using(DecodeFn),
}

impl EncodeOp {
    fn of(ty: Type) -> Self {
        match ty {
            Type::Primitive(p) => EncodeOp::Primitive(p),
            Type::Class(name) => EncodeOp::Object(name),
        }
    }
}

impl DecodeOp {
    fn of(ty: Type) -> Self {
        match ty {
            Type::Primitive(p) => DecodeOp::Primitive(p),
            Type::Class(name) => DecodeOp::Object(name),
        }
    }
}

macro_rules! op_debug {
    ($t:ident) => {
        impl fmt::Debug for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match self {
                    $t::Primitive(p) => write!(f, "Primitive({})", p),
                    $t::Object(n) => write!(f, "Object({})", n),
                    $t::Array(t) => write!(f, "Array({})", t),
                    $t::Map(t) => write!(f, "Map({})", t),
                    $t::Structural => f.write_str("Structural"),
                    $t::Using(_) => f.write_str("Using(..)"),
                }
            }
        }
    };
}

op_debug!(EncodeOp);
op_debug!(DecodeOp);

/// A pair of user conversions, for [`FieldDescriptor::auto_using`].
///
/// # Example
/// ```rust
/// # use dserd::*;
/// use serde_json::json;
///
/// // stores a number as a string of hex digits
/// struct Hex;
///
/// impl FieldCodec for Hex {
///     fn encode(&self, value: &Value) -> Result<Json> {
///         Ok(value.num().map(|n| json!(format!("{:x}", n as u64))).unwrap_or(Json::Null))
///     }
///
///     fn decode(&self, data: &Json, _: Value, _: Instantiation) -> Result<Value> {
///         let s = data.as_str().ok_or_else(|| Error::custom("expected hex string"))?;
///         u64::from_str_radix(s, 16).map(Value::from).map_err(Error::custom)
///     }
/// }
///
/// let mut registry = Registry::default();
/// registry.register("Colour", "rgb").auto_using(Hex);
/// let codec = Codec::new(registry);
///
/// let colour = Value::from(Object::new("Colour").with("rgb", 0xff8800));
/// let json = codec.encode(&colour, "Colour").unwrap();
/// assert_eq!(json, json!({ "rgb": "ff8800" }));
/// assert_eq!(codec.decode(&json, "Colour").unwrap(), colour);
/// ```
pub trait FieldCodec: Send + Sync {
    /// Encode a field's value.
    fn encode(&self, value: &Value) -> Result<Json>;

    /// Decode into a field, given its current value.
    fn decode(&self, data: &Json, current: Value, policy: Instantiation) -> Result<Value>;
}

/// How one field of a class is converted.
///
/// Obtained through [`Registry::register`] and filled in with the builder methods. Setting an
/// operation for a direction also sets that direction's external key to the field name, unless a
/// key was already given. A direction without a key is excluded.
///
/// # Example
/// ```rust
/// # use dserd::*;
/// let mut registry = Registry::default();
/// registry
///     .register("User", "createdAt")
///     .auto_as(Primitive::Date)
///     .key("created");
/// registry.register("User", "password").decode_as(Primitive::Text);
///
/// let fields = registry.lookup("User").unwrap();
/// assert_eq!(fields[0].encode_key(), Some("created"));
/// assert_eq!(fields[0].decode_key(), Some("created"));
/// assert_eq!(fields[1].encode_key(), None); // never written out
/// assert_eq!(fields[1].decode_key(), Some("password"));
/// ```
#[derive(Clone)]
pub struct FieldDescriptor {
    field: String,
    encode_key: Option<String>,
    decode_key: Option<String>,
    encode_op: Option<EncodeOp>,
    decode_op: Option<DecodeOp>,
    key_casing: bool,
}

impl FieldDescriptor {
    pub(crate) fn new(field: String) -> Self {
        Self {
            field,
            encode_key: None,
            decode_key: None,
            encode_op: None,
            decode_op: None,
            key_casing: true,
        }
    }

    /// The in-memory field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The key written on encode, `None` if excluded from encoding.
    pub fn encode_key(&self) -> Option<&str> {
        self.encode_key.as_deref()
    }

    /// The key read on decode, `None` if excluded from decoding.
    pub fn decode_key(&self) -> Option<&str> {
        self.decode_key.as_deref()
    }

    /// How the field encodes.
    pub fn encode_op(&self) -> Option<&EncodeOp> {
        self.encode_op.as_ref()
    }

    /// How the field decodes.
    pub fn decode_op(&self) -> Option<&DecodeOp> {
        self.decode_op.as_ref()
    }

    /// Whether the configured key transforms apply to this field's keys.
    pub fn key_casing(&self) -> bool {
        self.key_casing
    }

    // ********************* ENCODE ********************************************

    fn set_encode(&mut self, op: EncodeOp) -> &mut Self {
        if self.encode_key.is_none() {
            self.encode_key = Some(self.field.clone());
        }
        self.encode_op = Some(op);
        self
    }

    /// Encode as a primitive, or as a nested object of a class.
    pub fn encode_as<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        self.set_encode(EncodeOp::of(ty.into()))
    }

    /// Encode as an array of the type.
    pub fn encode_as_array<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        self.set_encode(EncodeOp::Array(ty.into()))
    }

    /// Encode as a map of the type.
    pub fn encode_as_map<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        self.set_encode(EncodeOp::Map(ty.into()))
    }

    /// Encode structurally. `key_casing` applies to the field key _and_ every nested key.
    pub fn encode_as_json(&mut self, key_casing: bool) -> &mut Self {
        self.key_casing = key_casing;
        self.set_encode(EncodeOp::Structural)
    }

    /// Encode through a function.
    pub fn encode_using<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<Json> + Send + Sync + 'static,
    {
        self.set_encode(EncodeOp::Using(Arc::new(f)))
    }

    // ********************* DECODE ********************************************

    fn set_decode(&mut self, op: DecodeOp) -> &mut Self {
        if self.decode_key.is_none() {
            self.decode_key = Some(self.field.clone());
        }
        self.decode_op = Some(op);
        self
    }

    /// Decode as a primitive, or as a nested object of a class.
    pub fn decode_as<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        self.set_decode(DecodeOp::of(ty.into()))
    }

    /// Decode as an array of the type.
    pub fn decode_as_array<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        self.set_decode(DecodeOp::Array(ty.into()))
    }

    /// Decode as a map of the type.
    pub fn decode_as_map<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        self.set_decode(DecodeOp::Map(ty.into()))
    }

    /// Decode structurally. `key_casing` applies to the field key _and_ every nested key.
    pub fn decode_as_json(&mut self, key_casing: bool) -> &mut Self {
        self.key_casing = key_casing;
        self.set_decode(DecodeOp::Structural)
    }

    /// Decode through a function.
    pub fn decode_using<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Json, Value, Instantiation) -> Result<Value> + Send + Sync + 'static,
    {
        self.set_decode(DecodeOp::Using(Arc::new(f)))
    }

    // ********************* BOTH **********************************************

    /// [`encode_as`](Self::encode_as) and [`decode_as`](Self::decode_as).
    pub fn auto_as<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        let ty = ty.into();
        self.encode_as(ty.clone()).decode_as(ty)
    }

    /// [`encode_as_array`](Self::encode_as_array) and [`decode_as_array`](Self::decode_as_array).
    pub fn auto_as_array<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        let ty = ty.into();
        self.encode_as_array(ty.clone()).decode_as_array(ty)
    }

    /// [`encode_as_map`](Self::encode_as_map) and [`decode_as_map`](Self::decode_as_map).
    pub fn auto_as_map<T: Into<Type>>(&mut self, ty: T) -> &mut Self {
        let ty = ty.into();
        self.encode_as_map(ty.clone()).decode_as_map(ty)
    }

    /// [`encode_as_json`](Self::encode_as_json) and [`decode_as_json`](Self::decode_as_json).
    pub fn auto_as_json(&mut self, key_casing: bool) -> &mut Self {
        self.encode_as_json(key_casing).decode_as_json(key_casing)
    }

    /// Convert both directions with a [`FieldCodec`].
    pub fn auto_using<C: FieldCodec + 'static>(&mut self, codec: C) -> &mut Self {
        let codec = Arc::new(codec);
        let de = Arc::clone(&codec);
        self.set_encode(EncodeOp::Using(Arc::new(move |v| codec.encode(v))));
        self.set_decode(DecodeOp::Using(Arc::new(move |d, c, p| de.decode(d, c, p))))
    }

    // ********************* KEYS **********************************************

    /// Use `key` as the external name in both directions.
    pub fn key<S: Into<String>>(&mut self, key: S) -> &mut Self {
        let key = key.into();
        self.encode_key = Some(key.clone());
        self.decode_key = Some(key);
        self
    }

    /// Set the encode key. `None` excludes the field from encoding.
    pub fn encode_key_as(&mut self, key: Option<String>) -> &mut Self {
        self.encode_key = key;
        self
    }

    /// Set the decode key. `None` excludes the field from decoding.
    pub fn decode_key_as(&mut self, key: Option<String>) -> &mut Self {
        self.decode_key = key;
        self
    }

    /// Toggle whether the key transforms apply to this field.
    pub fn key_casing_as(&mut self, apply: bool) -> &mut Self {
        self.key_casing = apply;
        self
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("field", &self.field)
            .field("encode_key", &self.encode_key)
            .field("decode_key", &self.decode_key)
            .field("encode_op", &self.encode_op)
            .field("decode_op", &self.decode_op)
            .field("key_casing", &self.key_casing)
            .finish()
    }
}
