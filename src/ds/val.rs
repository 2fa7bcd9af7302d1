use super::*;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// A value in the in-memory object graph.
///
/// `Value` is the _typed_ side of the codec: what [`Codec::encode`] reads from and
/// [`Codec::decode`] writes into. Compared to [`Json`] it distinguishes an unset slot
/// ([`Absent`](Value::Absent)) from an explicit `null`, and carries the richer scalar kinds dates
/// and patterns.
///
/// # Examples
/// `From` is implemented for the common Rust scalars.
/// ```rust
/// # use dserd::*;
/// assert_eq!(Value::from(3), Value::Num(3.0));
/// assert_eq!(Value::from("hi").str(), Some("hi"));
/// assert_eq!(Value::from(Some(true)), Value::Bool(true));
/// assert_eq!(Value::from(None::<bool>), Value::Null);
/// ```
///
/// The canonical text form is used when a value is encoded as [`Primitive::Text`].
/// ```rust
/// # use dserd::*;
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2020, 2, 29, 12, 30, 0).unwrap();
/// assert_eq!(Value::from(date).to_string(), "2020-02-29T12:30:00.000Z");
/// assert_eq!(Value::from(1.5).to_string(), "1.5");
/// assert_eq!(Value::from(vec![1, 2]).to_string(), "1,2");
/// ```
///
/// [`Codec::encode`]: crate::Codec::encode
/// [`Codec::decode`]: crate::Codec::decode
/// [`Json`]: crate::Json
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Nothing is there. Distinct from [`Null`](Value::Null).
    #[default]
    Absent,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Num(f64),
    /// A string.
    Str(String),
    /// A UTC timestamp.
    Date(DateTime<Utc>),
    /// A regular expression.
    Pattern(Pattern),
    /// An ordered list of values.
    List(Vec<Value>),
    /// An object, typed or plain.
    Obj(Object),
}

impl Value {
    /// Is the value [`Absent`](Value::Absent)?
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Is the value [`Absent`](Value::Absent) or [`Null`](Value::Null)?
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Absent | Value::Null)
    }

    /// The boolean, if a boolean value.
    pub fn bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if a numeric value.
    pub fn num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if a string value.
    pub fn str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The timestamp, if a date value.
    pub fn date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// The pattern, if a pattern value.
    pub fn pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    /// The list, if a list value.
    pub fn list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// The list mutably, if a list value.
    pub fn list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// The object, if an object value.
    pub fn obj(&self) -> Option<&Object> {
        match self {
            Value::Obj(o) => Some(o),
            _ => None,
        }
    }

    /// The object mutably, if an object value.
    pub fn obj_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Obj(o) => Some(o),
            _ => None,
        }
    }

    /// Shorthand to read a field of an object value.
    /// Non-objects have no fields.
    ///
    /// # Example
    /// ```rust
    /// # use dserd::*;
    /// let v = Value::from(Object::plain().with("a", 1));
    /// assert_eq!(v.get("a"), Some(&Value::Num(1.0)));
    /// assert_eq!(v.get("b"), None);
    /// assert_eq!(Value::from(1).get("a"), None);
    /// ```
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.obj().and_then(|o| o.get(field))
    }

    /// Truthiness, as a dynamic language would judge it.
    ///
    /// Nil values, `false`, zero, NaN and the empty string are falsy. Everything else is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Absent | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Date(_) | Value::Pattern(_) | Value::List(_) | Value::Obj(_) => true,
        }
    }

    /// A short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::Pattern(_) => "pattern",
            Value::List(_) => "list",
            Value::Obj(_) => "object",
        }
    }
}

/// Formats a timestamp the way it is written to JSON.
pub(crate) fn fmt_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// The canonical text form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) if n.is_nan() => f.write_str("NaN"),
            Value::Num(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::Date(d) => f.write_str(&fmt_date(d)),
            Value::Pattern(p) => write!(f, "{}", p),
            Value::List(l) => {
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !v.is_nil() {
                        write!(f, "{}", v)?;
                    }
                }
                Ok(())
            }
            Value::Obj(o) => match serde_json::to_string(o) {
                Ok(s) => f.write_str(&s),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

// ********************* CONVERSIONS ******************************************

macro_rules! number {
    ( $( $x:ty ) * ) => {
        $(
            impl From<$x> for Value {
                fn from(x: $x) -> Self {
                    Value::Num(x as f64)
                }
            }
        )*
    }
}

number!(
    usize u8 u16 u32 u64
    isize i8 i16 i32 i64
    f32 f64
);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Pattern(p)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Obj(o)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// ********************* SERDE ************************************************

/// Values serialize structurally: dates and patterns as their text form, objects as maps
/// without any class information.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Num(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::Str(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.serialize_str(&fmt_date(d)),
            Value::Pattern(p) => serializer.collect_str(p),
            Value::List(l) => {
                let mut seq = serializer.serialize_seq(Some(l.len()))?;
                for v in l {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Obj(o) => o.serialize(serializer),
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
