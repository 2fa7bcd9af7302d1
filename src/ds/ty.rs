use std::borrow::Cow;
use std::fmt;

/// The name of a class registered with the [`Registry`](crate::Registry).
pub type Name = Cow<'static, str>;

/// The scalar kinds the primitive codec understands.
///
/// Primitive kinds need no descriptors. A field encoded or decoded _as_ a primitive is converted
/// directly between its [`Value`] and a JSON scalar.
///
/// [`Value`]: crate::Value
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// A string.
    Text,
    /// A (64 bit floating point) number.
    Number,
    /// A boolean.
    Boolean,
    /// A UTC timestamp, encoded as an ISO-8601 string.
    Date,
    /// A regular expression, encoded as `/body/flags`.
    Pattern,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Primitive::Text => "Text",
            Primitive::Number => "Number",
            Primitive::Boolean => "Boolean",
            Primitive::Date => "Date",
            Primitive::Pattern => "Pattern",
        };
        f.write_str(s)
    }
}

/// The type a value is converted as.
///
/// Either a [`Primitive`] kind or a named class whose field descriptors live in the
/// [`Registry`](crate::Registry). `From` conversions make call sites terse:
///
/// ```rust
/// # use dserd::*;
/// assert_eq!(Type::from("Point"), Type::class("Point"));
/// assert_eq!(Type::from(Primitive::Date), Type::Primitive(Primitive::Date));
/// assert!(Type::from(Primitive::Date).is_primitive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A scalar kind.
    Primitive(Primitive),
    /// A class, referenced by name.
    Class(Name),
}

impl Type {
    /// A class type.
    pub fn class<S: Into<Name>>(name: S) -> Self {
        Type::Class(name.into())
    }

    /// Is this a primitive kind?
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// The primitive kind, if this is one.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Type::Primitive(p) => Some(*p),
            Type::Class(_) => None,
        }
    }

    /// The class name, if this is a class.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Type::Primitive(_) => None,
            Type::Class(name) => Some(name),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Primitive(p) => write!(f, "{}", p),
            Type::Class(name) => f.write_str(name),
        }
    }
}

impl From<Primitive> for Type {
    fn from(p: Primitive) -> Self {
        Type::Primitive(p)
    }
}

impl From<&'static str> for Type {
    fn from(name: &'static str) -> Self {
        Type::Class(Cow::Borrowed(name))
    }
}

impl From<String> for Type {
    fn from(name: String) -> Self {
        Type::Class(Cow::Owned(name))
    }
}

impl From<&Type> for Type {
    fn from(ty: &Type) -> Self {
        ty.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name() {
        assert_eq!(Type::from("Point").class_name(), Some("Point"));
        assert_eq!(Type::from(String::from("Owned")).class_name(), Some("Owned"));
        assert_eq!(Type::from(Primitive::Text).class_name(), None);
        assert_eq!(Type::from(Primitive::Text).primitive(), Some(Primitive::Text));
        assert_eq!(Type::class("Point").to_string(), "Point");
    }
}
