use super::*;
use indexmap::map::{self, IndexMap};

/// An object in the graph: an ordered set of named fields, optionally tagged with a class.
///
/// Field order is insertion order. An object without a class is a _plain container_, the kind of
/// object produced by the [plain instantiation policy](crate::Instantiation::Plain) and by the
/// structural codec.
///
/// A field holding [`Value::Absent`] is treated as not being there at all, `get` will not
/// return it and iteration skips it.
///
/// # Example
/// ```rust
/// # use dserd::*;
/// let mut point = Object::new("Point").with("x", 1).with("y", 2);
/// assert_eq!(point.class(), Some("Point"));
/// assert_eq!(point.get("x").and_then(Value::num), Some(1.0));
///
/// point.set("x", Value::Absent);
/// assert_eq!(point.get("x"), None);
/// assert_eq!(point.keys().collect::<Vec<_>>(), vec!["y"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    class: Option<Name>,
    fields: IndexMap<String, Value>,
}

impl Object {
    /// A new, empty, instance of `class`.
    pub fn new<S: Into<Name>>(class: S) -> Self {
        Self {
            class: Some(class.into()),
            fields: IndexMap::new(),
        }
    }

    /// A new, empty, plain container.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Builder style [`set`](Object::set).
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// The class this object is an instance of, `None` for plain containers.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Is this a plain container?
    pub fn is_plain(&self) -> bool {
        self.class.is_none()
    }

    /// Get a field's value. Absent fields return `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_absent())
    }

    /// Get a field's value mutably. Absent fields return `None`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key).filter(|v| !v.is_absent())
    }

    /// Set a field, replacing any previous value in place.
    /// Setting [`Value::Absent`] removes the field.
    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        let key = key.into();
        match value.into() {
            Value::Absent => {
                self.fields.shift_remove(&key);
            }
            value => {
                self.fields.insert(key, value);
            }
        }
    }

    /// Remove a field, returning its value ([`Value::Absent`] if not there).
    pub fn remove(&mut self, key: &str) -> Value {
        self.fields.shift_remove(key).unwrap_or_default()
    }

    /// The slot for a field, usable as a merge destination.
    ///
    /// A missing field is inserted as [`Value::Absent`] at the end of the object.
    pub(crate) fn slot(&mut self, key: &str) -> &mut Value {
        self.fields.entry(key.to_owned()).or_insert(Value::Absent)
    }

    /// Drop a field if its slot was left [`Value::Absent`].
    pub(crate) fn prune(&mut self, key: &str) {
        if self.fields.get(key).map(Value::is_absent).unwrap_or(false) {
            self.fields.shift_remove(key);
        }
    }

    /// Does the object contain a (non-absent) field?
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The number of (non-absent) fields.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// No fields are set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the fields in insertion order.
    pub fn iter(&self) -> Fields<'_> {
        Fields {
            inner: self.fields.iter(),
        }
    }

    /// Iterate over the field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Object::plain();
        for (k, v) in iter {
            obj.set(k, v);
        }
        obj
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Value);
    type IntoIter = Fields<'a>;

    fn into_iter(self) -> Fields<'a> {
        self.iter()
    }
}

/// Iterator over an [`Object`]'s present fields.
pub struct Fields<'a> {
    inner: map::Iter<'a, String, Value>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find(|(_, v)| !v.is_absent())
            .map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut obj = Object::plain().with("a", 1).with("b", 2).with("c", 3);
        obj.set("b", "two");
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(obj.get("b").and_then(Value::str), Some("two"));
    }

    #[test]
    fn absent_slots_are_invisible() {
        let mut obj = Object::plain().with("a", 1);
        assert!(obj.slot("b").is_absent());
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("b"), None);
        obj.prune("b");
        obj.prune("a");
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn remove_missing_is_absent() {
        let mut obj = Object::new("T");
        assert!(obj.remove("nope").is_absent());
        assert!(obj.is_empty());
        assert!(!obj.is_plain());
    }
}
