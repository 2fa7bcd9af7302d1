//! The metadata registry: per-class field descriptors, constructors, and hooks.
//!
//! The registry is written during setup and only read during conversion. A [`Codec`] owns one,
//! so differently configured registries can be used side by side.
//!
//! # Example
//! ```rust
//! # use dserd::*;
//! let mut registry = Registry::default();
//! registry.register("Shape", "name").auto_as(Primitive::Text);
//! registry.register("Circle", "radius").auto_as(Primitive::Number);
//! registry.compose_inheritance("Shape", "Circle");
//!
//! let names: Vec<_> = registry
//!     .lookup("Circle")
//!     .unwrap()
//!     .iter()
//!     .map(|d| d.field())
//!     .collect();
//! assert_eq!(names, vec!["name", "radius"]);
//!
//! // a declared class without descriptors is distinct from an unknown one
//! registry.declare("Marker");
//! assert!(registry.lookup("Marker").is_none());
//! assert!(registry.is_declared("Marker"));
//! assert!(!registry.is_declared("Unknown"));
//! ```
//!
//! [`Codec`]: crate::Codec
use crate::{Instantiation, Json, JsonMap, Name, Object, Primitive, Result, Type, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

mod descriptor;

pub use descriptor::{DecodeFn, DecodeOp, EncodeFn, EncodeOp, FieldCodec, FieldDescriptor};

/// Builds a fresh instance of a class, running whatever side effects its construction has.
pub type Constructor = Arc<dyn Fn() -> Object + Send + Sync>;

/// Runs after a class instance is encoded, with the output so far and the instance.
/// Returning `Some` replaces the output.
pub type EncodeHook = Arc<dyn Fn(&mut JsonMap, &Value) -> Option<Json> + Send + Sync>;

/// Runs after data is decoded into a class instance, with the source data, the target, and the
/// policy. Returning `Some` replaces the target.
pub type DecodeHook = Arc<dyn Fn(&Json, &mut Value, Instantiation) -> Option<Value> + Send + Sync>;

#[derive(Clone, Default)]
struct Class {
    fields: Option<Vec<FieldDescriptor>>,
    constructor: Option<Constructor>,
    on_encoded: Option<EncodeHook>,
    on_decoded: Option<DecodeHook>,
}

/// The store of class metadata.
#[derive(Clone, Default)]
pub struct Registry {
    classes: HashMap<Name, Class>,
}

impl Registry {
    fn class_mut<S: Into<Name>>(&mut self, class: S) -> &mut Class {
        self.classes.entry(class.into()).or_default()
    }

    /// Make a class known without registering any fields.
    ///
    /// Decoding to an undeclared class that has no descriptors yields `null`.
    pub fn declare<S: Into<Name>>(&mut self, class: S) {
        self.class_mut(class);
    }

    /// Is the class known to the registry?
    pub fn is_declared(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// The descriptor for a class's field, created blank if it does not exist yet.
    ///
    /// Registration order is the order fields are converted in.
    pub fn register<S, F>(&mut self, class: S, field: F) -> &mut FieldDescriptor
    where
        S: Into<Name>,
        F: Into<String>,
    {
        let field = field.into();
        let fields = self.class_mut(class).fields.get_or_insert_with(Vec::new);

        match fields.iter().position(|d| d.field() == field) {
            Some(idx) => &mut fields[idx],
            None => {
                fields.push(FieldDescriptor::new(field));
                let last = fields.len() - 1;
                &mut fields[last]
            }
        }
    }

    /// The ordered descriptors of a class.
    ///
    /// `None` when the class has never had a field registered, which is different to an empty
    /// list.
    pub fn lookup(&self, class: &str) -> Option<&[FieldDescriptor]> {
        self.classes
            .get(class)
            .and_then(|c| c.fields.as_deref())
    }

    /// [`lookup`](Registry::lookup) by [`Type`]. Primitives never have descriptors.
    pub fn lookup_type(&self, ty: &Type) -> Option<&[FieldDescriptor]> {
        ty.class_name().and_then(|c| self.lookup(c))
    }

    /// Make `child` extend `parent`.
    ///
    /// The child's descriptor list becomes a copy of the parent's followed by the child's own.
    /// A child descriptor for a field the parent also has replaces the parent's in place. Hooks
    /// the child does not define are taken from the parent.
    ///
    /// Composition is a snapshot: fields registered on the parent afterwards are not seen by the
    /// child.
    pub fn compose_inheritance<P, C>(&mut self, parent: P, child: C)
    where
        P: Into<Name>,
        C: Into<Name>,
    {
        let parent = parent.into();
        let child = child.into();

        let (inherited, on_encoded, on_decoded) = match self.classes.get(&parent) {
            Some(p) => (
                p.fields.clone().unwrap_or_default(),
                p.on_encoded.clone(),
                p.on_decoded.clone(),
            ),
            None => Default::default(),
        };

        tracing::debug!(
            %parent,
            %child,
            inherited = inherited.len(),
            "composing inheritance"
        );

        let class = self.class_mut(child);
        let own = class.fields.take().unwrap_or_default();

        let mut fields = inherited;
        for d in own {
            match fields.iter_mut().find(|p| p.field() == d.field()) {
                Some(slot) => *slot = d,
                None => fields.push(d),
            }
        }

        class.fields = Some(fields);
        if class.on_encoded.is_none() {
            class.on_encoded = on_encoded;
        }
        if class.on_decoded.is_none() {
            class.on_decoded = on_decoded;
        }
    }

    /// Set the constructor used by [`Instantiation::Construct`].
    pub fn constructor<S, F>(&mut self, class: S, f: F)
    where
        S: Into<Name>,
        F: Fn() -> Object + Send + Sync + 'static,
    {
        self.class_mut(class).constructor = Some(Arc::new(f));
    }

    /// Set the post-encode hook of a class.
    pub fn on_encoded<S, F>(&mut self, class: S, f: F)
    where
        S: Into<Name>,
        F: Fn(&mut JsonMap, &Value) -> Option<Json> + Send + Sync + 'static,
    {
        self.class_mut(class).on_encoded = Some(Arc::new(f));
    }

    /// Set the post-decode hook of a class.
    pub fn on_decoded<S, F>(&mut self, class: S, f: F)
    where
        S: Into<Name>,
        F: Fn(&Json, &mut Value, Instantiation) -> Option<Value> + Send + Sync + 'static,
    {
        self.class_mut(class).on_decoded = Some(Arc::new(f));
    }

    pub(crate) fn constructor_of(&self, class: &str) -> Option<&Constructor> {
        self.classes.get(class).and_then(|c| c.constructor.as_ref())
    }

    pub(crate) fn encode_hook(&self, class: &str) -> Option<&EncodeHook> {
        self.classes.get(class).and_then(|c| c.on_encoded.as_ref())
    }

    pub(crate) fn decode_hook(&self, class: &str) -> Option<&DecodeHook> {
        self.classes.get(class).and_then(|c| c.on_decoded.as_ref())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, class) in &self.classes {
            map.entry(name, &class.fields);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &Registry, class: &str) -> Vec<String> {
        registry
            .lookup(class)
            .unwrap()
            .iter()
            .map(|d| d.field().to_owned())
            .collect()
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = Registry::default();
        registry.register("A", "x").encode_as(Primitive::Number);
        registry.register("A", "x").decode_as(Primitive::Number);
        let fields = registry.lookup("A").unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields[0].encode_op().is_some());
        assert!(fields[0].decode_op().is_some());
    }

    #[test]
    fn composition_orders_parent_first() {
        let mut registry = Registry::default();
        registry.register("P", "x").auto_as(Primitive::Number);
        registry.register("P", "y").auto_as(Primitive::Number);
        registry.register("C", "z").auto_as(Primitive::Number);
        registry.compose_inheritance("P", "C");
        assert_eq!(names(&registry, "C"), vec!["x", "y", "z"]);
        assert_eq!(names(&registry, "P"), vec!["x", "y"]);
    }

    #[test]
    fn child_redeclaration_overrides_in_place() {
        let mut registry = Registry::default();
        registry.register("P", "x").auto_as(Primitive::Number);
        registry.register("P", "y").auto_as(Primitive::Number);
        registry.register("C", "z").auto_as(Primitive::Number);
        registry.register("C", "x").auto_as(Primitive::Text).key("ex");
        registry.compose_inheritance("P", "C");

        assert_eq!(names(&registry, "C"), vec!["x", "y", "z"]);
        let x = &registry.lookup("C").unwrap()[0];
        assert_eq!(x.encode_key(), Some("ex"));
        assert!(matches!(x.encode_op(), Some(EncodeOp::Primitive(Primitive::Text))));
    }

    #[test]
    fn redeclaring_after_composition_does_not_duplicate() {
        let mut registry = Registry::default();
        registry.register("P", "x").auto_as(Primitive::Number);
        registry.compose_inheritance("P", "C");
        registry.register("C", "x").key("ex");
        assert_eq!(names(&registry, "C"), vec!["x"]);
        assert_eq!(registry.lookup("P").unwrap()[0].encode_key(), Some("x"));
    }

    #[test]
    fn composing_from_unknown_parent_yields_present_list() {
        let mut registry = Registry::default();
        registry.compose_inheritance("Nobody", "C");
        assert_eq!(registry.lookup("C").map(|f| f.len()), Some(0));
    }

    #[test]
    fn hooks_are_inherited_when_missing() {
        let mut registry = Registry::default();
        registry.on_encoded("P", |_, _| None);
        registry.compose_inheritance("P", "C");
        assert!(registry.encode_hook("C").is_some());
        assert!(registry.decode_hook("C").is_none());
    }
}
