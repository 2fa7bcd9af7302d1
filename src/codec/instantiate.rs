use super::*;

/// Make sure `target` holds an object to decode `class` into.
///
/// An existing object target is reused untouched, whatever the policy. Otherwise a new object is
/// produced by the policy:
/// - [`Construct`](Instantiation::Construct) runs the class's constructor, or allocates when it
///   has none,
/// - [`Allocate`](Instantiation::Allocate) makes an empty instance of the class,
/// - [`Plain`](Instantiation::Plain) makes a plain container.
pub(crate) fn instantiate(
    registry: &Registry,
    class: &str,
    target: &mut Value,
    policy: Instantiation,
) {
    if target.obj().is_some() {
        return;
    }

    if !target.is_nil() {
        tracing::debug!(
            class,
            found = target.kind(),
            "decode target is not an object, replacing"
        );
    }

    *target = Value::Obj(create(registry, class, policy));
}

fn create(registry: &Registry, class: &str, policy: Instantiation) -> Object {
    match policy {
        Instantiation::Construct => match registry.constructor_of(class) {
            Some(ctor) => {
                tracing::trace!(class, "constructing");
                ctor()
            }
            None => {
                tracing::trace!(class, "no constructor, allocating");
                Object::new(class.to_owned())
            }
        },
        Instantiation::Allocate => {
            tracing::trace!(class, "allocating");
            Object::new(class.to_owned())
        }
        Instantiation::Plain => Object::plain(),
    }
}
