use super::*;

/// Walks JSON data, merging it into an object graph as the registry describes.
///
/// Every path writes into a _slot_ holding the current value, so decoding into a long-lived
/// graph only touches what the data mentions.
pub(crate) struct Decoder<'a> {
    pub registry: &'a Registry,
    pub config: &'a Config,
    pub policy: Instantiation,
}

impl<'a> Decoder<'a> {
    pub fn decode(&self, data: &Json, ty: &Type, target: &mut Value) -> Result<()> {
        match ty {
            Type::Primitive(p) => prim::decode(data, *p, target),
            Type::Class(class) => self.decode_class(data, class, target),
        }
    }

    fn decode_class(&self, data: &Json, class: &str, target: &mut Value) -> Result<()> {
        if data.is_null() {
            *target = Value::Null;
            return Ok(());
        }

        let fields = match self.registry.lookup(class) {
            Some(fields) => fields,
            // nothing to merge, so a declared class always gets a bare new instance
            None => {
                if self.registry.is_declared(class) {
                    *target = Value::Absent;
                    instantiate(self.registry, class, target, self.policy);
                } else {
                    tracing::debug!(class, "unknown class, decoding null");
                    *target = Value::Null;
                }
                return Ok(());
            }
        };

        instantiate(self.registry, class, target, self.policy);

        if let Value::Obj(obj) = target {
            for desc in fields {
                let key = match desc.decode_key() {
                    Some(key) if desc.key_casing() => self.config.decode_key(key),
                    Some(key) => key.to_owned(),
                    None => continue,
                };
                let source = match data.get(&key) {
                    Some(source) => source,
                    None => continue,
                };
                let op = match desc.decode_op() {
                    Some(op) => op,
                    None => continue,
                };

                let r = self.decode_field(source, op, desc, obj.slot(desc.field()));
                obj.prune(desc.field());
                r?;
            }
        }

        if let Some(hook) = self.registry.decode_hook(class) {
            if let Some(replacement) = hook(data, target, self.policy) {
                tracing::trace!(class, "decode hook replaced target");
                *target = replacement;
            }
        }

        Ok(())
    }

    fn decode_field(
        &self,
        source: &Json,
        op: &DecodeOp,
        desc: &FieldDescriptor,
        slot: &mut Value,
    ) -> Result<()> {
        match op {
            DecodeOp::Map(ty) => self.decode_map(source, ty, slot, desc.key_casing()),
            DecodeOp::Array(ty) => self.decode_array(source, ty, slot),
            DecodeOp::Primitive(p) => prim::decode(source, *p, slot),
            DecodeOp::Object(class) => self.decode_class(source, class, slot),
            DecodeOp::Structural => {
                let mut fresh = Value::Absent;
                structural::decode(source, self.config, desc.key_casing(), &mut fresh);
                *slot = fresh;
                Ok(())
            }
            DecodeOp::Using(f) => {
                *slot = f(source, slot.clone(), self.policy)?;
                Ok(())
            }
        }
    }

    /// Element `i` of the data merges into element `i` of an existing list.
    /// The result has as many elements as the data.
    pub fn decode_array(&self, data: &Json, ty: &Type, target: &mut Value) -> Result<()> {
        let items = match data {
            Json::Null => {
                *target = Value::Null;
                return Ok(());
            }
            Json::Array(items) => items,
            x => return Err(Error::ExpectedArray(json_kind(x))),
        };

        if target.list().is_none() {
            *target = Value::List(Vec::with_capacity(items.len()));
        }

        if let Value::List(list) = target {
            list.resize(items.len(), Value::Absent);
            for (item, slot) in items.iter().zip(list.iter_mut()) {
                self.decode(item, ty, slot)?;
            }
        }

        Ok(())
    }

    /// Each value merges into the value of an existing object under the (cased) key.
    pub fn decode_map(
        &self,
        data: &Json,
        ty: &Type,
        target: &mut Value,
        transform_keys: bool,
    ) -> Result<()> {
        let map = match data {
            Json::Null => {
                *target = Value::Null;
                return Ok(());
            }
            Json::Object(map) => map,
            x => return Err(Error::ExpectedObject(json_kind(x))),
        };

        if target.obj().is_none() {
            *target = Value::Obj(Object::plain());
        }

        if let Value::Obj(obj) = target {
            for (k, v) in map {
                let key = if transform_keys {
                    self.config.decode_key(k)
                } else {
                    k.clone()
                };
                let r = self.decode(v, ty, obj.slot(&key));
                obj.prune(&key);
                r?;
            }
        }

        Ok(())
    }
}
