use super::*;

/// Walks an object graph, producing JSON as the registry describes.
pub(crate) struct Encoder<'a> {
    pub registry: &'a Registry,
    pub config: &'a Config,
}

impl<'a> Encoder<'a> {
    pub fn encode(&self, value: &Value, ty: &Type) -> Result<Json> {
        match ty {
            Type::Primitive(p) => Ok(prim::encode(value, *p)),
            Type::Class(class) => self.encode_class(value, class),
        }
    }

    /// A class without descriptors encodes as an empty object.
    fn encode_class(&self, value: &Value, class: &str) -> Result<Json> {
        if value.is_nil() {
            return Ok(Json::Null);
        }

        let fields = match self.registry.lookup(class) {
            Some(fields) => fields,
            None => return Ok(Json::Object(JsonMap::new())),
        };

        let mut out = JsonMap::new();

        for desc in fields {
            let key = match desc.encode_key() {
                Some(key) => key,
                None => continue,
            };
            let source = match value.get(desc.field()) {
                Some(source) => source,
                None => continue,
            };

            let key = if desc.key_casing() {
                self.config.encode_key(key)
            } else {
                key.to_owned()
            };
            let json = self.encode_field(source, desc)?;
            out.insert(key, json);
        }

        if let Some(hook) = self.registry.encode_hook(class) {
            if let Some(replacement) = hook(&mut out, value) {
                tracing::trace!(class, "encode hook replaced output");
                return Ok(replacement);
            }
        }

        Ok(Json::Object(out))
    }

    fn encode_field(&self, source: &Value, desc: &FieldDescriptor) -> Result<Json> {
        let op = match desc.encode_op() {
            Some(op) => op,
            None => return Ok(Json::Null),
        };

        match op {
            EncodeOp::Map(ty) => self.encode_map(source, ty, desc.key_casing()),
            EncodeOp::Array(ty) => self.encode_array(source, ty),
            EncodeOp::Primitive(p) => Ok(prim::encode(source, *p)),
            EncodeOp::Object(class) => self.encode_class(source, class),
            EncodeOp::Structural => Ok(structural::encode(
                source,
                self.config,
                desc.key_casing(),
            )),
            EncodeOp::Using(f) => f(source),
        }
    }

    pub fn encode_array(&self, source: &Value, ty: &Type) -> Result<Json> {
        match source {
            Value::Absent | Value::Null => Ok(Json::Null),
            Value::List(list) => list
                .iter()
                .map(|v| self.encode(v, ty))
                .collect::<Result<Vec<_>>>()
                .map(Json::Array),
            x => Err(Error::ExpectedArray(x.kind())),
        }
    }

    pub fn encode_map(&self, source: &Value, ty: &Type, transform_keys: bool) -> Result<Json> {
        let obj = match source {
            Value::Absent | Value::Null => return Ok(Json::Null),
            Value::Obj(obj) => obj,
            x => return Err(Error::ExpectedObject(x.kind())),
        };

        let mut out = JsonMap::new();
        for (k, v) in obj {
            let key = if transform_keys {
                self.config.encode_key(k)
            } else {
                k.to_owned()
            };
            out.insert(key, self.encode(v, ty)?);
        }

        Ok(Json::Object(out))
    }
}
