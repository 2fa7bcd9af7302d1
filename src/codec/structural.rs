//! Structural conversion: arbitrary nested data, no descriptors.
//!
//! Any [`Value`] can be written out and any [`Json`] read back in. Class information is not
//! consulted, and is lost on the way out. When key casing is on, the configured key transform
//! of the direction is applied to every key at every depth.
use super::*;

/// Encode a value structurally.
pub(crate) fn encode(value: &Value, config: &Config, transform_keys: bool) -> Json {
    match value {
        Value::Absent | Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Num(n) => num_to_json(*n),
        Value::Str(s) => Json::String(s.clone()),
        Value::Date(_) | Value::Pattern(_) => Json::String(value.to_string()),
        Value::List(list) => Json::Array(
            list.iter()
                .map(|v| encode(v, config, transform_keys))
                .collect(),
        ),
        Value::Obj(obj) => {
            let mut map = JsonMap::new();
            for (k, v) in obj {
                let key = if transform_keys {
                    config.encode_key(k)
                } else {
                    k.to_owned()
                };
                map.insert(key, encode(v, config, transform_keys));
            }
            Json::Object(map)
        }
    }
}

/// Decode JSON structurally into `target`.
///
/// An array merges element by element into an existing list target, an object merges its keys
/// into an existing object target (the values under those keys are always fresh). Anything else
/// replaces the target.
pub(crate) fn decode(data: &Json, config: &Config, transform_keys: bool, target: &mut Value) {
    match data {
        Json::Null => *target = Value::Null,
        Json::Bool(b) => *target = Value::Bool(*b),
        Json::Number(n) => *target = n.as_f64().map(Value::Num).unwrap_or(Value::Null),
        Json::String(s) => *target = Value::Str(s.clone()),
        Json::Array(items) => {
            if target.list().is_none() {
                *target = Value::List(Vec::with_capacity(items.len()));
            }
            if let Value::List(list) = target {
                list.resize(items.len(), Value::Absent);
                for (item, slot) in items.iter().zip(list.iter_mut()) {
                    decode(item, config, transform_keys, slot);
                }
            }
        }
        Json::Object(map) => {
            if target.obj().is_none() {
                *target = Value::Obj(Object::plain());
            }
            if let Value::Obj(obj) = target {
                for (k, v) in map {
                    let key = if transform_keys {
                        config.decode_key(k)
                    } else {
                        k.clone()
                    };
                    let mut fresh = Value::Absent;
                    decode(v, config, transform_keys, &mut fresh);
                    obj.set(key, fresh);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_skips_absent_and_cases_every_level() {
        let config = Config::default().encode_keys(crate::transform::camel_case);
        let mut inner = Object::plain().with("deep_key", 1);
        inner.set("gone", Value::Absent);
        let v = Value::from(
            Object::new("Ignored")
                .with("outer_key", Value::from(inner))
                .with("list_of", vec![Value::Null, Value::from("x")]),
        );

        assert_eq!(
            encode(&v, &config, true),
            json!({ "outerKey": { "deepKey": 1 }, "listOf": [null, "x"] })
        );
        assert_eq!(
            encode(&v, &config, false),
            json!({ "outer_key": { "deep_key": 1 }, "list_of": [null, "x"] })
        );
    }

    #[test]
    fn decode_merges_top_level() {
        let config = Config::default();
        let mut target = Value::from(Object::new("Keep").with("a", 1).with("b", 2));
        decode(&json!({ "a": { "x": true } }), &config, false, &mut target);

        let obj = target.obj().unwrap();
        assert_eq!(obj.class(), Some("Keep"));
        assert_eq!(obj.get("b"), Some(&Value::Num(2.0)));
        assert_eq!(
            obj.get("a").and_then(|a| a.get("x")),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn decode_array_by_index() {
        let config = Config::default();
        let mut target = Value::List(vec![
            Value::from(Object::plain().with("keep", 1)),
            Value::from(9),
            Value::from(10),
        ]);
        decode(&json!([{ "add": 2 }, "s"]), &config, false, &mut target);

        let list = target.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].get("keep"), Some(&Value::Num(1.0)));
        assert_eq!(list[0].get("add"), Some(&Value::Num(2.0)));
        assert_eq!(list[1], Value::from("s"));
    }

    #[test]
    fn scalars_pass_through() {
        let config = Config::default();
        let mut target = Value::from(Object::plain());
        decode(&json!(3.5), &config, true, &mut target);
        assert_eq!(target, Value::Num(3.5));
        assert_eq!(encode(&Value::from("s"), &config, true), json!("s"));
    }
}
