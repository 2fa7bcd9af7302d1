use dserd::*;
use rstest::rstest;
use serde_json::json;

fn fruit_registry() -> Registry {
    let mut r = Registry::default();
    r.register("Fruit", "name").auto_as(Primitive::Text);
    r.register("Fruit", "weight").auto_as(Primitive::Number);
    r.register("Fruit", "ripe").auto_as(Primitive::Boolean);
    r.register("Basket", "label").auto_as(Primitive::Text);
    r.register("Basket", "fruit").auto_as_array("Fruit");
    r.register("Basket", "by_name").auto_as_map("Fruit");
    r.register("Basket", "best").auto_as("Fruit");
    r
}

fn apple() -> Value {
    Object::new("Fruit")
        .with("name", "apple")
        .with("weight", 120)
        .with("ripe", true)
        .into()
}

#[rstest]
fn primitives_in_registration_order() {
    let codec = Codec::new(fruit_registry());
    let json = codec.encode(&apple(), "Fruit").unwrap();
    assert_eq!(json, json!({ "name": "apple", "weight": 120, "ripe": true }));

    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["name", "weight", "ripe"]);
}

#[rstest]
fn nil_instances_encode_null() {
    let codec = Codec::new(fruit_registry());
    assert_eq!(codec.encode(&Value::Null, "Fruit").unwrap(), Json::Null);
    assert_eq!(codec.encode(&Value::Absent, "Basket").unwrap(), Json::Null);
    assert_eq!(
        codec.encode(&Value::Null, Primitive::Number).unwrap(),
        Json::Null
    );
}

#[rstest]
fn absent_fields_are_skipped_and_null_fields_kept() {
    let codec = Codec::new(fruit_registry());
    let v = Value::from(Object::new("Fruit").with("name", "pear").with("ripe", Value::Null));
    assert_eq!(
        codec.encode(&v, "Fruit").unwrap(),
        json!({ "name": "pear", "ripe": null })
    );
}

#[rstest]
fn unregistered_fields_are_not_written() {
    let codec = Codec::new(fruit_registry());
    let v = Value::from(Object::new("Fruit").with("name", "fig").with("secret", 1));
    assert_eq!(codec.encode(&v, "Fruit").unwrap(), json!({ "name": "fig" }));
}

#[rstest]
fn class_without_descriptors_encodes_empty_object() {
    let codec = Codec::new(Registry::default());
    let v = Value::from(Object::new("Nothing").with("a", 1));
    assert_eq!(codec.encode(&v, "Nothing").unwrap(), json!({}));
}

#[rstest]
fn nested_arrays_and_maps() {
    let codec = Codec::new(fruit_registry());
    let basket = Value::from(
        Object::new("Basket")
            .with("label", "mixed")
            .with("fruit", vec![apple(), Value::Null])
            .with("by_name", Object::plain().with("apple", apple()))
            .with("best", apple()),
    );

    assert_eq!(
        codec.encode(&basket, "Basket").unwrap(),
        json!({
            "label": "mixed",
            "fruit": [{ "name": "apple", "weight": 120, "ripe": true }, null],
            "by_name": { "apple": { "name": "apple", "weight": 120, "ripe": true } },
            "best": { "name": "apple", "weight": 120, "ripe": true }
        })
    );
}

#[rstest]
fn null_containers_encode_null() {
    let codec = Codec::new(fruit_registry());
    let basket = Value::from(
        Object::new("Basket")
            .with("fruit", Value::Null)
            .with("by_name", Value::Null),
    );
    assert_eq!(
        codec.encode(&basket, "Basket").unwrap(),
        json!({ "fruit": null, "by_name": null })
    );
}

#[rstest]
fn non_containers_are_errors() {
    let codec = Codec::new(fruit_registry());

    let basket = Value::from(Object::new("Basket").with("fruit", "not a list"));
    match codec.encode(&basket, "Basket") {
        Err(Error::ExpectedArray(found)) => assert_eq!(found, "string"),
        x => panic!("unexpected {:?}", x),
    }

    let basket = Value::from(Object::new("Basket").with("by_name", vec![1]));
    match codec.encode(&basket, "Basket") {
        Err(Error::ExpectedObject(found)) => assert_eq!(found, "list"),
        x => panic!("unexpected {:?}", x),
    }
}

#[rstest]
#[case(Value::from("12"), json!(12))]
#[case(Value::from("0.5"), json!(0.5))]
#[case(Value::from("twelve"), Json::Null)]
#[case(Value::from(true), json!(1))]
#[case(Value::Num(f64::INFINITY), Json::Null)]
#[case(Value::from(Object::plain()), Json::Null)]
fn numbers_are_coerced(#[case] weight: Value, #[case] expected: Json) {
    let codec = Codec::new(fruit_registry());
    let v = Value::from(Object::new("Fruit").with("weight", weight));
    assert_eq!(
        codec.encode(&v, "Fruit").unwrap(),
        json!({ "weight": expected })
    );
}

#[rstest]
fn dates_and_patterns_as_text() {
    let mut r = Registry::default();
    r.register("Event", "at").auto_as(Primitive::Date);
    r.register("Event", "matcher").auto_as(Primitive::Pattern);
    let codec = Codec::new(r);

    let at = chrono::DateTime::parse_from_rfc3339("2019-12-31T23:59:58.5Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let v = Value::from(
        Object::new("Event")
            .with("at", at)
            .with("matcher", Pattern::new("ab+", "gi").unwrap()),
    );

    assert_eq!(
        codec.encode(&v, "Event").unwrap(),
        json!({ "at": "2019-12-31T23:59:58.500Z", "matcher": "/ab+/gi" })
    );
}

#[rstest]
fn custom_key_and_excluded_direction() {
    let mut r = Registry::default();
    r.register("User", "user_id").auto_as(Primitive::Number).key("id");
    r.register("User", "password").decode_as(Primitive::Text);
    let codec = Codec::new(r);

    let v = Value::from(
        Object::new("User")
            .with("user_id", 7)
            .with("password", "hunter2"),
    );
    assert_eq!(codec.encode(&v, "User").unwrap(), json!({ "id": 7 }));
}

#[rstest]
fn encode_using_function() {
    let mut r = Registry::default();
    r.register("Temp", "celsius").encode_using(|v| {
        let c = v.num().ok_or_else(|| Error::custom("celsius must be a number"))?;
        Ok(json!(format!("{}C", c)))
    });
    let codec = Codec::new(r);

    let v = Value::from(Object::new("Temp").with("celsius", 21.5));
    assert_eq!(codec.encode(&v, "Temp").unwrap(), json!({ "celsius": "21.5C" }));

    let v = Value::from(Object::new("Temp").with("celsius", "hot"));
    let err = codec.encode(&v, "Temp").unwrap_err();
    assert_eq!(err.to_string(), "celsius must be a number");
}

#[rstest]
fn structural_field_copies_data() {
    let mut r = Registry::default();
    r.register("Doc", "meta").auto_as_json(false);
    let codec = Codec::new(r);

    let meta = Object::new("Whatever")
        .with("nested_key", vec![Value::from(1), Value::from("two")])
        .with("flag", Value::Null);
    let v = Value::from(Object::new("Doc").with("meta", meta));

    assert_eq!(
        codec.encode(&v, "Doc").unwrap(),
        json!({ "meta": { "nested_key": [1, "two"], "flag": null } })
    );
}

#[rstest]
fn encode_hook_amends_output() {
    let mut r = fruit_registry();
    r.on_encoded("Fruit", |out, instance| {
        out.insert("heavy".into(), json!(instance.get("weight").and_then(Value::num) > Some(100.0)));
        None
    });
    let codec = Codec::new(r);

    assert_eq!(
        codec.encode(&apple(), "Fruit").unwrap(),
        json!({ "name": "apple", "weight": 120, "ripe": true, "heavy": true })
    );
}

#[rstest]
fn encode_hook_replaces_output() {
    let mut r = fruit_registry();
    r.on_encoded("Fruit", |_, instance| instance.get("name").map(|n| json!(n.to_string())));
    let codec = Codec::new(r);

    assert_eq!(codec.encode(&apple(), "Fruit").unwrap(), json!("apple"));
}

#[rstest]
fn top_level_array_and_map() {
    let codec = Codec::new(fruit_registry());

    let list = codec
        .encode_array(&[apple(), Value::Null], "Fruit")
        .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1], Json::Null);

    let map = codec
        .encode_map(&Object::plain().with("a", 1).with("b", "2"), Primitive::Number)
        .unwrap();
    assert_eq!(Json::Object(map), json!({ "a": 1, "b": 2 }));
}
