use dserd::*;
use rstest::rstest;
use serde_json::json;

fn shapes() -> Registry {
    let mut r = Registry::default();
    r.register("Shape", "id").auto_as(Primitive::Number);
    r.register("Shape", "colour").auto_as(Primitive::Text);
    r.register("Circle", "radius").auto_as(Primitive::Number);
    r.register("Circle", "colour").auto_as(Primitive::Number).key("hue");
    r.compose_inheritance("Shape", "Circle");
    r
}

#[rstest]
fn child_extends_parent() {
    let r = shapes();
    let fields: Vec<_> = r
        .lookup("Circle")
        .unwrap()
        .iter()
        .map(|d| (d.field(), d.encode_key()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("id", Some("id")),
            ("colour", Some("hue")),
            ("radius", Some("radius")),
        ]
    );
    assert_eq!(r.lookup("Shape").map(<[_]>::len), Some(2));
}

#[rstest]
fn child_encodes_and_decodes_parent_fields() {
    let codec = Codec::new(shapes());
    let circle = Value::from(
        Object::new("Circle")
            .with("id", 1)
            .with("colour", 200)
            .with("radius", 2.5),
    );

    let json = codec.encode(&circle, "Circle").unwrap();
    assert_eq!(json, json!({ "id": 1, "hue": 200, "radius": 2.5 }));
    assert_eq!(codec.decode(&json, "Circle").unwrap(), circle);

    // the parent is untouched
    let shape = Value::from(Object::new("Shape").with("id", 1).with("colour", "red"));
    assert_eq!(
        codec.encode(&shape, "Shape").unwrap(),
        json!({ "id": 1, "colour": "red" })
    );
}

#[rstest]
fn multi_level() {
    let mut r = shapes();
    r.register("Ring", "inner").auto_as(Primitive::Number);
    r.compose_inheritance("Circle", "Ring");
    let codec = Codec::new(r);

    let ring = codec
        .decode(&json!({ "id": 3, "hue": 10, "radius": 5, "inner": 4 }), "Ring")
        .unwrap();
    let obj = ring.obj().unwrap();
    assert_eq!(obj.class(), Some("Ring"));
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["id", "colour", "radius", "inner"]);
}

#[rstest]
fn hooks_are_inherited_unless_overridden() {
    let mut r = shapes();
    r.on_encoded("Shape", |out, _| {
        out.insert("kind".into(), json!("shape"));
        None
    });
    r.register("Square", "side").auto_as(Primitive::Number);
    r.on_encoded("Square", |out, _| {
        out.insert("kind".into(), json!("square"));
        None
    });
    r.compose_inheritance("Shape", "Square");
    r.compose_inheritance("Shape", "Circle");
    let codec = Codec::new(r);

    let square = Value::from(Object::new("Square").with("side", 1));
    assert_eq!(
        codec.encode(&square, "Square").unwrap(),
        json!({ "side": 1, "kind": "square" })
    );

    let circle = Value::from(Object::new("Circle").with("radius", 1));
    assert_eq!(
        codec.encode(&circle, "Circle").unwrap(),
        json!({ "radius": 1, "kind": "shape" })
    );
}

#[rstest]
fn composition_is_a_snapshot() {
    let mut r = shapes();
    r.register("Shape", "late").auto_as(Primitive::Text);
    assert!(r
        .lookup("Circle")
        .unwrap()
        .iter()
        .all(|d| d.field() != "late"));
}

#[rstest]
fn unknown_parent_keeps_child() {
    let mut r = Registry::default();
    r.register("Child", "a").auto_as(Primitive::Text);
    r.compose_inheritance("Nobody", "Child");
    assert_eq!(r.lookup("Child").map(<[_]>::len), Some(1));
    assert!(!r.is_declared("Nobody"));
}
