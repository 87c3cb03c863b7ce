use serde_json::{json, Map, Value};

use crate::cafe::{coerce_bool, Column, Model, NewCafe, REQUIRED_FIELDS};
use crate::errors::ModelError;
use sea_orm::{IdenStatic, Iterable};

fn sample() -> Model {
    Model {
        id: 7,
        name: "Science Gallery London".into(),
        map_url: "https://g.page/scigallerylon".into(),
        img_url: "https://example.com/sgl.jpg".into(),
        location: "London Bridge".into(),
        seats: "50+".into(),
        has_toilet: true,
        has_wifi: false,
        has_sockets: true,
        can_take_calls: false,
        coffee_price: Some("£2.40".into()),
    }
}

fn form_fields() -> Map<String, Value> {
    let v = json!({
        "name": "Ace",
        "map_url": "https://maps/ace",
        "img_url": "https://img/ace.png",
        "location": "Shoreditch",
        "seats": "10-20",
        "has_toilet": "True",
        "has_wifi": "false",
        "has_sockets": "yes",
        "can_take_calls": "TRUE",
        "coffee_price": "£2.50",
    });
    match v {
        Value::Object(m) => m,
        _ => unreachable!(),
    }
}

#[test]
fn document_has_every_column() {
    let doc = sample().to_document();
    assert_eq!(doc.len(), Column::iter().count());
    for col in Column::iter() {
        assert!(doc.contains_key(col.as_str()), "missing column {}", col.as_str());
    }
}

#[test]
fn document_keeps_native_types() {
    let doc = sample().to_document();
    assert_eq!(doc["id"], json!(7));
    assert_eq!(doc["has_toilet"], json!(true));
    assert_eq!(doc["has_wifi"], json!(false));
    assert_eq!(doc["seats"], json!("50+"));
    assert_eq!(doc["coffee_price"], json!("£2.40"));

    let mut no_price = sample();
    no_price.coffee_price = None;
    assert_eq!(no_price.to_document()["coffee_price"], Value::Null);
}

#[test]
fn document_rehydrates_to_same_row() {
    let row = sample();
    let back = Model::from_document(row.to_document()).unwrap();
    assert_eq!(back, row);

    let mut priceless = sample();
    priceless.coffee_price = None;
    assert_eq!(Model::from_document(priceless.to_document()).unwrap(), priceless);
}

#[test]
fn coerce_bool_table() {
    assert_eq!(coerce_bool(&json!("true")), Some(true));
    assert_eq!(coerce_bool(&json!("TrUe")), Some(true));
    assert_eq!(coerce_bool(&json!("false")), Some(false));
    assert_eq!(coerce_bool(&json!("1")), Some(false));
    assert_eq!(coerce_bool(&json!("")), Some(false));
    assert_eq!(coerce_bool(&json!(" true")), Some(false));
    assert_eq!(coerce_bool(&json!(true)), Some(true));
    assert_eq!(coerce_bool(&json!(false)), Some(false));
    assert_eq!(coerce_bool(&json!(1)), None);
    assert_eq!(coerce_bool(&Value::Null), None);
}

#[test]
fn new_cafe_from_form_strings() {
    let cafe = NewCafe::from_fields(&form_fields()).unwrap();
    assert_eq!(cafe.name, "Ace");
    assert!(cafe.has_toilet);
    assert!(!cafe.has_wifi);
    assert!(!cafe.has_sockets);
    assert!(cafe.can_take_calls);
    assert_eq!(cafe.coffee_price.as_deref(), Some("£2.50"));
}

#[test]
fn new_cafe_accepts_native_booleans_and_null_price() {
    let mut fields = form_fields();
    fields.insert("has_wifi".into(), json!(true));
    fields.insert("coffee_price".into(), Value::Null);
    let cafe = NewCafe::from_fields(&fields).unwrap();
    assert!(cafe.has_wifi);
    assert_eq!(cafe.coffee_price, None);
}

#[test]
fn new_cafe_reports_all_missing_fields() {
    let mut fields = form_fields();
    fields.remove("seats");
    fields.remove("coffee_price");
    match NewCafe::from_fields(&fields) {
        Err(ModelError::Validation(msg)) => {
            assert!(msg.contains("seats"), "{msg}");
            assert!(msg.contains("coffee_price"), "{msg}");
            assert!(!msg.contains("name"), "{msg}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn new_cafe_requires_every_listed_field() {
    for key in REQUIRED_FIELDS {
        let mut fields = form_fields();
        fields.remove(key);
        assert!(
            matches!(NewCafe::from_fields(&fields), Err(ModelError::Validation(_))),
            "removing {key} should fail"
        );
    }
}

#[test]
fn new_cafe_rejects_non_boolean_flag() {
    let mut fields = form_fields();
    fields.insert("has_sockets".into(), json!(3));
    assert!(matches!(NewCafe::from_fields(&fields), Err(ModelError::Validation(_))));

    let mut fields = form_fields();
    fields.insert("name".into(), json!(42));
    assert!(matches!(NewCafe::from_fields(&fields), Err(ModelError::Validation(_))));
}
