#![cfg(feature = "serde")]

use serde_json::json;
use tern_core::expr::{EnumType, ExtendedType, Mapping, MarkerType, Type, Value};

#[test]
fn mapping_is_offset_and_length() {
    let json = serde_json::to_value(Mapping::new(2, 3)).unwrap();
    assert_eq!(json, json!({ "offset": 2, "length": 3 }));
}

#[test]
fn tags_serialize_by_name() {
    assert_eq!(serde_json::to_value(ExtendedType::Field).unwrap(), json!("Field"));
    assert_eq!(serde_json::to_value(MarkerType::Single).unwrap(), json!("Single"));

    let tag: ExtendedType = serde_json::from_value(json!("EntitySet")).unwrap();
    assert_eq!(tag, ExtendedType::EntitySet);
}

#[test]
fn types() {
    assert_eq!(
        serde_json::to_value(Type::I32.nullable()).unwrap(),
        json!({ "Nullable": "I32" })
    );
    assert_eq!(
        serde_json::to_value(Type::Entity("Person".into())).unwrap(),
        json!({ "Entity": "Person" })
    );

    let level = EnumType::new("Level", Type::I16, [("Low", -1), ("High", 100)]).unwrap();
    let ty = Type::from(level);
    let back: Type = serde_json::from_str(&serde_json::to_string(&ty).unwrap()).unwrap();
    assert_eq!(back, ty);
}

#[test]
fn values() {
    assert_eq!(serde_json::to_value(Value::I32(5)).unwrap(), json!({ "I32": 5 }));
    assert_eq!(serde_json::to_value(Value::Null).unwrap(), json!("Null"));
}
