//! Tests for Avro record schema validation.

use super::*;
use serde_json::json;

/// Setup function to ensure validator is initialized for all tests
fn setup() {
    let _ = initialize_schema_validator();
}

fn valid_record() -> Value {
    json!({
        "type": "record",
        "name": "ORDERS",
        "namespace": "com.acme.model",
        "doc": "Import of ORDERS",
        "fields": [
            {"name": "ID", "type": ["null", "int"], "default": null, "columnName": "ID", "sqlType": "4"},
            {
                "name": "AMOUNT",
                "type": ["null", {"type": "bytes", "logicalType": "decimal", "precision": 12, "scale": 2}],
                "default": null,
                "columnName": "AMOUNT",
                "sqlType": "3"
            }
        ],
        "tableName": "ORDERS"
    })
}

#[test]
fn test_schema_initialization_success() {
    assert!(initialize_schema_validator().is_ok());
    // second call keeps the cached validator
    assert!(initialize_schema_validator().is_ok());
}

#[test]
fn test_schema_definition_parses() {
    let definition = get_schema_definition().unwrap();
    assert_eq!(definition["properties"]["type"]["const"], "record");
}

#[test]
fn test_valid_record_passes() {
    setup();
    assert!(validate_avro_schema_output(&valid_record()).is_ok());
}

#[test]
fn test_empty_record_passes() {
    setup();
    let record = json!({
        "type": "record",
        "name": "AutoGeneratedSchema",
        "doc": "Import of QueryResult",
        "fields": [],
        "tableName": "QueryResult"
    });
    assert!(validate_avro_schema_output(&record).is_ok());
}

#[test]
fn test_missing_fields_fails() {
    setup();
    let mut record = valid_record();
    record.as_object_mut().unwrap().remove("fields");

    let result = validate_avro_schema_output(&record);
    assert!(matches!(result, Err(ValidationError::ValidationFailed { .. })));
}

#[test]
fn test_illegal_record_name_fails() {
    setup();
    let mut record = valid_record();
    record["name"] = json!("9orders");
    assert!(validate_avro_schema_output(&record).is_err());

    let mut record = valid_record();
    record["namespace"] = json!("com..acme");
    assert!(validate_avro_schema_output(&record).is_err());
}

#[test]
fn test_non_nullable_field_fails() {
    setup();
    let mut record = valid_record();
    record["fields"][0]["type"] = json!(["int", "null"]);

    match validate_avro_schema_output(&record) {
        Err(ValidationError::NotNullable { field, .. }) => assert_eq!(field, "ID"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_bare_type_fails() {
    setup();
    let mut record = valid_record();
    record["fields"][0]["type"] = json!("int");
    assert!(validate_avro_schema_output(&record).is_err());
}

#[test]
fn test_decimal_out_of_range_fails() {
    setup();
    let mut record = valid_record();
    record["fields"][1]["type"][1]["precision"] = json!(39);
    assert!(validate_avro_schema_output(&record).is_err());

    let mut record = valid_record();
    record["fields"][1]["type"][1]["scale"] = json!(13);
    match validate_avro_schema_output(&record) {
        Err(ValidationError::ValidationFailed { errors, .. }) => {
            assert!(errors[0].contains("AMOUNT"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_duplicate_field_names_fail() {
    setup();
    let mut record = valid_record();
    record["fields"][1]["name"] = json!("ID");
    assert!(matches!(
        validate_avro_schema_output(&record),
        Err(ValidationError::ValidationFailed { .. })
    ));
}

#[test]
fn test_non_null_default_fails() {
    setup();
    let mut record = valid_record();
    record["fields"][0]["default"] = json!(0);
    assert!(validate_avro_schema_output(&record).is_err());
}

#[test]
fn test_validate_from_str() {
    setup();
    let text = serde_json::to_string(&valid_record()).unwrap();
    assert!(validate_avro_schema_str(&text).is_ok());

    let result = validate_avro_schema_str("{not json");
    assert!(matches!(result, Err(ValidationError::JsonParsing { .. })));
}

#[test]
fn test_generated_schema_passes() {
    use crate::avro::{AvroSchema, DecimalLogicalType, RecordField, RecordSchema};

    setup();
    let schema = RecordSchema::new(
        "T",
        Some("org.example".to_string()),
        "Import of T",
        vec![
            RecordField::new("A", AvroSchema::nullable(AvroSchema::Long)),
            RecordField::new(
                "B",
                AvroSchema::nullable(AvroSchema::Decimal(DecimalLogicalType::new(38, 0).unwrap())),
            ),
        ],
    )
    .unwrap()
    .with_property("tableName", "T");

    assert!(validate_avro_schema_output(&schema.to_json_value().unwrap()).is_ok());
}
