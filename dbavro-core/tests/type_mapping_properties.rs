//! Property tests for type resolution.
//!
//! This test suite covers:
//! - Every supported override token parses in any letter case
//! - Tokens outside the vocabulary are rejected at parse time
//! - Every mapped column is a `[null, T]` union with a non-null `T`
//! - Decimal sizing grows with precision

#![allow(clippy::unwrap_used)]

use dbavro_core::adapters::create_type_mapping;
use dbavro_core::type_mapping::{PRECISION_TO_BYTE_COUNT, byte_count_for_precision};
use dbavro_core::{
    AvroSchema, DatabaseType, DbAvroError, GeneratorConfig, OverrideType, SqlType, TypeMapper,
    TypeNameHints, TypeOverrides,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const VOCABULARY: [&str; 7] = ["INTEGER", "LONG", "BOOLEAN", "FLOAT", "DOUBLE", "STRING", "BYTES"];

fn any_database_type() -> impl Strategy<Value = DatabaseType> {
    prop::sample::select(DatabaseType::ALL.to_vec())
}

fn mixed_case(token: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), token.len()).prop_map(move |upper| {
        token
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect()
    })
}

proptest! {
    #[test]
    fn override_tokens_parse_in_any_case(
        index in 0..VOCABULARY.len(),
        flips in prop::collection::vec(any::<bool>(), 7),
    ) {
        let token: String = VOCABULARY[index]
            .chars()
            .zip(flips.into_iter().cycle())
            .map(|(c, u)| if u { c } else { c.to_ascii_lowercase() })
            .collect();
        let parsed = OverrideType::from_token(&token);
        prop_assert!(parsed.is_some(), "{} did not parse", token);
        prop_assert_eq!(parsed.map(|t| t.to_string()), Some(VOCABULARY[index].to_string()));
    }

    #[test]
    fn unknown_override_tokens_fail(token in "[A-Za-z]{1,12}") {
        prop_assume!(!VOCABULARY.contains(&token.to_uppercase().as_str()));

        let raw = BTreeMap::from([("COL".to_string(), token.clone())]);
        let result = TypeOverrides::parse(&raw);
        let is_invalid_override = matches!(result, Err(DbAvroError::InvalidTypeOverride { .. }));
        prop_assert!(is_invalid_override);
    }

    #[test]
    fn mapped_columns_are_nullable(
        database_type in any_database_type(),
        code in any::<i32>(),
        precision in prop::option::of(-5_i32..200),
        scale in prop::option::of(0_i32..10),
        decimal_logical_type in any::<bool>(),
    ) {
        let config = GeneratorConfig::new();
        let vendor = create_type_mapping(database_type, &config, TypeNameHints::new());
        let overrides = TypeOverrides::new();
        let mapper = TypeMapper::new(vendor.as_ref(), &overrides, decimal_logical_type);

        // precision of 10 or more keeps every generated scale valid
        let precision = precision.map(|p| if p > 0 { p.max(10) } else { p });
        let schema = mapper.map_column(SqlType(code), Some("C"), precision, scale);
        prop_assert!(schema.is_ok(), "{:?}", schema);
        let schema = schema.unwrap_or(AvroSchema::Null);
        prop_assert!(schema.is_nullable_union());
        prop_assert_ne!(schema.value_branch(), Some(&AvroSchema::Null));
    }

    #[test]
    fn overrides_win_for_every_sql_type(
        code in any::<i32>(),
        token in prop::sample::select(VOCABULARY.to_vec()).prop_flat_map(mixed_case),
    ) {
        let config = GeneratorConfig::new()
            .with_decimal_logical_type(true)
            .with_column_override("C", token.clone());
        let overrides = config.type_overrides();
        prop_assert!(overrides.is_ok());
        let overrides = overrides.unwrap_or_default();
        let vendor = create_type_mapping(DatabaseType::Generic, &config, TypeNameHints::new());
        let mapper = TypeMapper::new(vendor.as_ref(), &overrides, true);

        let expected = OverrideType::from_token(&token).map(OverrideType::to_avro);
        let schema = mapper.map_column(SqlType(code), Some("C"), Some(10), Some(2));
        prop_assert_eq!(
            schema.ok().as_ref().and_then(AvroSchema::value_branch).cloned(),
            expected
        );
    }

    #[test]
    fn byte_count_is_monotonic(precision in 1_u32..38) {
        let current = byte_count_for_precision(precision);
        let next = byte_count_for_precision(precision + 1);
        prop_assert!(current.is_some() && next.is_some());
        prop_assert!(current <= next);
    }
}

#[test]
fn byte_table_covers_all_precisions() {
    assert_eq!(PRECISION_TO_BYTE_COUNT.len(), 38);
    assert_eq!(PRECISION_TO_BYTE_COUNT.first(), Some(&1));
    assert_eq!(PRECISION_TO_BYTE_COUNT.last(), Some(&16));
}
