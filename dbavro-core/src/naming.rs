//! Field and record naming.
//!
//! Column names become Avro field names through an [`IdentifierSanitizer`];
//! record names and namespaces come from a [`NamingPolicy`].

use crate::avro::is_valid_name;
use crate::config::GeneratorConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Turns raw column names into legal Avro field names.
///
/// Implementations must be deterministic.
pub trait IdentifierSanitizer: Send + Sync {
    /// Returns a legal Avro name for `raw`
    fn sanitize(&self, raw: &str) -> String;
}

/// Chooses the record name and namespace for an imported table.
pub trait NamingPolicy: Send + Sync {
    /// Short (unqualified) record name for a table, if the policy has one
    fn short_record_name(&self, table_name: &str) -> Option<String>;

    /// Namespace for generated records, if any
    fn namespace_for_table(&self) -> Option<String>;
}

static ILLEGAL_RUN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[^A-Za-z0-9_]+").expect("Invalid identifier pattern")
});

/// Java keywords and literals; generated record classes cannot use them.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Fallback for names left empty after cleaning
const EMPTY_NAME_PREFIX: &str = "AVRO_";

/// Default sanitizer producing names legal in both Avro and Java.
///
/// - runs of characters outside `[A-Za-z0-9_]` become a single `_`
/// - Java reserved words and names starting with a digit get a leading `_`
/// - an empty name becomes `AVRO_`
#[derive(Debug, Clone, Copy, Default)]
pub struct AvroIdentifierSanitizer;

impl IdentifierSanitizer for AvroIdentifierSanitizer {
    fn sanitize(&self, raw: &str) -> String {
        let cleaned = ILLEGAL_RUN.replace_all(raw, "_");

        if RESERVED_WORDS.contains(&&*cleaned) {
            return format!("_{}", cleaned);
        }

        match cleaned.chars().next() {
            Some(c) if c.is_ascii_digit() => format!("_{}", cleaned),
            Some(_) => cleaned.into_owned(),
            None => EMPTY_NAME_PREFIX.to_string(),
        }
    }
}

/// Record naming driven by the `class_name` and `package_name` options.
///
/// - `class_name = "com.acme.Order"` names every record `Order` in
///   namespace `com.acme`
/// - otherwise the record takes the sanitized table name and the
///   namespace is `package_name`, if set
#[derive(Debug, Clone, Default)]
pub struct TableClassName<S = AvroIdentifierSanitizer> {
    class_name: Option<String>,
    package_name: Option<String>,
    sanitizer: S,
}

impl TableClassName {
    /// Creates the naming policy from generator options
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            class_name: config.class_name.clone(),
            package_name: config.package_name.clone(),
            sanitizer: AvroIdentifierSanitizer,
        }
    }
}

impl<S: IdentifierSanitizer> TableClassName<S> {
    /// Builder method to replace the sanitizer used for table names
    pub fn with_sanitizer<T: IdentifierSanitizer>(self, sanitizer: T) -> TableClassName<T> {
        TableClassName {
            class_name: self.class_name,
            package_name: self.package_name,
            sanitizer,
        }
    }
}

impl<S: IdentifierSanitizer> NamingPolicy for TableClassName<S> {
    fn short_record_name(&self, table_name: &str) -> Option<String> {
        if let Some(class_name) = &self.class_name {
            let short = class_name.rsplit('.').next().unwrap_or(class_name);
            return Some(short.to_string());
        }
        let name = self.sanitizer.sanitize(table_name);
        is_valid_name(&name).then_some(name)
    }

    fn namespace_for_table(&self) -> Option<String> {
        if let Some((package, _)) = self.class_name.as_deref().and_then(|c| c.rsplit_once('.')) {
            return Some(package.to_string());
        }
        self.package_name.clone().filter(|p| !p.is_empty())
    }
}
