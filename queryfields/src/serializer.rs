//! Serializers with query-driven field sieving.
//!
//! Two serializer families are provided. They differ only in where they keep
//! their field mapping:
//!
//! - [`Serializer`] keeps declared [`Field`]s in `fields`.
//! - [`CompiledSerializer`] compiles declared fields into [`CompiledField`]s
//!   once and keeps those in `compiled_fields`.
//!
//! Both sieve exactly once, at the end of construction, and render records as
//! JSON objects whose keys follow the (sieved) field order.
//!
//! # Example
//!
//! ```
//! use miniserde::json::{self, Value};
//! use queryfields::{Context, Method, Request, Serializer, declare_fields};
//!
//! let req = Request::new(Method::Get, "/users/1?fields!=email");
//! let serializer = Serializer::new(
//!     declare_fields(["id", "name", "email"]),
//!     Context::with_request(&req),
//! );
//!
//! let Value::Object(user) =
//!     json::from_str::<Value>(r#"{"id":1,"name":"Alice","email":"a@example.com"}"#).unwrap()
//! else {
//!     unreachable!()
//! };
//! assert_eq!(serializer.to_json(&user).unwrap(), r#"{"id":1,"name":"Alice"}"#);
//! ```

use crate::config::SieveConfig;
use crate::context::Context;
use crate::fields::{Field, FieldMap};
use crate::sieve::{FieldContainer, QueryFields};
use miniserde::json::{self, Object, Value};
use std::fmt;

static NULL: Value = Value::Null;

/// Error rendering a record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SerializeError {
    /// A required field's source key is absent from the record.
    MissingField { field: String, source: String },
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field, source } => {
                write!(
                    f,
                    "Required field '{field}' is missing from the record (source key '{source}')"
                )
            },
        }
    }
}

impl std::error::Error for SerializeError {}

/// Write one record as a JSON object into `out`.
///
/// `entries` yields `(output name, source key, required)` in output order.
fn write_object<'a, I>(out: &mut String, record: &Object, entries: I) -> Result<(), SerializeError>
where
    I: IntoIterator<Item = (&'a str, &'a str, bool)>,
{
    out.push('{');
    for (i, (name, source, required)) in entries.into_iter().enumerate() {
        let value = match record.get(source) {
            Some(value) => value,
            None if required => {
                return Err(SerializeError::MissingField {
                    field: name.to_string(),
                    source: source.to_string(),
                });
            },
            None => &NULL,
        };
        if i > 0 {
            out.push(',');
        }
        out.push_str(&json::to_string(name));
        out.push(':');
        out.push_str(&json::to_string(value));
    }
    out.push('}');
    Ok(())
}

fn write_array<'a, I, F>(records: &[Object], entries: F) -> Result<String, SerializeError>
where
    F: Fn() -> I,
    I: IntoIterator<Item = (&'a str, &'a str, bool)>,
{
    let mut out = String::from("[");
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_object(&mut out, record, entries())?;
    }
    out.push(']');
    Ok(out)
}

// ============================================================================
// SERIALIZER
// ============================================================================

/// Serializer keeping its declared fields in `fields`.
#[derive(Debug)]
pub struct Serializer<'c> {
    fields: FieldMap<Field>,
    context: Context<'c>,
    config: SieveConfig,
}

impl<'c> Serializer<'c> {
    /// Build a serializer and sieve its fields with the default parameters.
    #[must_use]
    pub fn new(fields: FieldMap<Field>, context: Context<'c>) -> Self {
        Self::with_config(fields, context, SieveConfig::new())
    }

    /// Build a serializer and sieve its fields with `config`.
    #[must_use]
    pub fn with_config(fields: FieldMap<Field>, context: Context<'c>, config: SieveConfig) -> Self {
        let mut serializer = Self {
            fields,
            context,
            config,
        };
        serializer.sieve_fieldset(&context);
        tracing::trace!(fields = serializer.fields.len(), "serializer ready");
        serializer
    }

    /// Fields that survived sieving, in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &FieldMap<Field> {
        &self.fields
    }

    /// Names of the fields that survived sieving.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The context the serializer was built with.
    #[must_use]
    pub const fn context(&self) -> Context<'c> {
        self.context
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &str, bool)> {
        self.fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.source_for(name), field.is_required()))
    }

    /// Render one record.
    pub fn to_json(&self, record: &Object) -> Result<String, SerializeError> {
        let mut out = String::new();
        write_object(&mut out, record, self.entries())?;
        Ok(out)
    }

    /// Render a list of records as a JSON array.
    pub fn to_json_many(&self, records: &[Object]) -> Result<String, SerializeError> {
        write_array(records, || self.entries())
    }
}

impl FieldContainer for Serializer<'_> {
    type Field = Field;

    fn fields_mut(&mut self) -> &mut FieldMap<Field> {
        &mut self.fields
    }

    fn sieve_config(&self) -> &SieveConfig {
        &self.config
    }
}

// ============================================================================
// COMPILED SERIALIZER
// ============================================================================

/// A declared field resolved to its record key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    source: String,
    required: bool,
}

impl CompiledField {
    fn compile(name: &str, field: &Field) -> Self {
        Self {
            source: field.source_for(name).to_string(),
            required: field.is_required(),
        }
    }

    /// Record key the value is read from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether rendering fails when the source key is absent.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }
}

/// Serializer keeping pre-resolved fields in `compiled_fields`.
#[derive(Debug)]
pub struct CompiledSerializer<'c> {
    compiled_fields: FieldMap<CompiledField>,
    context: Context<'c>,
    config: SieveConfig,
}

impl<'c> CompiledSerializer<'c> {
    /// Compile `fields` and sieve them with the default parameters.
    #[must_use]
    pub fn new(fields: &FieldMap<Field>, context: Context<'c>) -> Self {
        Self::with_config(fields, context, SieveConfig::new())
    }

    /// Compile `fields` and sieve them with `config`.
    #[must_use]
    pub fn with_config(fields: &FieldMap<Field>, context: Context<'c>, config: SieveConfig) -> Self {
        let compiled_fields = fields
            .iter()
            .map(|(name, field)| (name.clone(), CompiledField::compile(name, field)))
            .collect();
        let mut serializer = Self {
            compiled_fields,
            context,
            config,
        };
        serializer.sieve_fieldset(&context);
        tracing::trace!(
            fields = serializer.compiled_fields.len(),
            "compiled serializer ready"
        );
        serializer
    }

    /// Compiled fields that survived sieving, in declaration order.
    #[must_use]
    pub const fn compiled_fields(&self) -> &FieldMap<CompiledField> {
        &self.compiled_fields
    }

    /// Names of the fields that survived sieving.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.compiled_fields.keys().map(String::as_str)
    }

    /// The context the serializer was built with.
    #[must_use]
    pub const fn context(&self) -> Context<'c> {
        self.context
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &str, bool)> {
        self.compiled_fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.source(), field.is_required()))
    }

    /// Render one record.
    pub fn to_json(&self, record: &Object) -> Result<String, SerializeError> {
        let mut out = String::new();
        write_object(&mut out, record, self.entries())?;
        Ok(out)
    }

    /// Render a list of records as a JSON array.
    pub fn to_json_many(&self, records: &[Object]) -> Result<String, SerializeError> {
        write_array(records, || self.entries())
    }
}

impl FieldContainer for CompiledSerializer<'_> {
    type Field = CompiledField;

    fn fields_mut(&mut self) -> &mut FieldMap<CompiledField> {
        &mut self.compiled_fields
    }

    fn sieve_config(&self) -> &SieveConfig {
        &self.config
    }
}
