//! Declared serializer fields.

use indexmap::IndexMap;

/// Ordered mapping from field name to field descriptor.
///
/// Sieving only ever removes entries, and removal keeps the relative order of
/// the remaining ones.
pub type FieldMap<D> = IndexMap<String, D>;

/// Descriptor of one declared output field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    source: Option<String>,
    optional: bool,
}

impl Field {
    /// A required field read from the record key of the same name.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: None,
            optional: false,
        }
    }

    /// Read the value from record key `source` instead of the field name.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Render `null` instead of failing when the source key is absent.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The record key this field reads, given its declared name.
    #[must_use]
    pub fn source_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.source.as_deref().unwrap_or(name)
    }

    /// Whether rendering fails when the source key is absent.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.optional
    }
}

/// Build a [`FieldMap`] of plain required fields, in the given order.
///
/// ```
/// use queryfields::declare_fields;
///
/// let fields = declare_fields(["id", "name", "email"]);
/// assert_eq!(fields.keys().collect::<Vec<_>>(), ["id", "name", "email"]);
/// ```
pub fn declare_fields<I, S>(names: I) -> FieldMap<Field>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(|name| (name.into(), Field::new()))
        .collect()
}
