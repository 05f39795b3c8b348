//! Request-driven field sieving.
//!
//! A GET request may narrow a serializer's output with two query parameters:
//!
//! - `fields=a,b` keeps only `a` and `b`
//! - `fields!=c` drops `c`
//!
//! Both are repeatable (values are unioned) and may be combined, in which case
//! exclusion wins: `?fields=id,name&fields!=name` keeps only `id`. Empty names
//! from stray delimiters are ignored.
//!
//! Sieving never fails. Without a request, for any method other than `GET`,
//! or when the request exposes no query parameters, the field mapping is left
//! untouched.
//!
//! # Example
//!
//! ```
//! use queryfields::{Context, Method, Request, SieveConfig, declare_fields, sieve_fields};
//!
//! let req = Request::new(Method::Get, "/users?fields=name,email");
//! let mut fields = declare_fields(["id", "name", "email", "created_at"]);
//!
//! sieve_fields(&mut fields, &Context::with_request(&req), &SieveConfig::new());
//! assert_eq!(fields.keys().collect::<Vec<_>>(), ["name", "email"]);
//! ```

use crate::config::{DEFAULT_CONFIG, SieveConfig};
use crate::constants::SIEVED_METHOD;
use crate::context::Context;
use crate::fields::FieldMap;
use crate::request::QueryParams;
use std::collections::HashSet;

/// Field names requested for inclusion and exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fieldset {
    included: HashSet<String>,
    excluded: HashSet<String>,
}

impl Fieldset {
    /// Build a fieldset from explicit name lists.
    #[must_use]
    pub fn new<I, E, S>(included: I, excluded: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            included: included.into_iter().map(Into::into).collect(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the fieldset from query parameters.
    ///
    /// Every value of the include and exclude parameters is split on the
    /// configured delimiter; empty names are discarded.
    #[must_use]
    pub fn from_query(params: &QueryParams, config: &SieveConfig) -> Self {
        Self {
            included: split_names(&params.get_list(config.include_arg_name()), config),
            excluded: split_names(&params.get_list(config.exclude_arg_name()), config),
        }
    }

    /// Names to keep. Empty means "keep everything not excluded".
    #[must_use]
    pub const fn included(&self) -> &HashSet<String> {
        &self.included
    }

    /// Names to drop.
    #[must_use]
    pub const fn excluded(&self) -> &HashSet<String> {
        &self.excluded
    }

    /// Whether no filtering was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }

    /// Whether a field named `name` survives this fieldset.
    ///
    /// Exclusion is checked first, so a name listed in both sets is dropped.
    #[must_use]
    pub fn keeps(&self, name: &str) -> bool {
        if self.excluded.contains(name) {
            return false;
        }
        self.included.is_empty() || self.included.contains(name)
    }

    /// The subset of `names` this fieldset drops, in input order.
    pub fn fields_to_drop<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().filter(|name| !self.keeps(name)).collect()
    }
}

fn split_names(values: &[&str], config: &SieveConfig) -> HashSet<String> {
    values
        .iter()
        .flat_map(|value| value.split(config.delimiter()))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Work out the fieldset a request asks for.
///
/// Returns `None` when no sieving applies: no request in the context, a
/// request without a method, a method other than `GET`, no query parameters,
/// or neither parameter present.
#[must_use]
pub fn resolve_fieldset(context: &Context<'_>, config: &SieveConfig) -> Option<Fieldset> {
    let request = context.request()?;
    if request.method()? != SIEVED_METHOD {
        return None;
    }

    // An accessor that exists but is empty falls through to the next one
    let fieldset = match request
        .query_params()
        .filter(|params| !params.is_empty())
        .or_else(|| request.legacy_query_params())
        .filter(|params| !params.is_empty())
    {
        Some(params) => Fieldset::from_query(params, config),
        None => Fieldset::from_query(&QueryParams::parse(request.query_string()?), config),
    };

    if fieldset.is_empty() {
        return None;
    }
    Some(fieldset)
}

/// Remove every field `fieldset` does not keep. Returns how many were removed.
///
/// The remaining fields keep their relative order.
pub fn drop_fields<D>(fields: &mut FieldMap<D>, fieldset: &Fieldset) -> usize {
    let to_drop: Vec<String> = fieldset
        .fields_to_drop(fields.keys().map(String::as_str))
        .into_iter()
        .map(str::to_string)
        .collect();
    for name in &to_drop {
        fields.shift_remove(name);
    }
    let dropped = to_drop.len();

    if dropped > 0 {
        tracing::debug!(dropped, retained = fields.len(), "sieved serializer fields");
    }
    dropped
}

/// Sieve `fields` in place according to the request in `context`.
///
/// A no-op unless the context holds a `GET` request carrying the include or
/// exclude parameter.
pub fn sieve_fields<D>(fields: &mut FieldMap<D>, context: &Context<'_>, config: &SieveConfig) {
    if let Some(fieldset) = resolve_fieldset(context, config) {
        drop_fields(fields, &fieldset);
    }
}

/// A serializer that owns a sievable field mapping.
///
/// Implementors say where their declared fields live; sieving itself comes
/// from [`QueryFields`].
pub trait FieldContainer {
    /// Field descriptor type.
    type Field;

    /// The mapping of declared output fields.
    fn fields_mut(&mut self) -> &mut FieldMap<Self::Field>;

    /// Parameter names and delimiter. Defaults to `fields`, `fields!`, `,`.
    fn sieve_config(&self) -> &SieveConfig {
        &DEFAULT_CONFIG
    }
}

/// Query-driven sieving for any [`FieldContainer`].
///
/// Call [`sieve_fieldset`](Self::sieve_fieldset) once, at the end of
/// construction and before the serializer produces output.
pub trait QueryFields: FieldContainer {
    /// Drop the fields the request in `context` does not ask for.
    fn sieve_fieldset(&mut self, context: &Context<'_>) {
        if let Some(fieldset) = resolve_fieldset(context, self.sieve_config()) {
            drop_fields(self.fields_mut(), &fieldset);
        }
    }
}

impl<T: FieldContainer + ?Sized> QueryFields for T {}
