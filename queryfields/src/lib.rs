//! # queryfields
//!
//! Request-driven field filtering for API serializers.
//!
//! Clients of a GET endpoint pick the fields they want with `?fields=a,b` or
//! drop the ones they don't with `?fields!=c`. The serializer's field mapping
//! is pruned once, when the serializer is built, before anything is rendered.
//!
//! ```
//! use queryfields::{Context, Method, Request, Serializer, declare_fields};
//!
//! let req = Request::new(Method::Get, "/users?fields=id,name&fields!=name");
//! let serializer = Serializer::new(
//!     declare_fields(["id", "name", "email"]),
//!     Context::with_request(&req),
//! );
//!
//! assert_eq!(serializer.field_names().collect::<Vec<_>>(), ["id"]);
//! ```
//!
//! ## Query-string contract
//!
//! | Parameter | Meaning                                   |
//! |-----------|-------------------------------------------|
//! | `fields`  | comma-separated names to keep             |
//! | `fields!` | comma-separated names to drop (wins)      |
//!
//! Both parameters may repeat; their values are unioned. Empty names are
//! ignored. Only `GET` requests are sieved, and a serializer built without a
//! request keeps all of its fields.
//!
//! ## Your own serializers
//!
//! Implement [`FieldContainer`] to say where the field mapping lives, then call
//! [`QueryFields::sieve_fieldset`] at the end of construction:
//!
//! ```
//! use queryfields::{Context, FieldContainer, FieldMap, QueryFields};
//!
//! struct Report {
//!     columns: FieldMap<usize>,
//! }
//!
//! impl FieldContainer for Report {
//!     type Field = usize;
//!
//!     fn fields_mut(&mut self) -> &mut FieldMap<usize> {
//!         &mut self.columns
//!     }
//! }
//!
//! impl Report {
//!     fn new(columns: FieldMap<usize>, context: &Context<'_>) -> Self {
//!         let mut report = Self { columns };
//!         report.sieve_fieldset(context);
//!         report
//!     }
//! }
//! ```

pub mod config;
pub mod constants;
pub mod context;
pub mod fields;
pub mod request;
pub mod serializer;
pub mod sieve;

pub use config::{ArgKind, ConfigError, SieveConfig, SieveConfigBuilder};
pub use context::{Context, RequestContext};
pub use fields::{Field, FieldMap, declare_fields};
pub use request::{DecodeError, Method, QueryParams, Request, url_decode};
pub use serializer::{CompiledField, CompiledSerializer, SerializeError, Serializer};
pub use sieve::{FieldContainer, Fieldset, QueryFields, drop_fields, resolve_fieldset, sieve_fields};
