//! Shared test utilities and fixtures.
//!
//! This module provides common helpers for integration tests.

use queryfields::{Context, FieldMap, Method, Request, SieveConfig, declare_fields, sieve_fields};

/// Create a GET request with the given URL.
#[allow(dead_code)]
pub fn get_request(url: &str) -> Request {
    Request::new(Method::Get, url)
}

/// Sieve `names` against a request and return the surviving names.
#[allow(dead_code)]
pub fn sieve_names(method: Method, url: &str, names: &[&str]) -> Vec<String> {
    let req = Request::new(method, url);
    let mut fields = declare_fields(names.iter().copied());
    sieve_fields(&mut fields, &Context::with_request(&req), &SieveConfig::new());
    fields.into_keys().collect()
}

/// Keys of a field mapping, in order.
#[allow(dead_code)]
pub fn keys<D>(fields: &FieldMap<D>) -> Vec<&str> {
    fields.keys().map(String::as_str).collect()
}

/// The user fields used throughout the scenarios.
#[allow(dead_code)]
pub const USER_FIELDS: &[&str] = &["id", "name", "email", "created_at"];
