//! Serializer context and the request interface it carries.
//!
//! A serializer receives a [`Context`] when it is built. During a
//! request/response cycle the context holds the current request; outside of
//! one (nested composition, schema generation, background jobs) it is empty
//! and no field sieving happens.

use crate::request::{QueryParams, Request};

/// Read-only view of a host framework's request.
///
/// Only [`method`](Self::method) is required. Query parameters are looked up
/// through the accessors in order: [`query_params`](Self::query_params),
/// then [`legacy_query_params`](Self::legacy_query_params), then the raw
/// [`query_string`](Self::query_string) parsed on the spot.
///
/// # Example
///
/// ```
/// use queryfields::RequestContext;
///
/// struct Incoming {
///     method: String,
///     query: String,
/// }
///
/// impl RequestContext for Incoming {
///     fn method(&self) -> Option<&str> {
///         Some(&self.method)
///     }
///
///     fn query_string(&self) -> Option<&str> {
///         Some(&self.query)
///     }
/// }
/// ```
pub trait RequestContext {
    /// The request method, e.g. `"GET"`. `None` if the host doesn't know it.
    fn method(&self) -> Option<&str>;

    /// Parsed query parameters, if the host has them.
    fn query_params(&self) -> Option<&QueryParams> {
        None
    }

    /// Query parameters under an older accessor some hosts still expose.
    fn legacy_query_params(&self) -> Option<&QueryParams> {
        None
    }

    /// Raw query string without the leading `?`.
    fn query_string(&self) -> Option<&str> {
        None
    }
}

impl RequestContext for Request {
    fn method(&self) -> Option<&str> {
        Some(Self::method(self).as_str())
    }

    fn query_params(&self) -> Option<&QueryParams> {
        Some(Self::query_params(self))
    }

    fn query_string(&self) -> Option<&str> {
        self.raw_query()
    }
}

/// Context handed to a serializer at construction time.
#[derive(Clone, Copy, Default)]
pub struct Context<'r> {
    request: Option<&'r dyn RequestContext>,
}

impl<'r> Context<'r> {
    /// A context with no request.
    #[must_use]
    pub const fn empty() -> Self {
        Self { request: None }
    }

    /// A context carrying `request`.
    #[must_use]
    pub fn with_request(request: &'r dyn RequestContext) -> Self {
        Self {
            request: Some(request),
        }
    }

    /// The current request, if any.
    #[must_use]
    pub fn request(&self) -> Option<&'r dyn RequestContext> {
        self.request
    }

    /// Whether a request is attached.
    #[must_use]
    pub const fn has_request(&self) -> bool {
        self.request.is_some()
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("method", &self.request.and_then(|request| request.method()))
            .finish()
    }
}
