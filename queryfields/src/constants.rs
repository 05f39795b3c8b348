//! Centralized constants for the queryfields crate.
//!
//! All defaults and limits are defined here for easy tuning and consistent
//! behavior across the crate.

// ============================================================================
// QUERY-STRING CONTRACT
// ============================================================================

/// Default query parameter listing the fields to keep.
///
/// If the API also exposes query filters, this name must not clash with any
/// filterable field name.
pub const DEFAULT_INCLUDE_ARG: &str = "fields";

/// Default query parameter listing the fields to drop.
pub const DEFAULT_EXCLUDE_ARG: &str = "fields!";

/// Default separator between field names inside one parameter value.
///
/// Any non-empty string works. Avoid the RFC 1738 reserved characters
/// `;`, `/`, `?`, `:`, `@`, `=` and `&`.
pub const DEFAULT_DELIMITER: &str = ",";

/// The only request method that is ever sieved.
pub const SIEVED_METHOD: &str = "GET";

// ============================================================================
// HTTP REQUEST LIMITS
// ============================================================================

/// Maximum decoded URL component length (64KB).
/// Prevents DoS via extremely long encoded URLs.
pub const MAX_URL_DECODED_LEN: usize = 65536;

// ============================================================================
// CONFIGURATION KEYS
// ============================================================================

/// Environment variable overriding the include parameter name.
pub const ENV_INCLUDE_ARG: &str = "QUERYFIELDS_INCLUDE_ARG";

/// Environment variable overriding the exclude parameter name.
pub const ENV_EXCLUDE_ARG: &str = "QUERYFIELDS_EXCLUDE_ARG";

/// Environment variable overriding the delimiter.
pub const ENV_DELIMITER: &str = "QUERYFIELDS_DELIMITER";

