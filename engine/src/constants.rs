//! Shared constants for the form binding engine

// ============================================================================
// VALUE TREE CONSTANTS
// ============================================================================

/// Object property carrying the schema type name of a domain object
pub const TYPE_TAG: &str = "_type";

/// Identifier field preserved verbatim by the clone engine
pub const ID_FIELD: &str = "id";

// ============================================================================
// VALIDATION MESSAGE CONSTANTS
// ============================================================================

/// Message suffix for empty input on a non-null field,
/// rendered as `<Type>.<path>:Field Required`
pub const MSG_FIELD_REQUIRED: &str = "Field Required";

/// Message for input that does not parse as an integer
pub const MSG_INVALID_INTEGER: &str = "Invalid Integer";

/// Message for input that does not parse as a floating point number
pub const MSG_INVALID_NUMBER: &str = "Invalid Number";

/// Message for input that does not parse as a currency amount
pub const MSG_INVALID_CURRENCY: &str = "Invalid Currency Amount";

/// Message for input that does not match the date pattern
pub const MSG_INVALID_DATE: &str = "Invalid Date (expected YYYY-MM-DD)";

/// Message for input that does not match the timestamp pattern
pub const MSG_INVALID_TIMESTAMP: &str = "Invalid Timestamp (expected YYYY-MM-DDTHH:MM:SS)";

// ============================================================================
// NUMERIC RANGE CONSTANTS
// ============================================================================

/// Largest integer exactly representable in an IEEE-754 double,
/// the range bound for `Long` scalars and currency minor units
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Negative counterpart of [`MAX_SAFE_INTEGER`]
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;
