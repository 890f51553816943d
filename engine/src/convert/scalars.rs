//! Scalar converter registry — per-type validation and conversion
//!
//! Maps scalar type names to converter entries performing bidirectional
//! conversion between domain values and their user-editable representation.
//! Registered at startup; registration replaces any existing entry for the
//! same name. An edited scalar type with no entry is a programmer error,
//! surfaced as a fatal configuration error rather than a field error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use error_stack::Report;
use once_cell::sync::Lazy;
use serde_json::{Number, Value};
use tracing::{debug, warn};

use super::currency::{CurrencyFormat, format_minor, parse_minor};
use crate::constants::{
    MAX_SAFE_INTEGER, MIN_SAFE_INTEGER, MSG_INVALID_DATE, MSG_INVALID_INTEGER, MSG_INVALID_NUMBER,
    MSG_INVALID_TIMESTAMP,
};
use crate::error::{Error, Result};
use crate::schema::TypeName;

/// Validation function: `None` means the raw value is acceptable
pub type ValidateFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// One-directional value conversion function
pub type ConvertFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Per-scalar-type converter functions
///
/// Any of the three behaviors may be disabled, in which case validation
/// always passes and conversion is the identity.
#[derive(Clone, Default)]
pub struct ConverterEntry {
    validate:    Option<ValidateFn>,
    to_editable: Option<ConvertFn>,
    to_scalar:   Option<ConvertFn>,
}

impl ConverterEntry {
    /// An entry with every behavior disabled — always valid, identity both ways
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Attach a validation function
    #[must_use]
    pub fn with_validate(
        mut self,
        validate: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Attach a domain-to-editable conversion
    #[must_use]
    pub fn with_to_editable(
        mut self,
        convert: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.to_editable = Some(Arc::new(convert));
        self
    }

    /// Attach an editable-to-domain conversion
    #[must_use]
    pub fn with_to_scalar(
        mut self,
        convert: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.to_scalar = Some(Arc::new(convert));
        self
    }
}

impl std::fmt::Debug for ConverterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterEntry")
            .field("validate", &self.validate.is_some())
            .field("to_editable", &self.to_editable.is_some())
            .field("to_scalar", &self.to_scalar.is_some())
            .finish()
    }
}

/// Registry of scalar converter entries keyed by type name
#[derive(Debug, Clone, Default)]
pub struct ScalarConverters {
    entries: HashMap<TypeName, ConverterEntry>,
}

impl ScalarConverters {
    /// An empty registry with no entries
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the baseline primitive entries
    ///
    /// Covers `String`, `Boolean`, the range-checked integer family
    /// (`Byte`, `Short`, `Int`, `Long`), `Float`, fixed-point `Currency`
    /// with the default display format, and pattern-validated `Date` /
    /// `DateTime` strings.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("String", ConverterEntry::passthrough());
        registry.register("Boolean", boolean_entry());
        registry.register("Byte", integer_entry(-128, 127));
        registry.register("Short", integer_entry(-32_768, 32_767));
        registry.register("Int", integer_entry(i64::from(i32::MIN), i64::from(i32::MAX)));
        registry.register("Long", integer_entry(MIN_SAFE_INTEGER, MAX_SAFE_INTEGER));
        registry.register("Float", float_entry());
        registry.register("Currency", currency_entry(CurrencyFormat::default()));
        registry.register("Date", date_entry());
        registry.register("DateTime", datetime_entry());
        registry
    }

    /// Register an entry for a scalar type, replacing any existing one
    pub fn register(&mut self, name: impl Into<TypeName>, entry: ConverterEntry) {
        let name = name.into();
        if self.entries.insert(name.clone(), entry).is_some() {
            debug!(type_name = %name, "replacing scalar converter entry");
        }
    }

    /// Whether an entry is registered for the type name
    pub fn contains(&self, name: &TypeName) -> bool {
        self.entries.contains_key(name)
    }

    /// Validate a raw user value against a scalar type
    ///
    /// The empty input string is always valid — required-ness is an
    /// orthogonal concern handled by the change orchestrator.
    ///
    /// # Errors
    /// [`Error::UnregisteredScalar`] when no entry exists for the name.
    pub fn validate(&self, name: &TypeName, raw: &str) -> Result<Option<String>> {
        let entry = self.require_entry(name)?;
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(entry.validate.as_ref().and_then(|validate| validate(raw)))
    }

    /// Convert a domain value to its editable representation
    ///
    /// `Null` converts to the empty string regardless of type.
    ///
    /// # Errors
    /// [`Error::UnregisteredScalar`] when no entry exists for the name.
    pub fn to_editable(&self, name: &TypeName, domain: &Value) -> Result<Value> {
        let entry = self.require_entry(name)?;
        if domain.is_null() {
            return Ok(Value::String(String::new()));
        }
        Ok(entry
            .to_editable
            .as_ref()
            .map_or_else(|| domain.clone(), |convert| convert(domain)))
    }

    /// Convert an editable value back to its domain representation
    ///
    /// The empty string converts to `Null` regardless of type.
    ///
    /// # Errors
    /// [`Error::UnregisteredScalar`] when no entry exists for the name.
    pub fn to_scalar(&self, name: &TypeName, editable: &Value) -> Result<Value> {
        let entry = self.require_entry(name)?;
        if editable.as_str() == Some("") {
            return Ok(Value::Null);
        }
        Ok(entry
            .to_scalar
            .as_ref()
            .map_or_else(|| editable.clone(), |convert| convert(editable)))
    }

    fn require_entry(&self, name: &TypeName) -> Result<&ConverterEntry> {
        self.entries.get(name).ok_or_else(|| {
            Report::new(Error::UnregisteredScalar {
                type_name: name.clone(),
            })
        })
    }
}

/// Process-wide default registry carrying the baseline entries
///
/// Constructor injection remains the primary API; this instance exists for
/// the "register once, use everywhere" convenience when no custom scalar
/// types are needed.
pub fn default_converters() -> &'static ScalarConverters {
    static DEFAULT: Lazy<ScalarConverters> = Lazy::new(ScalarConverters::builtin);
    &DEFAULT
}

fn number_to_string(value: &Value) -> Value {
    match value {
        Value::Number(number) => Value::String(number.to_string()),
        other => other.clone(),
    }
}

fn boolean_entry() -> ConverterEntry {
    // Checkbox-backed: the editable value is already a boolean, but string
    // forms from text-based widgets are tolerated
    ConverterEntry::passthrough().with_to_scalar(|editable| match editable {
        Value::String(text) => match text.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => {
                warn!(value = other, "unrecognized boolean text coerced to null");
                Value::Null
            }
        },
        other => other.clone(),
    })
}

fn integer_entry(min: i64, max: i64) -> ConverterEntry {
    ConverterEntry::passthrough()
        .with_validate(move |raw| match raw.trim().parse::<i64>() {
            Err(_) => Some(MSG_INVALID_INTEGER.to_string()),
            Ok(parsed) if parsed < min || parsed > max => {
                Some(format!("Value out of range ({min} to {max})"))
            }
            Ok(_) => None,
        })
        .with_to_editable(number_to_string)
        .with_to_scalar(|editable| {
            editable
                .as_str()
                .and_then(|text| text.trim().parse::<i64>().ok())
                .map_or_else(
                    || {
                        warn!(value = %editable, "unvalidated integer reached conversion");
                        Value::Null
                    },
                    |parsed| Value::Number(Number::from(parsed)),
                )
        })
}

fn float_entry() -> ConverterEntry {
    ConverterEntry::passthrough()
        .with_validate(|raw| {
            raw.trim()
                .parse::<f64>()
                .is_err()
                .then(|| MSG_INVALID_NUMBER.to_string())
        })
        .with_to_editable(number_to_string)
        .with_to_scalar(|editable| {
            editable
                .as_str()
                .and_then(|text| text.trim().parse::<f64>().ok())
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number)
        })
}

fn currency_entry(format: CurrencyFormat) -> ConverterEntry {
    let validate_format = format.clone();
    let editable_format = format.clone();
    ConverterEntry::passthrough()
        .with_validate(move |raw| parse_minor(raw, &validate_format).err())
        .with_to_editable(move |domain| {
            domain.as_i64().map_or_else(
                || domain.clone(),
                |minor| Value::String(format_minor(minor, &editable_format)),
            )
        })
        .with_to_scalar(move |editable| {
            editable
                .as_str()
                .and_then(|text| parse_minor(text, &format).ok())
                .map_or(Value::Null, |minor| Value::Number(Number::from(minor)))
        })
}

fn date_entry() -> ConverterEntry {
    ConverterEntry::passthrough().with_validate(|raw| {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .is_err()
            .then(|| MSG_INVALID_DATE.to_string())
    })
}

fn datetime_entry() -> ConverterEntry {
    ConverterEntry::passthrough().with_validate(|raw| {
        NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S")
            .is_err()
            .then(|| MSG_INVALID_TIMESTAMP.to_string())
    })
}
