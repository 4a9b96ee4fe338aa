//! Query parameter validation.
//!
//! # Responsibilities
//! - Hold the raw name → values input of one request
//! - Enforce the parameter name-safety predicate
//! - Enforce the per-value length limit
//! - Sanitize accepted values for echoing
//!
//! # Design Decisions
//! - All or nothing: the first violation aborts and partial results are
//!   dropped
//! - Names are checked in sorted order so the reported violation is
//!   deterministic
//! - Only the first value per name is considered
//! - No regex: the name predicate is a byte-class check

use std::collections::BTreeMap;

use crate::http::error::EndpointError;
use crate::security::sanitize;

/// Maximum accepted length of a parameter value, in UTF-16 code units.
pub const MAX_PARAM_LENGTH: usize = 256;

/// Validated name → sanitized first value. Absent values stay absent.
pub type SanitizedParameters = BTreeMap<String, Option<String>>;

/// Raw request parameters: name → ordered values, any of which may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    entries: BTreeMap<String, Vec<Option<String>>>,
}

impl RawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL query string (without the leading `?`).
    ///
    /// Values are percent-decoded; repeated names append in order.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.push(name.into_owned(), value.into_owned());
        }
        params
    }

    /// Append a present value for `name`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(Some(value.into()));
    }

    /// Replace all values for `name`.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Option<String>>) {
        self.entries.insert(name.into(), values);
    }

    pub fn get(&self, name: &str) -> Option<&[Option<String>]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Option<String>>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Option<String>>)> for RawParameters {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Option<String>>)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, values) in iter {
            params.insert(name, values);
        }
        params
    }
}

/// Returns true if `name` is non-blank and made only of ASCII letters,
/// digits, `_` or `-`.
pub fn is_valid_parameter_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Validates and sanitizes raw request parameters.
/// Length as counted by UTF-16 clients: characters outside the Basic
/// Multilingual Plane take two units.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterValidator {
    debug_logging: bool,
}

impl ParameterValidator {
    pub fn new(debug_logging: bool) -> Self {
        Self { debug_logging }
    }

    pub fn validate(&self, raw: &RawParameters) -> Result<SanitizedParameters, EndpointError> {
        let mut sanitized = SanitizedParameters::new();

        for (name, values) in raw.iter() {
            if !is_valid_parameter_name(name) {
                tracing::warn!(name = %name, "Invalid parameter name detected");
                return Err(EndpointError::InvalidParameterName(name.clone()));
            }

            let Some(first) = values.first() else {
                continue;
            };

            if let Some(value) = first {
                if utf16_len(value) > MAX_PARAM_LENGTH {
                    tracing::warn!(name = %name, "Parameter value exceeds max length");
                    return Err(EndpointError::ParameterTooLong(name.clone()));
                }
            }

            let value = sanitize(first.as_deref());
            if self.debug_logging {
                tracing::debug!(name = %name, value = ?value, "Sanitized parameter");
            }
            sanitized.insert(name.clone(), value);
        }

        Ok(sanitized)
    }
}
