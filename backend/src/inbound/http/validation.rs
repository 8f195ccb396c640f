//! Parsing helpers shared by the HTTP handlers.
//!
//! Identifiers arrive as strings in paths, query strings and bodies. They are
//! parsed here so a malformed UUID becomes `invalid_request` naming the field
//! before any port is called.

use std::str::FromStr;

use serde_json::json;

use crate::domain::validation::Violations;
use crate::domain::{Error, ViolationCode};

const INVALID_UUID: &str = "invalid_uuid";

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": INVALID_UUID,
    }))
}

fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must contain valid UUIDs")).with_details(json!({
        "field": field,
        "index": index,
        "value": value,
        "code": INVALID_UUID,
    }))
}

/// Parse a typed entity id.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr,
{
    value
        .parse::<T>()
        .map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an id that may be absent. Absence is left for domain validation.
pub(crate) fn parse_optional_id<T>(value: Option<&str>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr,
{
    value.map(|raw| parse_id(raw, field)).transpose()
}

/// Parse a required body id into `violations`. Blank strings count as
/// absent; absent ids are recorded as `missing`, malformed ones as
/// `invalid_format`.
pub(crate) fn collect_body_id<T>(
    violations: &mut Violations,
    value: Option<&str>,
    field: FieldName,
) -> Option<T>
where
    T: FromStr,
{
    let name = field.as_str();
    let raw = violations.required(name, value.map(str::trim).filter(|raw| !raw.is_empty()))?;
    let parsed = raw.parse::<T>().ok();
    if parsed.is_none() {
        violations.push(
            name,
            ViolationCode::InvalidFormat,
            format!("{name} must be a valid UUID"),
        );
    }
    parsed
}

/// Parse a list of ids, reporting the index of the first malformed entry.
pub(crate) fn parse_id_list<T>(values: &[String], field: FieldName) -> Result<Vec<T>, Error>
where
    T: FromStr,
{
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .parse::<T>()
                .map_err(|_| invalid_uuid_index_error(field, index, value))
        })
        .collect()
}
