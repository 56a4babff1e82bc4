//! Backend key normalization
//!
//! Backend rows arrive with inconsistent key casing (`employeeId`,
//! `EmployeeNo`, `rolloffdate`). Everything downstream addresses fields by
//! canonical name: a trailing lowercase-`d` `Id` is rewritten to `ID`, then
//! the whole key is uppercased. Values pass through untouched apart from
//! mapping into the [`FieldValue`] domain.

use std::collections::HashMap;

use serde_json::Value;

use crate::record::FieldValue;

/// Canonical form of a single backend key.
///
/// `"employeeId"` -> `"EMPLOYEEID"`, `"Sl_No"` -> `"SL_NO"`,
/// `"ROLLOFFDATE"` -> `"ROLLOFFDATE"`.
pub fn canonical_key(raw: &str) -> String {
    match raw.strip_suffix("Id") {
        Some(stem) => format!("{stem}ID").to_uppercase(),
        None => raw.to_uppercase(),
    }
}

/// Normalize every key of one raw backend row.
///
/// Distinct raw keys can collapse onto the same canonical key; the later
/// one (in input iteration order) wins. Last write wins is documented
/// behavior, not an error.
pub fn normalize_keys(row: &serde_json::Map<String, Value>) -> HashMap<String, FieldValue> {
    let mut out = HashMap::with_capacity(row.len());
    for (key, value) in row {
        out.insert(canonical_key(key), FieldValue::from(value));
    }
    out
}
