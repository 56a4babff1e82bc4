//! Lookup reference data
//!
//! The backend serves one table of reference values, keyed by numeric
//! category id. Foreign-key fields on records point into it; anything that
//! cannot be resolved displays as the [`UNRESOLVED`] sentinel.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::FieldValue;

/// Sentinel label for anything that cannot be resolved.
pub const UNRESOLVED: &str = "TBD";

/// Well-known lookup category ids served by the backend.
pub mod category {
    pub const EMPLOYER: i64 = 6;
    pub const SERVICE_LINE: i64 = 7;
    pub const BASE_LOCATION: i64 = 8;
    pub const ROLL_OFF: i64 = 11;
    pub const EMPLOYEE_SOURCE: i64 = 13;
    pub const ROLL_OFF_REASON: i64 = 14;
    pub const ROLL_OFF_REMARKS: i64 = 15;
    pub const GENDER: i64 = 16;
    pub const ORGANIZATION: i64 = 17;
    pub const PRODUCTION_LINE: i64 = 18;
}

/// One selectable value within a lookup category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupValue {
    #[serde(rename = "LookUpValueID")]
    pub value_id: i64,
    #[serde(rename = "LookUpValueName")]
    pub label: String,
}

/// Reference table: category id -> ordered values.
///
/// Loaded once per page instance and immutable afterwards. Order within a
/// category follows the server response and is preserved for selector
/// display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTable(HashMap<i64, Vec<LookupValue>>);

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of one category, in server order. Unknown categories yield an
    /// empty slice.
    pub fn values(&self, category: i64) -> &[LookupValue] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of categories present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a foreign-key value to its display label.
    ///
    /// Absent, null, zero and non-integral values resolve to [`UNRESOLVED`],
    /// as does an unknown category or an unmatched value id. Total over its
    /// domain; never panics.
    pub fn resolve(&self, category: i64, value: Option<&FieldValue>) -> &str {
        let Some(id) = value.and_then(FieldValue::as_id) else {
            return UNRESOLVED;
        };
        if id == 0 {
            return UNRESOLVED;
        }
        self.values(category)
            .iter()
            .find(|entry| entry.value_id == id)
            .map(|entry| entry.label.as_str())
            .unwrap_or(UNRESOLVED)
    }
}

impl FromIterator<(i64, Vec<LookupValue>)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (i64, Vec<LookupValue>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
