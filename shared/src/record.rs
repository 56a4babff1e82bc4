//! Employee records and the edit buffer
//!
//! A record is a flat map from canonical field name to value, produced by
//! normalizing one raw backend row. Edits never touch the displayed record
//! directly: they go through an [`EditBuffer`] working copy and are
//! committed atomically on save or dropped on cancel.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize;

/// Canonical name of the user-code field.
pub const USER_CODE_FIELD: &str = "CUSERID";

/// Suffix marking a canonical field as a lookup foreign key.
pub const ID_SUFFIX: &str = "ID";

/// Value domain of a record cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Foreign key or numeric scalar.
    Int(i64),
    /// Plain string, including `yyyy-MM-dd` date strings.
    Text(String),
    /// Explicit backend null, a cleared date, or a failed numeric parse.
    Null,
}

impl FieldValue {
    /// Interpret the value as a lookup id.
    ///
    /// `Text` holding a base-10 integer counts; the backend is not
    /// consistent about whether foreign keys arrive as numbers or strings.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Int(id) => Some(*id),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Null => None,
        }
    }

    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Blank means "absent" for gating and payload purposes: null, the
    /// empty string, or a zero id.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Int(id) => *id == 0,
        }
    }
}

impl From<&Value> for FieldValue {
    /// Total conversion from raw JSON. Integral numbers become ids, strings
    /// stay strings, null stays null; any other shape degrades to its
    /// serialized text rather than failing the row.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Number(n) => match n.as_i64() {
                Some(id) => Self::Int(id),
                None => Self::Text(n.to_string()),
            },
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A normalized employee record: canonical field name -> value.
///
/// Only the key normalizer produces canonical names, so unknown backend
/// fields are retained and still address predictably.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord(HashMap<String, FieldValue>);

impl EmployeeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from one raw backend row, normalizing every key.
    pub fn from_raw(row: &serde_json::Map<String, Value>) -> Self {
        Self(normalize::normalize_keys(row))
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.0.insert(field.into(), value);
    }

    /// The field's text content, if present and textual.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// True when the field is missing or blank (null, empty, zero).
    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).is_none_or(FieldValue::is_blank)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in no particular order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for EmployeeRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether a raw string is an acceptable user code (`C` followed by up to
/// nine decimal digits, full-string match).
pub fn is_valid_user_code(raw: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new("^C[0-9]{0,9}$").expect("literal pattern"))
        .is_match(raw)
}

/// Working copy of a record while the edit surface is open.
///
/// Created by cloning the displayed record (or empty for creation flows),
/// mutated only through [`EditBuffer::apply`] and [`EditBuffer::apply_date`],
/// and either committed atomically via [`EditBuffer::into_record`] or
/// dropped on cancel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBuffer(EmployeeRecord);

impl EditBuffer {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self(record.clone())
    }

    /// The buffer contents, for rendering the edit surface.
    pub fn record(&self) -> &EmployeeRecord {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Apply one raw edit. Returns whether the value was accepted.
    ///
    /// The user-code field only accepts the empty string or a valid user
    /// code; anything else leaves the buffer untouched. Other fields ending
    /// in `ID` are parsed as base-10 integers, storing null when the input
    /// does not parse. Everything else is stored verbatim as text.
    pub fn apply(&mut self, field: &str, raw: &str) -> bool {
        if field == USER_CODE_FIELD {
            if raw.is_empty() || is_valid_user_code(raw) {
                self.0.set(field, FieldValue::Text(raw.to_string()));
                return true;
            }
            tracing::debug!(field, "Rejected user-code edit");
            return false;
        }

        let value = if field.ends_with(ID_SUFFIX) {
            raw.trim()
                .parse()
                .map(FieldValue::Int)
                .unwrap_or(FieldValue::Null)
        } else {
            FieldValue::Text(raw.to_string())
        };
        self.0.set(field, value);
        true
    }

    /// Date entry point: stores `yyyy-MM-dd` (zero padded), or clears the
    /// field when no date is given.
    pub fn apply_date(&mut self, field: &str, date: Option<NaiveDate>) {
        let value = match date {
            Some(date) => FieldValue::Text(date.format("%Y-%m-%d").to_string()),
            None => FieldValue::Null,
        };
        self.0.set(field, value);
    }

    /// Consume the buffer, yielding the record to display.
    pub fn into_record(self) -> EmployeeRecord {
        self.0
    }
}
