//! Outbound payload construction
//!
//! Maps a displayed record onto the backend's insert body for one page:
//! canonical names become the backend's mixed-case payload names, blank
//! values become JSON null, and the operator code is injected.

use serde_json::{Map, Value};

use crate::pages::PageSchema;
use crate::record::{EmployeeRecord, FieldValue};
use crate::session::SessionContext;

/// Backend payload field carrying the submitting operator.
pub const ENTERED_BY_FIELD: &str = "Entered_By";

/// Build the insert body for one page.
///
/// Every mapped backend field is present in the body. Blank values
/// (missing field, null, empty string, zero id) are sent as JSON null,
/// never as `""` or `0`.
pub fn build(
    schema: &PageSchema,
    record: &EmployeeRecord,
    session: &SessionContext,
) -> Map<String, Value> {
    let mut body = Map::new();
    for (canonical, backend) in schema.payload_fields {
        body.insert((*backend).to_string(), outbound_value(record.get(canonical)));
    }
    body.insert(
        ENTERED_BY_FIELD.to_string(),
        Value::String(session.entered_by().to_string()),
    );
    body
}

fn outbound_value(value: Option<&FieldValue>) -> Value {
    match value {
        Some(value) if !value.is_blank() => match value {
            FieldValue::Int(id) => Value::from(*id),
            FieldValue::Text(text) => Value::from(text.as_str()),
            FieldValue::Null => Value::Null,
        },
        _ => Value::Null,
    }
}
