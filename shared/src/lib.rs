//! Shared types for the HR administration forms
//!
//! Data layer used by the client crate: backend key normalization, lookup
//! resolution, the record/edit-buffer model, page schemas and outbound
//! payload construction.

pub mod client;
pub mod lookup;
pub mod normalize;
pub mod pages;
pub mod payload;
pub mod record;
pub mod session;

// Re-exports
pub use lookup::{LookupTable, LookupValue, UNRESOLVED};
pub use pages::PageSchema;
pub use record::{EditBuffer, EmployeeRecord, FieldValue};
pub use serde::{Deserialize, Serialize};
pub use session::{SessionContext, SessionError};
