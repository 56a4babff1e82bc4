//! HR Ops Client - HTTP client and form controllers for the HR backend
//!
//! Provides network access to the HR administration API and the generic
//! record-form controller that drives every lifecycle page (roll-on,
//! roll-off, team movement).

pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod lookup_cache;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use form::{FormController, FormState, SearchOutcome, SubmitOutcome};
pub use http::{HrApi, HttpClient};
pub use lookup_cache::LookupCache;

// Re-export shared types for convenience
pub use shared::client::{SubmitAck, VerifyResponse};
pub use shared::{EmployeeRecord, LookupTable, PageSchema, SessionContext};
