//! Operator session context
//!
//! The backend expects the submitting operator's user code in every insert
//! payload (`Entered_By`). It has to come from an authenticated session;
//! there is no default value.

use thiserror::Error;

use crate::record;

/// Session error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The operator code is empty or not a valid user code
    #[error("invalid operator user code: {0:?}")]
    InvalidUserCode(String),
}

/// Identity of the operator performing submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    entered_by: String,
}

impl SessionContext {
    /// Create a session for the given operator user code.
    ///
    /// The code must match the user-code format; an empty code is rejected
    /// even though the edit surface accepts clearing the field.
    pub fn new(user_code: impl Into<String>) -> Result<Self, SessionError> {
        let user_code = user_code.into();
        if user_code.is_empty() || !record::is_valid_user_code(&user_code) {
            return Err(SessionError::InvalidUserCode(user_code));
        }
        Ok(Self {
            entered_by: user_code,
        })
    }

    /// The operator code injected into submit payloads.
    pub fn entered_by(&self) -> &str {
        &self.entered_by
    }
}
