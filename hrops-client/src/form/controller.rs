//! Generic record-form controller

use chrono::NaiveDate;
use shared::pages::PageSchema;
use shared::payload;
use shared::record::{EditBuffer, EmployeeRecord};
use shared::session::SessionContext;
use shared::{LookupValue, UNRESOLVED};

use crate::error::{ClientError, ClientResult};
use crate::form::state::FormState;
use crate::http::HrApi;
use crate::lookup_cache::LookupCache;

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// One record loaded (first row when the backend returns several).
    Found,
    /// The backend answered with zero rows.
    NoData,
    /// A newer search was issued while this one was in flight; its result
    /// was discarded.
    Superseded,
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Server confirmation message, or a generic fallback.
    pub message: String,
}

/// Drives one record-form page against the backend.
///
/// Holds the page's lookup cache, the displayed record, the status gate
/// from the last verification, and the edit buffer while the edit surface
/// is open. All operations take `&mut self`, so a page cannot run two
/// operations concurrently.
pub struct FormController<A> {
    schema: &'static PageSchema,
    api: A,
    lookups: LookupCache,
    state: FormState,
    status: Option<i64>,
    record: Option<EmployeeRecord>,
    history: Vec<EmployeeRecord>,
    buffer: Option<EditBuffer>,
    search_seq: u64,
}

impl<A: HrApi> FormController<A> {
    /// Create a controller for one page.
    pub fn new(schema: &'static PageSchema, api: A) -> Self {
        Self {
            schema,
            api,
            lookups: LookupCache::new(),
            state: FormState::Idle,
            status: None,
            record: None,
            history: Vec::new(),
            buffer: None,
            search_seq: 0,
        }
    }

    // ========== Read access ==========

    pub fn schema(&self) -> &'static PageSchema {
        self.schema
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Status gate from the last verification, if any.
    pub fn status(&self) -> Option<i64> {
        self.status
    }

    /// The displayed record, if any.
    pub fn record(&self) -> Option<&EmployeeRecord> {
        self.record.as_ref()
    }

    /// History rows from the last search; empty unless the page has a
    /// history view.
    pub fn history(&self) -> &[EmployeeRecord] {
        &self.history
    }

    /// The live edit buffer, while the edit surface is open.
    pub fn buffer(&self) -> Option<&EditBuffer> {
        self.buffer.as_ref()
    }

    /// Whether the status gate permits edit and submit on this page.
    pub fn gate_open(&self) -> bool {
        self.status == Some(self.schema.required_status)
    }

    /// Resolved display label for a foreign-key field of the record.
    pub fn resolved(&self, category: i64, field: &str) -> &str {
        match &self.record {
            Some(record) => self.lookups.resolve(category, record.get(field)),
            None => UNRESOLVED,
        }
    }

    /// Resolved display label for a field of a history row.
    pub fn resolved_in(&self, row: &EmployeeRecord, category: i64, field: &str) -> &str {
        self.lookups.resolve(category, row.get(field))
    }

    /// Selector options for a lookup category.
    pub fn options(&self, category: i64) -> &[LookupValue] {
        self.lookups.values(category)
    }

    // ========== Operations ==========

    /// Load the page's lookup table. Idempotent.
    pub async fn load_lookups(&mut self) -> ClientResult<()> {
        self.lookups.load_once(&self.api).await?;
        Ok(())
    }

    /// Search for an employee by identifier.
    ///
    /// The employee number wins when both identifiers are given; the user
    /// code is consulted only on dual-lookup pages. A blank identifier is a
    /// local validation error and issues no network call. Runs the
    /// verification call and the record fetch sequentially, then the
    /// history fetch on pages that have one.
    pub async fn search(
        &mut self,
        employee_no: &str,
        user_code: &str,
    ) -> ClientResult<SearchOutcome> {
        if !self.state.can_search() {
            return Err(ClientError::Validation(
                "Close the edit surface before searching".into(),
            ));
        }
        let identifier = self.effective_identifier(employee_no, user_code)?;

        self.search_seq += 1;
        let seq = self.search_seq;
        self.state = FormState::Searching;
        tracing::debug!(page = self.schema.name, %identifier, seq, "Searching employee");

        let result = self.run_search(&identifier).await;

        // Stale-response guard: only the most recently issued search may
        // apply its result.
        if seq != self.search_seq {
            tracing::debug!(page = self.schema.name, seq, "Discarding superseded search");
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(SearchData {
                status,
                record: Some(record),
                history,
            }) => {
                self.status = Some(status);
                self.record = Some(record);
                self.history = history;
                self.buffer = None;
                self.state = FormState::Found;
                tracing::debug!(page = self.schema.name, status, "Record found");
                Ok(SearchOutcome::Found)
            }
            Ok(SearchData {
                status,
                record: None,
                history,
            }) => {
                self.status = Some(status);
                self.record = None;
                self.history = history;
                self.buffer = None;
                self.state = FormState::NotFound;
                tracing::debug!(page = self.schema.name, status, "No record for identifier");
                Ok(SearchOutcome::NoData)
            }
            Err(err) => {
                self.status = None;
                self.record = None;
                self.history.clear();
                self.buffer = None;
                self.state = FormState::Error;
                tracing::warn!(page = self.schema.name, error = %err, "Search failed");
                Err(err)
            }
        }
    }

    /// Open the edit surface over the displayed record.
    ///
    /// A no-op returning false unless a record is displayed and the status
    /// gate matches the page's required status.
    pub fn open_edit(&mut self) -> bool {
        if !self.state.can_open_edit() || !self.gate_open() {
            return false;
        }
        let Some(record) = &self.record else {
            return false;
        };
        self.buffer = Some(EditBuffer::from_record(record));
        self.state = FormState::EditOpen;
        true
    }

    /// Coerce one raw edit into the buffer. Returns whether the value was
    /// accepted (the user-code field silently rejects malformed input).
    pub fn edit_field(&mut self, field: &str, raw: &str) -> bool {
        match &mut self.buffer {
            Some(buffer) if self.state == FormState::EditOpen => buffer.apply(field, raw),
            _ => false,
        }
    }

    /// Set or clear a date field in the buffer.
    pub fn edit_date(&mut self, field: &str, date: Option<NaiveDate>) -> bool {
        match &mut self.buffer {
            Some(buffer) if self.state == FormState::EditOpen => {
                buffer.apply_date(field, date);
                true
            }
            _ => false,
        }
    }

    /// Commit the buffer into the displayed record and close the edit
    /// surface. Local staging only; no network.
    pub fn save_local(&mut self) -> bool {
        if self.state != FormState::EditOpen {
            return false;
        }
        if let Some(buffer) = self.buffer.take() {
            self.record = Some(buffer.into_record());
        }
        self.state = FormState::Found;
        true
    }

    /// Discard the buffer and close the edit surface.
    pub fn cancel_edit(&mut self) -> bool {
        if self.state != FormState::EditOpen {
            return false;
        }
        self.buffer = None;
        self.state = FormState::Found;
        true
    }

    /// Submit the displayed record to the page's insert endpoint.
    ///
    /// Validates the primary identifier and the page's required fields
    /// locally before any network call. On failure the record and state are
    /// left untouched for retry.
    pub async fn submit(&mut self, session: &SessionContext) -> ClientResult<SubmitOutcome> {
        if !self.state.can_submit() {
            return Err(ClientError::Validation("No record to submit".into()));
        }
        if !self.gate_open() {
            return Err(ClientError::Validation(
                "Employee status does not permit this operation".into(),
            ));
        }
        let Some(record) = &self.record else {
            return Err(ClientError::Validation("No record to submit".into()));
        };
        if record.is_blank(self.schema.primary_field) {
            return Err(ClientError::Validation("Employee number is required".into()));
        }
        let missing: Vec<&str> = self
            .schema
            .required_fields
            .iter()
            .copied()
            .filter(|field| record.is_blank(field))
            .collect();
        if !missing.is_empty() {
            return Err(ClientError::Validation(format!(
                "Required fields missing: {}",
                missing.join(", ")
            )));
        }

        let body = payload::build(self.schema, record, session);
        self.state = FormState::Submitting;
        tracing::debug!(page = self.schema.name, path = self.schema.submit_path, "Submitting");

        let result = self.api.submit(self.schema.submit_path, &body).await;
        self.state = FormState::Found;

        match result {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| "Details submitted successfully".to_string());
                tracing::info!(page = self.schema.name, "Submit accepted");
                Ok(SubmitOutcome { message })
            }
            Err(err) => {
                tracing::warn!(page = self.schema.name, error = %err, "Submit failed");
                Err(err)
            }
        }
    }

    /// Reset the page: record, status, history and buffer cleared, lookup
    /// cache kept.
    pub fn clear(&mut self) {
        self.status = None;
        self.record = None;
        self.history.clear();
        self.buffer = None;
        self.state = FormState::Idle;
    }

    // ========== Internals ==========

    fn effective_identifier(&self, employee_no: &str, user_code: &str) -> ClientResult<String> {
        let employee_no = employee_no.trim();
        if !employee_no.is_empty() {
            return Ok(employee_no.to_string());
        }
        if self.schema.dual_lookup {
            let user_code = user_code.trim();
            if !user_code.is_empty() {
                return Ok(user_code.to_string());
            }
        }
        Err(ClientError::Validation(
            "Please enter an employee identifier".into(),
        ))
    }

    async fn run_search(&self, identifier: &str) -> ClientResult<SearchData> {
        let verify = self.api.verify_employee(identifier).await?;

        let rows = self
            .api
            .fetch_records(self.schema.record_path, identifier)
            .await?;
        if rows.len() > 1 {
            // Take-first rule: the backend is expected to return at most
            // one row per identifier.
            tracing::debug!(
                page = self.schema.name,
                rows = rows.len(),
                "Multiple rows returned, taking the first"
            );
        }
        let record = rows.first().map(EmployeeRecord::from_raw);

        let history = match self.schema.history_path {
            Some(path) => match self.api.fetch_records(path, identifier).await {
                Ok(rows) => rows.iter().map(EmployeeRecord::from_raw).collect(),
                Err(err) => {
                    // History is auxiliary; a failed fetch degrades to an
                    // empty list instead of failing the search.
                    tracing::warn!(page = self.schema.name, error = %err, "History fetch failed");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(SearchData {
            status: verify.employee_status_id,
            record,
            history,
        })
    }
}

struct SearchData {
    status: i64,
    record: Option<EmployeeRecord>,
    history: Vec<EmployeeRecord>,
}
