// hrops-client/tests/form_controller.rs
// Integration tests driving the form controller through an in-memory API.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use hrops_client::{ClientError, ClientResult, FormController, FormState, HrApi, SearchOutcome};
use shared::client::{SubmitAck, VerifyResponse};
use shared::lookup::category;
use shared::pages;
use shared::record::FieldValue;
use shared::{LookupTable, SessionContext};

#[derive(Default)]
struct FakeState {
    lookups: Mutex<LookupTable>,
    status: Mutex<i64>,
    rows: Mutex<Vec<Map<String, Value>>>,
    history_rows: Mutex<Vec<Map<String, Value>>>,
    ack_message: Mutex<Option<String>>,
    fail_records: AtomicBool,
    fail_history: AtomicBool,
    fail_submit: AtomicBool,
    lookup_calls: AtomicUsize,
    fetched: Mutex<Vec<(String, String)>>,
    submitted: Mutex<Vec<(String, Map<String, Value>)>>,
}

#[derive(Clone, Default)]
struct FakeApi(Arc<FakeState>);

impl FakeApi {
    fn new(status: i64) -> Self {
        let api = Self::default();
        *api.0.status.lock().unwrap() = status;
        api
    }

    fn with_rows(self, rows: Vec<Value>) -> Self {
        *self.0.rows.lock().unwrap() = to_maps(rows);
        self
    }

    fn with_history(self, rows: Vec<Value>) -> Self {
        *self.0.history_rows.lock().unwrap() = to_maps(rows);
        self
    }

    fn with_lookups(self, table: LookupTable) -> Self {
        *self.0.lookups.lock().unwrap() = table;
        self
    }

    fn with_ack_message(self, message: &str) -> Self {
        *self.0.ack_message.lock().unwrap() = Some(message.to_string());
        self
    }

    fn fetched(&self) -> Vec<(String, String)> {
        self.0.fetched.lock().unwrap().clone()
    }

    fn submitted(&self) -> Vec<(String, Map<String, Value>)> {
        self.0.submitted.lock().unwrap().clone()
    }

    fn lookup_calls(&self) -> usize {
        self.0.lookup_calls.load(Ordering::SeqCst)
    }
}

fn to_maps(rows: Vec<Value>) -> Vec<Map<String, Value>> {
    rows.into_iter()
        .map(|row| row.as_object().cloned().expect("object row"))
        .collect()
}

fn transport_error() -> ClientError {
    ClientError::Status {
        status: 500,
        body: "internal error".into(),
    }
}

#[async_trait]
impl HrApi for FakeApi {
    async fn fetch_lookups(&self) -> ClientResult<LookupTable> {
        self.0.lookup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.lookups.lock().unwrap().clone())
    }

    async fn verify_employee(&self, identifier: &str) -> ClientResult<VerifyResponse> {
        self.0
            .fetched
            .lock()
            .unwrap()
            .push(("employee-verify".into(), identifier.into()));
        Ok(VerifyResponse {
            employee_status_id: *self.0.status.lock().unwrap(),
        })
    }

    async fn fetch_records(
        &self,
        path: &str,
        identifier: &str,
    ) -> ClientResult<Vec<Map<String, Value>>> {
        self.0
            .fetched
            .lock()
            .unwrap()
            .push((path.into(), identifier.into()));
        if path == "TeamMovementHistory" {
            if self.0.fail_history.load(Ordering::SeqCst) {
                return Err(transport_error());
            }
            return Ok(self.0.history_rows.lock().unwrap().clone());
        }
        if self.0.fail_records.load(Ordering::SeqCst) {
            return Err(transport_error());
        }
        Ok(self.0.rows.lock().unwrap().clone())
    }

    async fn submit(&self, path: &str, body: &Map<String, Value>) -> ClientResult<SubmitAck> {
        if self.0.fail_submit.load(Ordering::SeqCst) {
            return Err(transport_error());
        }
        self.0
            .submitted
            .lock()
            .unwrap()
            .push((path.into(), body.clone()));
        Ok(SubmitAck {
            message: self.0.ack_message.lock().unwrap().clone(),
        })
    }
}

fn roll_on_row() -> Value {
    // Raw backend casing; the controller must normalize it.
    json!({
        "employeeNo": "E100",
        "employeeName": "Asha",
        "serviceLineId": 7,
        "baseLocationId": 2,
        "sl_no": "",
        "cUserId": "C53"
    })
}

fn service_line_lookups() -> LookupTable {
    serde_json::from_value(json!({
        "7": [
            {"LookUpValueID": 7, "LookUpValueName": "Cloud"},
            {"LookUpValueID": 8, "LookUpValueName": "Data"}
        ],
        "8": [
            {"LookUpValueID": 2, "LookUpValueName": "Chennai"}
        ]
    }))
    .unwrap()
}

fn session() -> SessionContext {
    SessionContext::new("C53").unwrap()
}

#[tokio::test]
async fn test_blank_identifier_is_local_validation() {
    let api = FakeApi::new(pages::status::NEW);
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    let err = page.search("", "").await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.fetched().is_empty(), "no network call may be issued");
    assert_eq!(page.state(), FormState::Idle);
}

#[tokio::test]
async fn test_roll_on_search_ignores_user_code() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    // Roll-on is employee-number only; a user code alone does not search.
    let err = page.search("", "C53").await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.fetched().is_empty());
}

#[tokio::test]
async fn test_dual_lookup_falls_back_to_user_code() {
    let api = FakeApi::new(pages::status::ACTIVE).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_OFF, api.clone());

    let outcome = page.search("", "  C53  ").await.unwrap();
    assert_eq!(outcome, SearchOutcome::Found);

    let fetched = api.fetched();
    assert_eq!(fetched[0], ("employee-verify".into(), "C53".into()));
    assert_eq!(fetched[1], ("RollOff".into(), "C53".into()));
}

#[tokio::test]
async fn test_employee_number_wins_over_user_code() {
    let api = FakeApi::new(pages::status::ACTIVE).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_OFF, api.clone());

    page.search("E100", "C53").await.unwrap();
    assert_eq!(api.fetched()[0].1, "E100");
}

#[tokio::test]
async fn test_search_found_normalizes_record() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api);

    let outcome = page.search("E100", "").await.unwrap();
    assert_eq!(outcome, SearchOutcome::Found);
    assert_eq!(page.state(), FormState::Found);
    assert_eq!(page.status(), Some(pages::status::NEW));

    let record = page.record().unwrap();
    assert_eq!(record.text("EMPLOYEENO"), Some("E100"));
    assert_eq!(record.text("EMPLOYEENAME"), Some("Asha"));
    assert_eq!(record.get("SERVICELINEID"), Some(&FieldValue::Int(7)));
}

#[tokio::test]
async fn test_status_gate_enables_edit_on_matching_page() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api);

    page.search("E100", "").await.unwrap();
    assert!(page.gate_open());
    assert!(page.open_edit());
    assert_eq!(page.state(), FormState::EditOpen);
}

#[tokio::test]
async fn test_status_gate_blocks_edit_and_submit() {
    // Status "new" (203) on a roll-off page: edit and submit stay disabled.
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_OFF, api.clone());

    page.search("E100", "").await.unwrap();
    assert!(!page.gate_open());
    assert!(!page.open_edit());
    assert_eq!(page.state(), FormState::Found);

    let err = page.submit(&session()).await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.submitted().is_empty());
}

#[tokio::test]
async fn test_search_with_no_rows_is_not_found() {
    let api = FakeApi::new(pages::status::ACTIVE);
    let mut page = FormController::new(&pages::ROLL_OFF, api);

    let outcome = page.search("E999", "").await.unwrap();
    assert_eq!(outcome, SearchOutcome::NoData);
    assert_eq!(page.state(), FormState::NotFound);
    assert!(page.record().is_none());
    // Verification still ran; the status gate is known.
    assert_eq!(page.status(), Some(pages::status::ACTIVE));
}

#[tokio::test]
async fn test_transport_failure_clears_displayed_record() {
    let api = FakeApi::new(pages::status::ACTIVE).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_OFF, api.clone());

    page.search("E100", "").await.unwrap();
    assert!(page.record().is_some());

    api.0.fail_records.store(true, Ordering::SeqCst);
    let err = page.search("E100", "").await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(page.state(), FormState::Error);
    assert!(page.record().is_none());
    assert!(page.status().is_none());
}

#[tokio::test]
async fn test_take_first_rule_on_multi_row_response() {
    let second = json!({"employeeNo": "E200", "employeeName": "Other"});
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row(), second]);
    let mut page = FormController::new(&pages::ROLL_ON, api);

    page.search("E100", "").await.unwrap();
    assert_eq!(page.record().unwrap().text("EMPLOYEENO"), Some("E100"));
}

#[tokio::test]
async fn test_team_movement_loads_history() {
    let api = FakeApi::new(pages::status::ACTIVE)
        .with_rows(vec![json!({"employeeNo": "E100", "current_ServiceLineId": 7})])
        .with_history(vec![
            json!({"employeeNo": "E100", "from_ServiceLineId": 7, "to_ServiceLineId": 8}),
            json!({"employeeNo": "E100", "from_ServiceLineId": 8, "to_ServiceLineId": 7}),
        ]);
    let mut page = FormController::new(&pages::TEAM_MOVEMENT, api.clone());

    page.search("E100", "").await.unwrap();
    assert_eq!(page.history().len(), 2);
    assert_eq!(
        page.history()[0].get("TO_SERVICELINEID"),
        Some(&FieldValue::Int(8))
    );

    let fetched = api.fetched();
    assert_eq!(fetched[2].0, "TeamMovementHistory");
}

#[tokio::test]
async fn test_history_failure_degrades_to_empty() {
    let api = FakeApi::new(pages::status::ACTIVE)
        .with_rows(vec![json!({"employeeNo": "E100"})])
        .with_history(vec![json!({"employeeNo": "E100"})]);
    api.0.fail_history.store(true, Ordering::SeqCst);
    let mut page = FormController::new(&pages::TEAM_MOVEMENT, api);

    let outcome = page.search("E100", "").await.unwrap();
    assert_eq!(outcome, SearchOutcome::Found);
    assert!(page.history().is_empty());
}

#[tokio::test]
async fn test_save_local_commits_buffer() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    page.search("E100", "").await.unwrap();
    assert!(page.open_edit());
    assert!(page.edit_field("EMPLOYEENAME", "Asha R"));
    assert!(page.edit_field("SERVICELINEID", "8"));

    // Nothing visible on the record until save.
    assert_eq!(page.record().unwrap().text("EMPLOYEENAME"), Some("Asha"));

    assert!(page.save_local());
    assert_eq!(page.state(), FormState::Found);
    assert_eq!(page.record().unwrap().text("EMPLOYEENAME"), Some("Asha R"));
    assert_eq!(
        page.record().unwrap().get("SERVICELINEID"),
        Some(&FieldValue::Int(8))
    );
    // Local staging only; no network write happened.
    assert!(api.submitted().is_empty());
}

#[tokio::test]
async fn test_cancel_edit_discards_buffer() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api);

    page.search("E100", "").await.unwrap();
    page.open_edit();
    page.edit_field("EMPLOYEENAME", "Changed");

    assert!(page.cancel_edit());
    assert_eq!(page.state(), FormState::Found);
    assert_eq!(page.record().unwrap().text("EMPLOYEENAME"), Some("Asha"));
    assert!(page.buffer().is_none());
}

#[tokio::test]
async fn test_user_code_silently_rejected_in_editor() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api);

    page.search("E100", "").await.unwrap();
    page.open_edit();

    assert!(!page.edit_field("CUSERID", "X1"));
    assert_eq!(
        page.buffer().unwrap().get("CUSERID"),
        Some(&FieldValue::Text("C53".into()))
    );
    assert!(page.edit_field("CUSERID", "C54"));
    assert_eq!(
        page.buffer().unwrap().get("CUSERID"),
        Some(&FieldValue::Text("C54".into()))
    );
}

#[tokio::test]
async fn test_search_rejected_while_editor_open() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    page.search("E100", "").await.unwrap();
    page.open_edit();

    let calls_before = api.fetched().len();
    let err = page.search("E200", "").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(api.fetched().len(), calls_before);
}

#[tokio::test]
async fn test_submit_payload_backend_casing_and_nulls() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    page.search("E100", "").await.unwrap();
    page.submit(&session()).await.unwrap();

    let submitted = api.submitted();
    assert_eq!(submitted.len(), 1);
    let (path, body) = &submitted[0];
    assert_eq!(path, "insert_rollon_details");
    assert_eq!(body.get("EmployeeNo"), Some(&Value::from("E100")));
    assert_eq!(body.get("ServiceLineID"), Some(&Value::from(7)));
    // Empty SL_NO goes out as null, never ""
    assert_eq!(body.get("Sl_No"), Some(&Value::Null));
    assert_eq!(body.get("Entered_By"), Some(&Value::from("C53")));
    // Every mapped field is present
    assert_eq!(body.len(), pages::ROLL_ON.payload_fields.len() + 1);
}

#[tokio::test]
async fn test_team_movement_requires_destination_fields() {
    let api = FakeApi::new(pages::status::ACTIVE)
        .with_rows(vec![json!({"employeeNo": "E100", "current_ServiceLineId": 7})]);
    let mut page = FormController::new(&pages::TEAM_MOVEMENT, api.clone());

    page.search("E100", "").await.unwrap();
    let err = page.submit(&session()).await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.submitted().is_empty());

    // Fill the four destination fields and submit passes validation.
    page.open_edit();
    page.edit_field("TO_SERVICELINEID", "8");
    page.edit_field("TO_BASELOCATIONID", "2");
    page.edit_field("TO_ORGANIZATIONID", "4");
    page.edit_date(
        "BILL_START_DATE",
        chrono::NaiveDate::from_ymd_opt(2024, 4, 1),
    );
    page.save_local();

    page.submit(&session()).await.unwrap();
    let (path, body) = &api.submitted()[0];
    assert_eq!(path, "insert_team_movement");
    assert_eq!(body.get("ToServiceLineID"), Some(&Value::from(8)));
    assert_eq!(body.get("BillStartDate"), Some(&Value::from("2024-04-01")));
    assert_eq!(body.get("FromServiceLineID"), Some(&Value::from(7)));
}

#[tokio::test]
async fn test_submit_without_primary_identifier_fails_locally() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![json!({"employeeName": "Asha"})]);
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    page.search("E100", "").await.unwrap();
    let err = page.submit(&session()).await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.submitted().is_empty());
}

#[tokio::test]
async fn test_submit_success_surfaces_server_message() {
    let api = FakeApi::new(pages::status::NEW)
        .with_rows(vec![roll_on_row()])
        .with_ack_message("Roll-on saved");
    let mut page = FormController::new(&pages::ROLL_ON, api);

    page.search("E100", "").await.unwrap();
    let outcome = page.submit(&session()).await.unwrap();
    assert_eq!(outcome.message, "Roll-on saved");
    assert_eq!(page.state(), FormState::Found);
}

#[tokio::test]
async fn test_submit_success_generic_fallback_message() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api);

    page.search("E100", "").await.unwrap();
    let outcome = page.submit(&session()).await.unwrap();
    assert_eq!(outcome.message, "Details submitted successfully");
}

#[tokio::test]
async fn test_submit_failure_keeps_record_for_retry() {
    let api = FakeApi::new(pages::status::NEW).with_rows(vec![roll_on_row()]);
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    page.search("E100", "").await.unwrap();
    api.0.fail_submit.store(true, Ordering::SeqCst);

    let err = page.submit(&session()).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(page.state(), FormState::Found);
    assert_eq!(page.record().unwrap().text("EMPLOYEENO"), Some("E100"));

    // Retry succeeds once the backend recovers.
    api.0.fail_submit.store(false, Ordering::SeqCst);
    page.submit(&session()).await.unwrap();
}

#[tokio::test]
async fn test_lookups_load_once() {
    let api = FakeApi::new(pages::status::NEW).with_lookups(service_line_lookups());
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    page.load_lookups().await.unwrap();
    page.load_lookups().await.unwrap();
    page.load_lookups().await.unwrap();
    assert_eq!(api.lookup_calls(), 1);
}

#[tokio::test]
async fn test_resolved_labels_from_lookup_cache() {
    let api = FakeApi::new(pages::status::NEW)
        .with_rows(vec![roll_on_row()])
        .with_lookups(service_line_lookups());
    let mut page = FormController::new(&pages::ROLL_ON, api);

    page.load_lookups().await.unwrap();
    page.search("E100", "").await.unwrap();

    assert_eq!(page.resolved(category::SERVICE_LINE, "SERVICELINEID"), "Cloud");
    assert_eq!(page.resolved(category::BASE_LOCATION, "BASELOCATIONID"), "Chennai");
    // Unmapped field resolves to the sentinel
    assert_eq!(page.resolved(category::GENDER, "GENDERID"), "TBD");
}

#[tokio::test]
async fn test_clear_resets_everything_but_lookups() {
    let api = FakeApi::new(pages::status::NEW)
        .with_rows(vec![roll_on_row()])
        .with_lookups(service_line_lookups());
    let mut page = FormController::new(&pages::ROLL_ON, api.clone());

    page.load_lookups().await.unwrap();
    page.search("E100", "").await.unwrap();
    page.clear();

    assert_eq!(page.state(), FormState::Idle);
    assert!(page.record().is_none());
    assert!(page.status().is_none());
    assert!(!page.options(category::SERVICE_LINE).is_empty());
    assert_eq!(api.lookup_calls(), 1);
}
