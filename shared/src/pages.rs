//! Page schemas
//!
//! Every record-form page runs the same state machine; the differences are
//! data. A [`PageSchema`] names the endpoints, the status gate, which
//! identifiers the search accepts, which canonical fields are mandatory at
//! submit, and how canonical fields map onto the backend's payload names.
//! One generic controller consumes these instead of per-page duplicates.

/// Employee lifecycle status codes used as authorization gates.
pub mod status {
    /// Active on a project; roll-off and team movement require this.
    pub const ACTIVE: i64 = 72;
    /// Rolled off.
    pub const INACTIVE: i64 = 73;
    /// Newly registered, not yet rolled on; roll-on requires this.
    pub const NEW: i64 = 203;
}

/// Static description of one record-form page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSchema {
    /// Page name, used in log output.
    pub name: &'static str,
    /// GET path segment for the record fetch.
    pub record_path: &'static str,
    /// GET path segment for history rows, when the page shows history.
    pub history_path: Option<&'static str>,
    /// POST path for the insert.
    pub submit_path: &'static str,
    /// Status the employee must have for edit and submit to be permitted.
    pub required_status: i64,
    /// Whether search falls back to the user-code identifier.
    pub dual_lookup: bool,
    /// Canonical primary identifier field; must be non-blank at submit.
    pub primary_field: &'static str,
    /// Further canonical fields that must be non-blank at submit.
    pub required_fields: &'static [&'static str],
    /// Payload map: canonical field name -> backend payload name.
    pub payload_fields: &'static [(&'static str, &'static str)],
}

impl PageSchema {
    /// Backend payload name for a canonical field, if the page sends it.
    pub fn backend_name(&self, canonical: &str) -> Option<&'static str> {
        self.payload_fields
            .iter()
            .find(|(field, _)| *field == canonical)
            .map(|(_, backend)| *backend)
    }
}

/// Project roll-on: register a new employee onto a project.
pub const ROLL_ON: PageSchema = PageSchema {
    name: "roll-on",
    record_path: "RollOn",
    history_path: None,
    submit_path: "insert_rollon_details",
    required_status: status::NEW,
    dual_lookup: false,
    primary_field: "EMPLOYEENO",
    required_fields: &[],
    payload_fields: &[
        ("EMPLOYEENO", "EmployeeNo"),
        ("CUSERID", "CUserID"),
        ("EMPLOYEENAME", "EmployeeName"),
        ("GENDERID", "GenderID"),
        ("SL_NO", "Sl_No"),
        ("ROLLONDOC_PATH", "RollOnDocPath"),
        ("TCSSMARTCARDNO", "TcsCardNo"),
        ("SERVICELINEID", "ServiceLineID"),
        ("BASELOCATIONID", "BaseLocationID"),
        ("EMPLOYEESOURCEID", "EmployeeSourceID"),
        ("NWACCESSENABLEDDT", "NWAccessEnabledDt"),
        ("ODCACCESSENABLEDDT", "ODCAccessEnabledDt"),
        ("ORGANIZATIONID", "OrganizationID"),
        ("PRODUCTIONLINEID", "ProductionLineID"),
        ("EMPLOYERID", "EmployerID"),
        ("ROLLONDATE", "RollOnDate"),
    ],
};

/// Project roll-off: release an active employee from a project.
pub const ROLL_OFF: PageSchema = PageSchema {
    name: "roll-off",
    record_path: "RollOff",
    history_path: None,
    submit_path: "insert_rolloff_details",
    required_status: status::ACTIVE,
    dual_lookup: true,
    primary_field: "EMPLOYEENO",
    required_fields: &[],
    payload_fields: &[
        ("EMPLOYEENO", "EmployeeNo"),
        ("CUSERID", "CUserID"),
        ("EMPLOYEENAME", "EmployeeName"),
        ("ROLLOFF", "RollOff"),
        ("ROLLOFFDATE", "RollOffDate"),
        ("ROLLOFFINTIMATIONMAIL", "RollOffIntimationMail"),
        ("NWACCESSDISABLED", "NWAccessDisabled"),
        ("ODCACCESSDISABLED", "ODCAccessDisabled"),
        ("EMPLOYEESOURCEID", "EmployeeSourceID"),
        ("SL_NO", "Sl_No"),
        ("SERVICELINEID", "ServiceLineID"),
        ("BASELOCATIONID", "BaseLocationID"),
        ("ROLLOFFNOTIFICATIONMAIL", "RollOffNotificationMail"),
        ("ROLLOFFREASONID", "RollOffReasonID"),
        ("ROLLOFFREMARKSID", "RollOffRemarksID"),
        ("ROLLOFFDOCPATH", "RollOffDocPath"),
    ],
};

/// Team movement: move an active employee to another service line,
/// location and organization. The only page with a history view, and the
/// only one with mandatory destination fields.
pub const TEAM_MOVEMENT: PageSchema = PageSchema {
    name: "team-movement",
    record_path: "TeamMovement",
    history_path: Some("TeamMovementHistory"),
    submit_path: "insert_team_movement",
    required_status: status::ACTIVE,
    dual_lookup: true,
    primary_field: "EMPLOYEENO",
    required_fields: &[
        "TO_SERVICELINEID",
        "TO_BASELOCATIONID",
        "TO_ORGANIZATIONID",
        "BILL_START_DATE",
    ],
    payload_fields: &[
        ("EMPLOYEENO", "EmployeeNo"),
        ("CUSERID", "CUserID"),
        ("EMPLOYEENAME", "EmployeeName"),
        ("CURRENT_SERVICELINEID", "FromServiceLineID"),
        ("TO_SERVICELINEID", "ToServiceLineID"),
        ("CURRENT_BASELOCATIONID", "FromBaseLocationID"),
        ("TO_BASELOCATIONID", "ToBaseLocationID"),
        ("CURRENT_ORGANIZATIONID", "FromOrganizationID"),
        ("TO_ORGANIZATIONID", "ToOrganizationID"),
        ("FROM_DATE", "FromDate"),
        ("BILL_START_DATE", "BillStartDate"),
    ],
};
