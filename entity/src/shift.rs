use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A rostered shift; `employee_id == None` marks an open shift.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
    pub id: i64,
    pub shift_name: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub department_id: i64,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
}
