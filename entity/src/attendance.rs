use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    OnLeave,
}

impl AttendanceStatus {
    /// Whether the employee was physically in that day.
    pub fn is_in(self) -> bool {
        matches!(self, Self::Present | Self::Late)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub employee_id: i64,
    pub employee_name: String,
    pub department_id: i64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
}
