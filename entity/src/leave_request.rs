use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub department_id: i64,
    pub leave_type_id: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
    pub status: RequestStatus,
}

impl LeaveRequest {
    /// Calendar days covered, inclusive of both ends.
    pub fn days(&self) -> u32 {
        let span = (self.to_date - self.from_date).num_days();
        u32::try_from(span + 1).unwrap_or(0)
    }
}
