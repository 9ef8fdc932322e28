//! Plain records exchanged with the workforce backend.
//!
//! Master-data records round-trip verbatim through the backend API; the
//! dashboard rows only exist as in-memory fixtures.

pub mod attendance;
pub mod department;
pub mod designation;
pub mod grade;
pub mod holiday;
pub mod leave_request;
pub mod leave_type;
pub mod permission_type;
pub mod role;
pub mod shift;
pub mod user;
pub mod workflow;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use department::Department;
pub use designation::Designation;
pub use grade::Grade;
pub use holiday::Holiday;
pub use leave_request::{LeaveRequest, RequestStatus};
pub use leave_type::LeaveType;
pub use permission_type::PermissionType;
pub use role::SecRole;
pub use shift::ShiftAssignment;
pub use user::{Credentials, LoginResponse, SecUser, SessionUser};
pub use workflow::{Workflow, WorkflowStep};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("workflow step {found} is out of order (expected {expected})")]
    StepOrder { expected: u32, found: u32 },
}

/// A master-data entity managed through the backend's CRUD endpoints.
pub trait MasterRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Backend path segment, e.g. `department` for `/department/all`.
    const RESOURCE: &'static str;
    /// Human label used in logs and error messages.
    const LABEL: &'static str;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn display_name(&self) -> &str;

    /// Required-field shape check performed before anything is sent upstream.
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub(crate) fn positive(value: i64, field: &'static str) -> Result<(), ValidationError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

/// Case-insensitive substring match used by the fixture filters.
pub fn name_matches(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
