//! HR dashboard slice.
//!
//! Serves the attendance, leave, schedule, security and organization views
//! from an in-memory fixture set. Each area is split into tabs; a tab is a
//! light filter over the area's rows.

mod dashboard;
mod fixtures;
mod tabs;

use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use entity::{
    AttendanceRecord, AttendanceStatus, Department, Designation, Grade, Holiday, LeaveRequest,
    LeaveType, MasterRecord, PermissionType, RequestStatus, SecRole, SecUser, ShiftAssignment,
    Workflow, name_matches,
};
use serde::Serialize;
use thiserror::Error;

pub use dashboard::{DashboardSummary, SeriesPoint};
pub use tabs::{
    AttendanceTab, LeaveTab, OrganizationTab, ScheduleTab, SecurityTab, Tab, UnknownTab,
};

/// Light, order-preserving filters applied after tab selection.
#[derive(Clone, Debug, Default)]
pub struct RecordFilter {
    /// Case-insensitive substring of the row's name.
    pub q: Option<String>,
    pub department: Option<i64>,
}

impl RecordFilter {
    fn keep<R: Filterable>(&self, row: &R) -> bool {
        let name_ok = self
            .q
            .as_deref()
            .is_none_or(|q| row.names().iter().any(|name| name_matches(name, q)));
        let department_ok = match (self.department, row.department()) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        };
        name_ok && department_ok
    }

    fn apply<'a, R, I>(&self, rows: I) -> Vec<R>
    where
        R: Filterable + Clone + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        rows.into_iter().filter(|row| self.keep(*row)).cloned().collect()
    }
}

/// What the light filters look at on a row.
trait Filterable {
    fn names(&self) -> Vec<&str>;

    fn department(&self) -> Option<i64> {
        None
    }
}

impl Filterable for AttendanceRecord {
    fn names(&self) -> Vec<&str> {
        vec![self.employee_name.as_str()]
    }

    fn department(&self) -> Option<i64> {
        Some(self.department_id)
    }
}

impl Filterable for LeaveRequest {
    fn names(&self) -> Vec<&str> {
        vec![self.employee_name.as_str()]
    }

    fn department(&self) -> Option<i64> {
        Some(self.department_id)
    }
}

impl Filterable for ShiftAssignment {
    fn names(&self) -> Vec<&str> {
        let mut names = vec![self.shift_name.as_str()];
        names.extend(self.employee_name.as_deref());
        names
    }

    fn department(&self) -> Option<i64> {
        Some(self.department_id)
    }
}

impl Filterable for SecUser {
    fn names(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.full_name.as_str()]
    }
}

impl Filterable for Designation {
    fn names(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn department(&self) -> Option<i64> {
        self.department_id
    }
}

macro_rules! filter_by_display_name {
    ($($ty:ty),+ $(,)?) => {
        $(impl Filterable for $ty {
            fn names(&self) -> Vec<&str> {
                vec![self.display_name()]
            }
        })+
    };
}

filter_by_display_name!(SecRole, PermissionType, Department, Grade, Holiday, LeaveType, Workflow);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown dashboard area `{0}`")]
pub struct UnknownArea(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Attendance,
    Leave,
    Schedule,
    Security,
    Organization,
}

impl Area {
    pub const ALL: [Area; 5] = [
        Area::Attendance,
        Area::Leave,
        Area::Schedule,
        Area::Security,
        Area::Organization,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Area::Attendance => AttendanceTab::AREA,
            Area::Leave => LeaveTab::AREA,
            Area::Schedule => ScheduleTab::AREA,
            Area::Security => SecurityTab::AREA,
            Area::Organization => OrganizationTab::AREA,
        }
    }
}

impl FromStr for Area {
    type Err = UnknownArea;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Area::ALL
            .into_iter()
            .find(|area| area.name().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| UnknownArea(raw.to_string()))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum TabItems {
    Attendance(Vec<AttendanceRecord>),
    Leave(Vec<LeaveRequest>),
    Shifts(Vec<ShiftAssignment>),
    Roles(Vec<SecRole>),
    Users(Vec<SecUser>),
    PermissionTypes(Vec<PermissionType>),
    Departments(Vec<Department>),
    Designations(Vec<Designation>),
    Grades(Vec<Grade>),
    Holidays(Vec<Holiday>),
    LeaveTypes(Vec<LeaveType>),
    Workflows(Vec<Workflow>),
}

impl TabItems {
    pub fn len(&self) -> usize {
        match self {
            TabItems::Attendance(rows) => rows.len(),
            TabItems::Leave(rows) => rows.len(),
            TabItems::Shifts(rows) => rows.len(),
            TabItems::Roles(rows) => rows.len(),
            TabItems::Users(rows) => rows.len(),
            TabItems::PermissionTypes(rows) => rows.len(),
            TabItems::Departments(rows) => rows.len(),
            TabItems::Designations(rows) => rows.len(),
            TabItems::Grades(rows) => rows.len(),
            TabItems::Holidays(rows) => rows.len(),
            TabItems::LeaveTypes(rows) => rows.len(),
            TabItems::Workflows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Response envelope for one tab of one area.
#[derive(Clone, Debug, Serialize)]
pub struct TabView {
    pub tab: &'static str,
    pub total: usize,
    pub items: TabItems,
}

impl TabView {
    fn new(tab: impl Tab, items: TabItems) -> Self {
        Self {
            tab: tab.key(),
            total: items.len(),
            items,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HrModule {
    reference_date: NaiveDate,
    attendance: Vec<AttendanceRecord>,
    leave_requests: Vec<LeaveRequest>,
    shifts: Vec<ShiftAssignment>,
    roles: Vec<SecRole>,
    users: Vec<SecUser>,
    permission_types: Vec<PermissionType>,
    departments: Vec<Department>,
    designations: Vec<Designation>,
    grades: Vec<Grade>,
    holidays: Vec<Holiday>,
    leave_types: Vec<LeaveType>,
    workflows: Vec<Workflow>,
}

impl Default for HrModule {
    fn default() -> Self {
        Self::with_fixtures()
    }
}

impl HrModule {
    pub fn with_fixtures() -> Self {
        fixtures::load()
    }

    /// The "today" every fixture view is anchored on.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Select `area`'s tab from a raw query value and apply the filters.
    pub fn view(
        &self,
        area: Area,
        raw_tab: Option<&str>,
        filter: &RecordFilter,
    ) -> Result<TabView, UnknownTab> {
        Ok(match area {
            Area::Attendance => {
                let tab = AttendanceTab::parse(raw_tab)?;
                TabView::new(tab, TabItems::Attendance(self.attendance(tab, filter)))
            }
            Area::Leave => {
                let tab = LeaveTab::parse(raw_tab)?;
                TabView::new(tab, TabItems::Leave(self.leave(tab, filter)))
            }
            Area::Schedule => {
                let tab = ScheduleTab::parse(raw_tab)?;
                TabView::new(tab, TabItems::Shifts(self.schedule(tab, filter)))
            }
            Area::Security => {
                let tab = SecurityTab::parse(raw_tab)?;
                TabView::new(tab, self.security(tab, filter))
            }
            Area::Organization => {
                let tab = OrganizationTab::parse(raw_tab)?;
                TabView::new(tab, self.organization(tab, filter))
            }
        })
    }

    pub fn attendance(&self, tab: AttendanceTab, filter: &RecordFilter) -> Vec<AttendanceRecord> {
        let today = self.reference_date;
        let selected = self.attendance.iter().filter(|row| match tab {
            AttendanceTab::Today => row.date == today,
            AttendanceTab::History => row.date < today,
            AttendanceTab::Late => row.status == AttendanceStatus::Late,
            AttendanceTab::Absent => row.status == AttendanceStatus::Absent,
        });
        filter.apply(selected)
    }

    pub fn leave(&self, tab: LeaveTab, filter: &RecordFilter) -> Vec<LeaveRequest> {
        let selected = self.leave_requests.iter().filter(|row| match tab {
            LeaveTab::Pending => row.status == RequestStatus::Pending,
            LeaveTab::Approved => row.status == RequestStatus::Approved,
            LeaveTab::Rejected => row.status == RequestStatus::Rejected,
            LeaveTab::All => true,
        });
        filter.apply(selected)
    }

    pub fn schedule(&self, tab: ScheduleTab, filter: &RecordFilter) -> Vec<ShiftAssignment> {
        let today = self.reference_date;
        let week_end = today.checked_add_days(Days::new(6)).unwrap_or(today);
        let selected = self.shifts.iter().filter(|row| match tab {
            ScheduleTab::Today => row.date == today,
            ScheduleTab::Week => row.date >= today && row.date <= week_end,
            ScheduleTab::Open => row.employee_id.is_none(),
        });
        filter.apply(selected)
    }

    pub fn security(&self, tab: SecurityTab, filter: &RecordFilter) -> TabItems {
        match tab {
            SecurityTab::Roles => TabItems::Roles(filter.apply(&self.roles)),
            SecurityTab::Users => TabItems::Users(filter.apply(&self.users)),
            SecurityTab::Permissions => {
                TabItems::PermissionTypes(filter.apply(&self.permission_types))
            }
        }
    }

    pub fn organization(&self, tab: OrganizationTab, filter: &RecordFilter) -> TabItems {
        match tab {
            OrganizationTab::Departments => TabItems::Departments(filter.apply(&self.departments)),
            OrganizationTab::Designations => {
                TabItems::Designations(filter.apply(&self.designations))
            }
            OrganizationTab::Grades => TabItems::Grades(filter.apply(&self.grades)),
            OrganizationTab::Holidays => TabItems::Holidays(filter.apply(&self.holidays)),
            OrganizationTab::LeaveTypes => TabItems::LeaveTypes(filter.apply(&self.leave_types)),
            OrganizationTab::Workflows => TabItems::Workflows(filter.apply(&self.workflows)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hr() -> HrModule {
        HrModule::with_fixtures()
    }

    #[test]
    fn attendance_tabs_select_expected_rows() {
        let hr = hr();
        let none = RecordFilter::default();
        let today = hr.attendance(AttendanceTab::Today, &none);
        assert_eq!(today.len(), 8);
        assert!(today.iter().all(|r| r.date == hr.reference_date()));

        let history = hr.attendance(AttendanceTab::History, &none);
        assert_eq!(history.len(), 32);
        assert!(history.iter().all(|r| r.date < hr.reference_date()));

        assert_eq!(hr.attendance(AttendanceTab::Late, &none).len(), 5);
        let absent = hr.attendance(AttendanceTab::Absent, &none);
        let names: Vec<_> = absent.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Yusuf Demir", "Mei Lin", "Omar Haddad"]);
    }

    #[test]
    fn leave_tabs_split_by_status() {
        let hr = hr();
        let none = RecordFilter::default();
        let ids = |tab| -> Vec<i64> { hr.leave(tab, &none).iter().map(|r| r.id).collect() };
        assert_eq!(ids(LeaveTab::Pending), vec![2, 3, 4]);
        assert_eq!(ids(LeaveTab::Approved), vec![1, 5, 7]);
        assert_eq!(ids(LeaveTab::Rejected), vec![6, 8]);
        assert_eq!(ids(LeaveTab::All).len(), 8);
    }

    #[test]
    fn schedule_tabs_cover_day_week_and_open_shifts() {
        let hr = hr();
        let none = RecordFilter::default();
        let ids = |tab| -> Vec<i64> { hr.schedule(tab, &none).iter().map(|r| r.id).collect() };
        assert_eq!(ids(ScheduleTab::Today), vec![1, 2, 3, 6]);
        assert_eq!(ids(ScheduleTab::Week), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(ids(ScheduleTab::Open), vec![3, 5]);
    }

    #[test]
    fn filters_narrow_without_reordering() {
        let hr = hr();
        let by_name = RecordFilter {
            q: Some("OMAR".into()),
            department: None,
        };
        let rows = hr.attendance(AttendanceTab::History, &by_name);
        assert_eq!(rows.len(), 4);
        assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));

        let by_department = RecordFilter {
            q: None,
            department: Some(4),
        };
        let shifts = hr.schedule(ScheduleTab::Week, &by_department);
        assert_eq!(shifts.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn department_filter_ignores_rows_without_department() {
        let hr = hr();
        let filter = RecordFilter {
            q: None,
            department: Some(1),
        };
        let TabItems::Roles(roles) = hr.security(SecurityTab::Roles, &filter) else {
            panic!("roles tab returned another payload");
        };
        assert_eq!(roles.len(), 5);
    }

    #[test]
    fn view_uses_default_tab_and_envelope() {
        let view = hr()
            .view(Area::Organization, None, &RecordFilter::default())
            .unwrap();
        assert_eq!(view.tab, "departments");
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["total"], json!(5));
        assert_eq!(value["items"][0]["code"], json!("ENG"));
    }

    #[test]
    fn view_rejects_unknown_tab() {
        let err = hr()
            .view(Area::Leave, Some("archived"), &RecordFilter::default())
            .unwrap_err();
        assert_eq!(err.area, "leave");
        assert_eq!(err.tab, "archived");
    }

    #[test]
    fn areas_parse_by_name() {
        assert_eq!("Schedule".parse(), Ok(Area::Schedule));
        assert!("payroll".parse::<Area>().is_err());
    }
}
