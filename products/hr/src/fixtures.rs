//! Static demo data. Everything is anchored on Monday 2024-06-03.

use chrono::{NaiveDate, NaiveTime};
use entity::{
    AttendanceRecord, AttendanceStatus, Department, Designation, Grade, Holiday, LeaveRequest,
    LeaveType, PermissionType, RequestStatus, SecRole, SecUser, ShiftAssignment, Workflow,
    WorkflowStep,
};

use crate::HrModule;

const REFERENCE: (i32, u32, u32) = (2024, 6, 3);

/// (id, name, department)
const EMPLOYEES: [(i64, &str, i64); 8] = [
    (1, "Asha Raman", 1),
    (2, "Daniel Okafor", 1),
    (3, "Mei Lin", 2),
    (4, "Omar Haddad", 2),
    (5, "Priya Nair", 3),
    (6, "Lucas Ferreira", 4),
    (7, "Sara Kowalski", 4),
    (8, "Yusuf Demir", 1),
];

const ATTENDANCE_DATES: [(u32, u32); 5] = [(5, 28), (5, 29), (5, 30), (5, 31), (6, 3)];

// One row per employee, one column per attendance date.
// P present, L late, A absent, V on leave.
const ATTENDANCE_GRID: [&str; 8] = [
    "PPLPP", "PPPPL", "PAPPP", "LPPPA", "PPPVV", "PLPPP", "PPPPL", "APPPP",
];

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(REFERENCE.0, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub(crate) fn load() -> HrModule {
    HrModule {
        reference_date: date(REFERENCE.1, REFERENCE.2),
        attendance: attendance(),
        leave_requests: leave_requests(),
        shifts: shifts(),
        roles: roles(),
        users: users(),
        permission_types: permission_types(),
        departments: departments(),
        designations: designations(),
        grades: grades(),
        holidays: holidays(),
        leave_types: leave_types(),
        workflows: workflows(),
    }
}

fn attendance() -> Vec<AttendanceRecord> {
    let today = date(REFERENCE.1, REFERENCE.2);
    let mut rows = Vec::with_capacity(EMPLOYEES.len() * ATTENDANCE_DATES.len());
    for (column, (month, day)) in ATTENDANCE_DATES.iter().enumerate() {
        let day = date(*month, *day);
        for ((employee_id, name, department_id), marks) in EMPLOYEES.iter().zip(ATTENDANCE_GRID) {
            let status = match marks.as_bytes()[column] {
                b'L' => AttendanceStatus::Late,
                b'A' => AttendanceStatus::Absent,
                b'V' => AttendanceStatus::OnLeave,
                _ => AttendanceStatus::Present,
            };
            let check_in = match status {
                AttendanceStatus::Present => {
                    let minute = u32::try_from(*employee_id * 3 % 15).unwrap_or(0);
                    Some(time(8, 45 + minute))
                }
                AttendanceStatus::Late => Some(time(9, 40)),
                AttendanceStatus::Absent | AttendanceStatus::OnLeave => None,
            };
            // Today's shift has not ended yet.
            let check_out = check_in.filter(|_| day < today).map(|_| time(18, 0));
            rows.push(AttendanceRecord {
                employee_id: *employee_id,
                employee_name: (*name).to_string(),
                department_id: *department_id,
                date: day,
                check_in,
                check_out,
                status,
            });
        }
    }
    rows
}

fn employee(id: i64) -> (String, i64) {
    EMPLOYEES
        .iter()
        .find(|(employee_id, _, _)| *employee_id == id)
        .map(|(_, name, department)| ((*name).to_string(), *department))
        .unwrap_or_else(|| (id.to_string(), 0))
}

fn leave_requests() -> Vec<LeaveRequest> {
    let rows: [(i64, i64, i64, (u32, u32), (u32, u32), &str, RequestStatus); 8] = [
        (1, 5, 1, (5, 31), (6, 4), "Family trip", RequestStatus::Approved),
        (2, 2, 2, (6, 10), (6, 11), "Medical appointment", RequestStatus::Pending),
        (3, 7, 3, (6, 14), (6, 14), "Personal errand", RequestStatus::Pending),
        (4, 3, 1, (7, 1), (7, 5), "Summer holiday", RequestStatus::Pending),
        (5, 8, 3, (5, 20), (5, 20), "Moving house", RequestStatus::Approved),
        (6, 4, 1, (6, 3), (6, 3), "Short notice", RequestStatus::Rejected),
        (7, 1, 2, (5, 13), (5, 14), "Flu", RequestStatus::Approved),
        (8, 6, 4, (6, 24), (6, 28), "Extended travel", RequestStatus::Rejected),
    ];
    rows.into_iter()
        .map(|(id, employee_id, leave_type_id, from, to, reason, status)| {
            let (employee_name, department_id) = employee(employee_id);
            LeaveRequest {
                id,
                employee_id,
                employee_name,
                department_id,
                leave_type_id,
                from_date: date(from.0, from.1),
                to_date: date(to.0, to.1),
                reason: reason.to_string(),
                status,
            }
        })
        .collect()
}

fn shifts() -> Vec<ShiftAssignment> {
    let rows: [(i64, &str, (u32, u32), (u32, u32), i64, Option<i64>); 8] = [
        (1, "Morning", (6, 3), (7, 15), 4, Some(6)),
        (2, "Evening", (6, 3), (15, 23), 4, Some(7)),
        (3, "Night", (6, 3), (23, 7), 4, None),
        (4, "Morning", (6, 4), (7, 15), 4, Some(7)),
        (5, "Evening", (6, 4), (15, 23), 4, None),
        (6, "General", (6, 3), (9, 18), 1, Some(1)),
        (7, "General", (6, 5), (9, 18), 1, Some(8)),
        (8, "Morning", (6, 10), (7, 15), 4, Some(6)),
    ];
    rows.into_iter()
        .map(|(id, shift_name, day, (start, end), department_id, employee_id)| {
            ShiftAssignment {
                id,
                shift_name: shift_name.to_string(),
                date: date(day.0, day.1),
                start: time(start, 0),
                end: time(end, 0),
                department_id,
                employee_id,
                employee_name: employee_id.map(|id| employee(id).0),
            }
        })
        .collect()
}

fn roles() -> Vec<SecRole> {
    [
        (1, "Administrator", Some("Full access to every module"), true),
        (2, "HR Manager", Some("Manages leave, attendance and master data"), true),
        (3, "Team Lead", Some("Approves requests for direct reports"), true),
        (4, "Employee", None, true),
        (5, "Auditor", Some("Read-only access"), false),
    ]
    .into_iter()
    .map(|(id, role_name, description, is_active)| SecRole {
        id,
        role_name: role_name.to_string(),
        description: description.map(str::to_string),
        is_active,
    })
    .collect()
}

fn users() -> Vec<SecUser> {
    [
        (1, "admin", "System Administrator", 1, true),
        (2, "priya.nair", "Priya Nair", 2, true),
        (3, "asha.raman", "Asha Raman", 3, true),
        (4, "daniel.okafor", "Daniel Okafor", 4, true),
        (5, "omar.haddad", "Omar Haddad", 4, false),
    ]
    .into_iter()
    .map(|(id, username, full_name, role_id, is_active)| SecUser {
        id,
        username: username.to_string(),
        full_name: full_name.to_string(),
        role_id,
        is_active,
    })
    .collect()
}

fn permission_types() -> Vec<PermissionType> {
    [(1, "Late Arrival", 4), (2, "Early Departure", 4), (3, "Personal Errand", 2)]
        .into_iter()
        .map(|(id, name, max_hours_per_month)| PermissionType {
            id,
            name: name.to_string(),
            max_hours_per_month,
            is_active: true,
        })
        .collect()
}

fn departments() -> Vec<Department> {
    [
        (1, "ENG", "Engineering", None),
        (2, "FIN", "Finance", None),
        (3, "HR", "People Operations", None),
        (4, "OPS", "Operations", None),
        (5, "QA", "Quality Assurance", Some(1)),
    ]
    .into_iter()
    .map(|(id, code, name, parent_id)| Department {
        id,
        code: code.to_string(),
        name: name.to_string(),
        parent_id,
        is_active: true,
    })
    .collect()
}

fn designations() -> Vec<Designation> {
    [
        (1, "Software Engineer", 1),
        (2, "Accountant", 2),
        (3, "HR Generalist", 3),
        (4, "Shift Supervisor", 4),
        (5, "Operator", 4),
    ]
    .into_iter()
    .map(|(id, name, department_id)| Designation {
        id,
        name: name.to_string(),
        department_id: Some(department_id),
        is_active: true,
    })
    .collect()
}

fn grades() -> Vec<Grade> {
    [
        (1, "G1", "Associate", 1),
        (2, "G2", "Senior Associate", 2),
        (3, "G3", "Lead", 3),
        (4, "G4", "Manager", 4),
    ]
    .into_iter()
    .map(|(id, code, name, level)| Grade {
        id,
        code: code.to_string(),
        name: name.to_string(),
        level,
        is_active: true,
    })
    .collect()
}

fn holidays() -> Vec<Holiday> {
    [
        (1, "New Year's Day", (1, 1), false),
        (2, "Labour Day", (5, 1), false),
        (3, "Founders Day", (6, 17), false),
        (4, "Summer Bank Holiday", (8, 26), false),
        (5, "Diwali", (10, 31), true),
        (6, "Christmas Day", (12, 25), false),
    ]
    .into_iter()
    .map(|(id, name, (month, day), is_optional)| Holiday {
        id,
        name: name.to_string(),
        date: date(month, day),
        is_optional,
    })
    .collect()
}

fn leave_types() -> Vec<LeaveType> {
    [
        (1, "AL", "Annual Leave", 20, true, true),
        (2, "SL", "Sick Leave", 10, false, true),
        (3, "CL", "Casual Leave", 6, false, true),
        (4, "UL", "Unpaid Leave", 30, false, false),
    ]
    .into_iter()
    .map(|(id, code, name, max_days_per_year, carry_forward, is_paid)| LeaveType {
        id,
        code: code.to_string(),
        name: name.to_string(),
        max_days_per_year,
        carry_forward,
        is_paid,
    })
    .collect()
}

fn workflows() -> Vec<Workflow> {
    let step = |level, approver_role_id| WorkflowStep {
        level,
        approver_role_id,
    };
    vec![
        Workflow {
            id: 1,
            name: "Leave approval".into(),
            module: "leave".into(),
            steps: vec![step(1, 3), step(2, 2)],
            is_active: true,
        },
        Workflow {
            id: 2,
            name: "Permission approval".into(),
            module: "permission".into(),
            steps: vec![step(1, 3)],
            is_active: true,
        },
    ]
}
