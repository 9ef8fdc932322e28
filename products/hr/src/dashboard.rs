use std::collections::BTreeMap;

use chrono::NaiveDate;
use entity::{AttendanceStatus, Holiday, RequestStatus};
use serde::Serialize;

use crate::HrModule;

const UPCOMING_HOLIDAYS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub headcount: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    pub on_leave: usize,
    pub pending_leave_requests: usize,
    pub upcoming_holidays: Vec<Holiday>,
}

/// One labelled value of a chart series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl HrModule {
    pub fn summary(&self) -> DashboardSummary {
        let today = self.reference_date;
        let count = |status: AttendanceStatus| {
            self.attendance
                .iter()
                .filter(|row| row.date == today && row.status == status)
                .count()
        };
        DashboardSummary {
            date: today,
            headcount: self.attendance.iter().filter(|row| row.date == today).count(),
            present: count(AttendanceStatus::Present),
            late: count(AttendanceStatus::Late),
            absent: count(AttendanceStatus::Absent),
            on_leave: count(AttendanceStatus::OnLeave),
            pending_leave_requests: self
                .leave_requests
                .iter()
                .filter(|r| r.status == RequestStatus::Pending)
                .count(),
            upcoming_holidays: self
                .holidays
                .iter()
                .filter(|h| h.date >= today)
                .take(UPCOMING_HOLIDAYS)
                .cloned()
                .collect(),
        }
    }

    /// Employees in (present or late) per attendance date, oldest first.
    pub fn attendance_trend(&self) -> Vec<SeriesPoint> {
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for row in &self.attendance {
            let slot = per_day.entry(row.date).or_default();
            if row.status.is_in() {
                *slot += 1;
            }
        }
        per_day
            .into_iter()
            .map(|(date, count)| SeriesPoint::new(date.format("%m-%d").to_string(), count as f64))
            .collect()
    }

    /// Approved leave days per leave type, in leave type order.
    pub fn leave_by_type(&self) -> Vec<SeriesPoint> {
        self.leave_types
            .iter()
            .map(|leave_type| {
                let days: u32 = self
                    .leave_requests
                    .iter()
                    .filter(|r| r.leave_type_id == leave_type.id && r.status == RequestStatus::Approved)
                    .map(|r| r.days())
                    .sum();
                SeriesPoint::new(leave_type.name.clone(), f64::from(days))
            })
            .collect()
    }
}
