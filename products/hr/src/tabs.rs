//! Tab selectors for the dashboard areas.
//!
//! Every area parses its `tab` query value into a small enum. A missing or
//! blank value selects the first (default) tab.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {area} tab `{tab}` (expected one of: {})", .expected.join(", "))]
pub struct UnknownTab {
    pub area: &'static str,
    pub tab: String,
    pub expected: Vec<&'static str>,
}

pub trait Tab: Copy + Sized + 'static {
    /// Area name used in error messages (`attendance`, `leave`, ...).
    const AREA: &'static str;
    /// All tabs; the first one is the default.
    const ALL: &'static [Self];

    fn key(self) -> &'static str;

    fn parse(raw: Option<&str>) -> Result<Self, UnknownTab> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(Self::ALL[0]);
        };
        let wanted = normalize(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|tab| normalize(tab.key()) == wanted)
            .ok_or_else(|| UnknownTab {
                area: Self::AREA,
                tab: raw.to_string(),
                expected: Self::ALL.iter().map(|t| t.key()).collect(),
            })
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect()
}

macro_rules! tab_enum {
    ($(#[$meta:meta])* $name:ident, $area:literal { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl Tab for $name {
            const AREA: &'static str = $area;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

tab_enum!(AttendanceTab, "attendance" {
    Today => "today",
    History => "history",
    Late => "late",
    Absent => "absent",
});

tab_enum!(LeaveTab, "leave" {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    All => "all",
});

tab_enum!(
    /// `Open` lists shifts nobody has been assigned to yet.
    ScheduleTab, "schedule" {
        Today => "today",
        Week => "week",
        Open => "open",
    }
);

tab_enum!(SecurityTab, "security" {
    Roles => "roles",
    Users => "users",
    Permissions => "permissions",
});

tab_enum!(OrganizationTab, "organization" {
    Departments => "departments",
    Designations => "designations",
    Grades => "grades",
    Holidays => "holidays",
    LeaveTypes => "leave-types",
    Workflows => "workflows",
});
