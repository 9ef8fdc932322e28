use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, positive, require};

/// Short-absence permission (e.g. late arrival) capped in hours per month.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionType {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub max_hours_per_month: u32,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl MasterRecord for PermissionType {
    const RESOURCE: &'static str = "permissionType";
    const LABEL: &'static str = "permission type";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        positive(i64::from(self.max_hours_per_month), "maxHoursPerMonth")
    }
}
