use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, positive, require};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveType {
    #[serde(default)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub max_days_per_year: u32,
    #[serde(default)]
    pub carry_forward: bool,
    #[serde(default = "crate::default_true")]
    pub is_paid: bool,
}

impl MasterRecord for LeaveType {
    const RESOURCE: &'static str = "leaveType";
    const LABEL: &'static str = "leave type";

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
        require(&self.code, "code")?;
        require(&self.name, "name")?;
        positive(i64::from(self.max_days_per_year), "maxDaysPerYear")
    }
}
