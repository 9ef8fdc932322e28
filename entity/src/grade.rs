use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, positive, require};

/// Pay grade; `level` orders grades from junior (1) upwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(default)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub level: i32,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl MasterRecord for Grade {
    const RESOURCE: &'static str = "grade";
    const LABEL: &'static str = "grade";

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
        positive(i64::from(self.level), "level")
    }
}
