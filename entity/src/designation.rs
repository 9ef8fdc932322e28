use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, require};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl MasterRecord for Designation {
    const RESOURCE: &'static str = "designation";
    const LABEL: &'static str = "designation";

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
        require(&self.name, "name")
    }
}
