use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, require};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default)]
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl MasterRecord for Department {
    const RESOURCE: &'static str = "department";
    const LABEL: &'static str = "department";

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
        require(&self.name, "name")
    }
}
