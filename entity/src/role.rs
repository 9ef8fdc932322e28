use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, require};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecRole {
    #[serde(default)]
    pub id: i64,
    pub role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl MasterRecord for SecRole {
    const RESOURCE: &'static str = "secRole";
    const LABEL: &'static str = "role";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.role_name
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.role_name, "roleName")
    }
}
