use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, require};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_optional: bool,
}

impl MasterRecord for Holiday {
    const RESOURCE: &'static str = "holiday";
    const LABEL: &'static str = "holiday";

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
