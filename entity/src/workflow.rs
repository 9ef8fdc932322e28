use serde::{Deserialize, Serialize};

use crate::{MasterRecord, ValidationError, require};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub level: u32,
    pub approver_role_id: i64,
}

/// Approval chain for a module (leave, permission, ...).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub module: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl MasterRecord for Workflow {
    const RESOURCE: &'static str = "workflow";
    const LABEL: &'static str = "workflow";

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
        require(&self.module, "module")?;
        // Levels run 1..=n in order.
        for (expected, step) in (1..).zip(&self.steps) {
            if step.level != expected {
                return Err(ValidationError::StepOrder {
                    expected,
                    found: step.level,
                });
            }
        }
        Ok(())
    }
}
