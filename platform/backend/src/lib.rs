//! Client side of the workforce backend.
//!
//! Every master-data entity is reached through the same shared
//! [`BackendClient`]; [`MasterDataService`] maps the CRUD verbs onto the
//! backend's `/{resource}` path conventions.

mod auth;
mod client;
mod lookup;
mod master;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use auth::AuthApi;
pub use client::{BackendClient, BackendConfig, BackendError};
pub use lookup::NameCache;
pub use master::{
    DepartmentService, DesignationService, GradeService, HolidayService, LeaveTypeService,
    MasterDataService, MasterKind, PermissionTypeService, RoleService, UnknownKind,
    WorkflowService,
};

use entity::MasterRecord;
use platform_api::ApiError;

/// Entry point handed to the HTTP layer: one shared client, cheap to clone.
#[derive(Clone, Debug)]
pub struct Backend {
    client: BackendClient,
}

impl Backend {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub fn connect(config: &BackendConfig) -> Result<Self, BackendError> {
        BackendClient::new(config).map(Self::new)
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn records<T: MasterRecord>(&self) -> MasterDataService<T> {
        MasterDataService::new(self.client.clone())
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { status, body } => match status {
                401 | 403 => ApiError::Unauthorized,
                404 => ApiError::NotFound,
                400 | 409 | 422 => ApiError::InvalidInput(body),
                _ => ApiError::Upstream(format!("backend returned {status}: {body}")),
            },
            BackendError::Invalid { label, source } => {
                ApiError::InvalidInput(format!("invalid {label}: {source}"))
            }
            other => ApiError::Upstream(other.to_string()),
        }
    }
}
