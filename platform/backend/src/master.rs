use std::{fmt, marker::PhantomData, str::FromStr};

use entity::{
    Department, Designation, Grade, Holiday, LeaveType, MasterRecord, PermissionType, SecRole,
    Workflow,
};
use reqwest::Method;
use thiserror::Error;
use tracing::instrument;

use crate::client::{BackendClient, BackendError};

/// CRUD wrapper for one master-data resource.
///
/// Paths follow the backend convention: `GET /{resource}/all`,
/// `GET|PUT|DELETE /{resource}/{id}` and `POST /{resource}`.
pub struct MasterDataService<T> {
    client: BackendClient,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for MasterDataService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _record: PhantomData,
        }
    }
}

pub type RoleService = MasterDataService<SecRole>;
pub type DepartmentService = MasterDataService<Department>;
pub type DesignationService = MasterDataService<Designation>;
pub type GradeService = MasterDataService<Grade>;
pub type HolidayService = MasterDataService<Holiday>;
pub type WorkflowService = MasterDataService<Workflow>;
pub type LeaveTypeService = MasterDataService<LeaveType>;
pub type PermissionTypeService = MasterDataService<PermissionType>;

impl<T: MasterRecord> MasterDataService<T> {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    /// Bearer these calls carry for `token`; see [`BackendClient::credential`].
    pub fn credential<'a>(&'a self, token: Option<&'a str>) -> Option<&'a str> {
        self.client.credential(token)
    }

    fn collection_path() -> String {
        format!("/{}", T::RESOURCE)
    }

    fn item_path(id: i64) -> String {
        format!("/{}/{id}", T::RESOURCE)
    }

    #[instrument(name = "master.list", skip_all, fields(resource = T::RESOURCE))]
    pub async fn list(&self, token: Option<&str>) -> Result<Vec<T>, BackendError> {
        self.client
            .get_json(&format!("/{}/all", T::RESOURCE), token)
            .await
    }

    #[instrument(name = "master.get", skip(self, token), fields(resource = T::RESOURCE))]
    pub async fn get(&self, id: i64, token: Option<&str>) -> Result<T, BackendError> {
        self.client.get_json(&Self::item_path(id), token).await
    }

    #[instrument(name = "master.create", skip_all, fields(resource = T::RESOURCE))]
    pub async fn create(&self, record: &T, token: Option<&str>) -> Result<T, BackendError> {
        check(record)?;
        self.client
            .send_json(Method::POST, &Self::collection_path(), record, token)
            .await
    }

    #[instrument(name = "master.update", skip(self, record, token), fields(resource = T::RESOURCE))]
    pub async fn update(&self, id: i64, record: &T, token: Option<&str>) -> Result<T, BackendError> {
        let mut record = record.clone();
        record.set_id(id);
        check(&record)?;
        self.client
            .send_json(Method::PUT, &Self::item_path(id), &record, token)
            .await
    }

    #[instrument(name = "master.delete", skip(self, token), fields(resource = T::RESOURCE))]
    pub async fn delete(&self, id: i64, token: Option<&str>) -> Result<(), BackendError> {
        self.client.delete(&Self::item_path(id), token).await
    }
}

fn check<T: MasterRecord>(record: &T) -> Result<(), BackendError> {
    record.validate().map_err(|source| BackendError::Invalid {
        label: T::LABEL,
        source,
    })
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown master data kind `{0}`")]
pub struct UnknownKind(pub String);

/// The master-data resources reachable through the generic endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MasterKind {
    Role,
    Department,
    Designation,
    Grade,
    Holiday,
    Workflow,
    LeaveType,
    PermissionType,
}

impl MasterKind {
    pub const ALL: [MasterKind; 8] = [
        MasterKind::Role,
        MasterKind::Department,
        MasterKind::Designation,
        MasterKind::Grade,
        MasterKind::Holiday,
        MasterKind::Workflow,
        MasterKind::LeaveType,
        MasterKind::PermissionType,
    ];

    pub fn resource(self) -> &'static str {
        match self {
            MasterKind::Role => SecRole::RESOURCE,
            MasterKind::Department => Department::RESOURCE,
            MasterKind::Designation => Designation::RESOURCE,
            MasterKind::Grade => Grade::RESOURCE,
            MasterKind::Holiday => Holiday::RESOURCE,
            MasterKind::Workflow => Workflow::RESOURCE,
            MasterKind::LeaveType => LeaveType::RESOURCE,
            MasterKind::PermissionType => PermissionType::RESOURCE,
        }
    }

    fn alias(self) -> &'static str {
        match self {
            MasterKind::Role => "role",
            MasterKind::LeaveType => "leave-type",
            MasterKind::PermissionType => "permission-type",
            other => other.resource(),
        }
    }
}

impl FromStr for MasterKind {
    type Err = UnknownKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim();
        MasterKind::ALL
            .into_iter()
            .find(|kind| {
                kind.resource().eq_ignore_ascii_case(needle) || kind.alias().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownKind(needle.to_string()))
    }
}

impl fmt::Display for MasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}
