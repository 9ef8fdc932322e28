//! Master-data endpoints forwarded to the backend.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use entity::{
    Department, Designation, Grade, Holiday, LeaveType, MasterRecord, PermissionType, SecRole,
    Workflow,
};
use platform_api::{ApiError, ApiResult};
use platform_backend::{Backend, BackendError, MasterKind};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{http::AppState, session::BackendToken};

/// Run `$body` with `$t` bound to the record type of `$kind`.
macro_rules! with_record {
    ($kind:expr, |$t:ident| $body:expr) => {
        match $kind {
            MasterKind::Role => {
                type $t = SecRole;
                $body
            }
            MasterKind::Department => {
                type $t = Department;
                $body
            }
            MasterKind::Designation => {
                type $t = Designation;
                $body
            }
            MasterKind::Grade => {
                type $t = Grade;
                $body
            }
            MasterKind::Holiday => {
                type $t = Holiday;
                $body
            }
            MasterKind::Workflow => {
                type $t = Workflow;
                $body
            }
            MasterKind::LeaveType => {
                type $t = LeaveType;
                $body
            }
            MasterKind::PermissionType => {
                type $t = PermissionType;
                $body
            }
        }
    };
}

type KindPath = WithRejection<Path<String>, ApiError>;
type ItemPath = WithRejection<Path<(String, i64)>, ApiError>;
type RecordBody = WithRejection<Json<Value>, ApiError>;

fn parse_kind(raw: &str) -> ApiResult<MasterKind> {
    raw.parse().map_err(|err: platform_backend::UnknownKind| ApiError::invalid(err.to_string()))
}

fn decode<R: MasterRecord>(body: Value) -> ApiResult<R> {
    serde_json::from_value(body)
        .map_err(|err| ApiError::invalid(format!("malformed {}: {err}", R::LABEL)))
}

pub async fn list_handler(
    State(state): State<AppState>,
    WithRejection(Path(kind), _): KindPath,
    token: BackendToken,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    with_record!(kind, |R| {
        let records = state.backend.records::<R>().list(token.as_deref()).await?;
        Ok(Json(records).into_response())
    })
}

pub async fn get_handler(
    State(state): State<AppState>,
    WithRejection(Path((kind, id)), _): ItemPath,
    token: BackendToken,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    with_record!(kind, |R| {
        let record = state.backend.records::<R>().get(id, token.as_deref()).await?;
        Ok(Json(record).into_response())
    })
}

pub async fn create_handler(
    State(state): State<AppState>,
    WithRejection(Path(kind), _): KindPath,
    token: BackendToken,
    WithRejection(Json(body), _): RecordBody,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    with_record!(kind, |R| {
        let record: R = decode(body)?;
        let created = state
            .backend
            .records::<R>()
            .create(&record, token.as_deref())
            .await?;
        state.names.invalidate(R::RESOURCE).await;
        info!(resource = R::RESOURCE, id = created.id(), "record created");
        Ok((StatusCode::CREATED, Json(created)).into_response())
    })
}

pub async fn update_handler(
    State(state): State<AppState>,
    WithRejection(Path((kind, id)), _): ItemPath,
    token: BackendToken,
    WithRejection(Json(body), _): RecordBody,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    with_record!(kind, |R| {
        let record: R = decode(body)?;
        let updated = state
            .backend
            .records::<R>()
            .update(id, &record, token.as_deref())
            .await?;
        state.names.invalidate(R::RESOURCE).await;
        info!(resource = R::RESOURCE, id, "record updated");
        Ok(Json(updated).into_response())
    })
}

pub async fn delete_handler(
    State(state): State<AppState>,
    WithRejection(Path((kind, id)), _): ItemPath,
    token: BackendToken,
) -> ApiResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    with_record!(kind, |R| {
        state
            .backend
            .records::<R>()
            .delete(id, token.as_deref())
            .await?;
        state.names.invalidate(R::RESOURCE).await;
        info!(resource = R::RESOURCE, id, "record deleted");
        Ok(StatusCode::NO_CONTENT)
    })
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub id: i64,
    pub name: String,
}

/// Always answers; unresolvable ids come back with the id as their name.
pub async fn lookup_handler(
    State(state): State<AppState>,
    WithRejection(Path((kind, id)), _): ItemPath,
    token: BackendToken,
) -> ApiResult<Json<LookupResponse>> {
    let kind = parse_kind(&kind)?;
    let name = with_record!(kind, |R| {
        state
            .names
            .display_name(&state.backend.records::<R>(), id, token.as_deref())
            .await
    });
    Ok(Json(LookupResponse { id, name }))
}

/// List every master-data resource once and report how many records came back.
pub async fn check_backend(backend: &Backend) -> Vec<(MasterKind, Result<usize, BackendError>)> {
    let mut report = Vec::with_capacity(MasterKind::ALL.len());
    for kind in MasterKind::ALL {
        let outcome = with_record!(kind, |R| {
            backend.records::<R>().list(None).await.map(|records| records.len())
        });
        report.push((kind, outcome));
    }
    report
}
