//! Fixture-backed dashboard endpoints.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use platform_api::{ApiError, ApiResult};
use serde::{Deserialize, Deserializer, Serialize, de};
use workforce_hr::{Area, DashboardSummary, RecordFilter, TabView};

use crate::{
    chart::{self, ChartSize},
    http::AppState,
    i18n::Locale,
};

const MAX_CHART_SIDE: f64 = 2000.0;
const MIN_CHART_SIDE: f64 = 16.0;

/// Query string of a tab endpoint; extraction failures answer as [`ApiError`].
type TabParams = WithRejection<Query<TabQuery>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
    pub q: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub department: Option<i64>,
}

/// Forms submit an unset select as `department=`; that means no filter.
fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl TabQuery {
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            q: self.q.clone(),
            department: self.department,
        }
    }
}

fn render(state: &AppState, area: Area, query: &TabQuery) -> ApiResult<Json<TabView>> {
    state
        .hr
        .view(area, query.tab.as_deref(), &query.filter())
        .map(Json)
        .map_err(|err| ApiError::invalid(err.to_string()))
}

pub async fn attendance_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): TabParams,
) -> ApiResult<Json<TabView>> {
    render(&state, Area::Attendance, &query)
}

pub async fn leave_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): TabParams,
) -> ApiResult<Json<TabView>> {
    render(&state, Area::Leave, &query)
}

pub async fn schedule_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): TabParams,
) -> ApiResult<Json<TabView>> {
    render(&state, Area::Schedule, &query)
}

pub async fn security_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): TabParams,
) -> ApiResult<Json<TabView>> {
    render(&state, Area::Security, &query)
}

pub async fn organization_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): TabParams,
) -> ApiResult<Json<TabView>> {
    render(&state, Area::Organization, &query)
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub locale: String,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    locale: Option<Extension<Locale>>,
) -> Json<DashboardResponse> {
    let locale = locale
        .map(|Extension(Locale(locale))| locale)
        .unwrap_or_else(|| state.config.i18n.default_locale.clone());
    Json(DashboardResponse {
        locale,
        summary: state.hr.summary(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ChartQuery {
    fn size(&self) -> ChartSize {
        let defaults = ChartSize::default();
        let clamp = |side: Option<f64>, fallback: f64| {
            side.filter(|v| v.is_finite())
                .unwrap_or(fallback)
                .clamp(MIN_CHART_SIDE, MAX_CHART_SIDE)
        };
        ChartSize::new(
            clamp(self.width, defaults.width),
            clamp(self.height, defaults.height),
        )
    }
}

fn svg(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], body)
}

pub async fn attendance_chart_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ChartQuery>, ApiError>,
) -> impl IntoResponse {
    svg(chart::line_chart(&state.hr.attendance_trend(), query.size()))
}

pub async fn leave_chart_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ChartQuery>, ApiError>,
) -> impl IntoResponse {
    svg(chart::bar_chart(&state.hr.leave_by_type(), query.size()))
}
