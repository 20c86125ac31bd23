use crate::errors::AppError;
use crate::models::{FeedStatus, WindowQuery, WindowReport};
use crate::state::AppState;
use crate::stats::build_window_report;
use crate::summary::LatestSummary;
use crate::ui::render_index;
use crate::window::TimeWindow;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Html<String>, AppError> {
    let report = report_for(&state, &query).await?;
    Ok(Html(render_index(&report, state.config.poll_interval)))
}

pub async fn get_readings(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<WindowReport>, AppError> {
    Ok(Json(report_for(&state, &query).await?))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<LatestSummary>, AppError> {
    let report = report_for(&state, &query).await?;
    Ok(Json(report.latest))
}

pub async fn get_status(State(state): State<AppState>) -> Json<FeedStatus> {
    let feed = state.feed.lock().await;
    Json(feed.status(&state.config.endpoint))
}

async fn report_for(state: &AppState, query: &WindowQuery) -> Result<WindowReport, AppError> {
    let window = parse_window(query.window.as_deref())?;
    let feed = state.feed.lock().await;
    Ok(build_window_report(&feed, &state.config.endpoint, window))
}

fn parse_window(raw: Option<&str>) -> Result<TimeWindow, AppError> {
    let window = raw.map(str::parse::<TimeWindow>).transpose()?;
    Ok(window.unwrap_or_default())
}
