use crate::calendar::{loi_row_dates, picker_dates};
use crate::compliance::{compute_compliance, records_from_rows};
use crate::errors::AppError;
use crate::models::{
    AnchorQuery, DatasetQuery, LoiDate, OvernightResponse, PresenceRow, PresenceRows, Trace,
    TraceQuery, TraceSearchResponse,
};
use crate::search::{search_traces, TraceOutcome};
use crate::state::AppState;
use crate::storage::{load_dataset, load_rows};
use crate::streak::{anchor_in_range, build_overnight};
use crate::ui::{render_index, render_location};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{Duration, Local, NaiveDate};
use tracing::info;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<AnchorQuery>,
) -> Result<Html<String>, AppError> {
    let overnight = overnight_from_file(&state, &query).await?;
    Ok(Html(render_index(&overnight)))
}

pub async fn bh_location(
    State(state): State<AppState>,
    Query(query): Query<TraceQuery>,
) -> Html<String> {
    let dates = picker_dates(today());
    let result = if query.is_empty() {
        None
    } else {
        Some(run_search(&state, &query).await)
    };
    Html(render_location(&dates, &query, result.as_ref()))
}

pub async fn get_overnight(
    State(state): State<AppState>,
    Query(query): Query<AnchorQuery>,
) -> Result<Json<OvernightResponse>, AppError> {
    Ok(Json(overnight_from_file(&state, &query).await?))
}

pub async fn post_overnight(
    State(state): State<AppState>,
    Query(query): Query<AnchorQuery>,
    Json(payload): Json<PresenceRows>,
) -> Result<Json<OvernightResponse>, AppError> {
    let anchor = resolve_anchor(&query, yesterday())?;
    Ok(Json(overnight_for(&state, &payload.rows, anchor)))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<TraceQuery>,
) -> Result<Json<TraceSearchResponse>, AppError> {
    let response = run_search(&state, &query).await;
    if response.status == TraceOutcome::InvalidDates.status() {
        return Err(AppError::bad_request(response.message));
    }
    Ok(Json(response))
}

pub async fn get_trace(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<Trace>, AppError> {
    let path = match query.dataset.as_deref().map(str::trim) {
        None | Some("") | Some("loi") => &state.paths.loi,
        Some("scenarios") => &state.paths.scenarios,
        Some(other) => {
            return Err(AppError::bad_request(format!(
                "dataset must be 'loi' or 'scenarios', got '{other}'"
            )));
        }
    };

    let trace = load_dataset(path)
        .await
        .and_then(|mut data| data.traces.remove(&key));
    match trace {
        Some(trace) => Ok(Json(trace)),
        None => Err(AppError::not_found(format!(
            "trace not found for key: {key} (in {})",
            path.display()
        ))),
    }
}

pub async fn get_loi_dates(Query(query): Query<AnchorQuery>) -> Result<Json<Vec<LoiDate>>, AppError> {
    let anchor = resolve_anchor(&query, today())?;
    Ok(Json(loi_row_dates(anchor)))
}

async fn overnight_from_file(state: &AppState, query: &AnchorQuery) -> Result<OvernightResponse, AppError> {
    let anchor = resolve_anchor(query, yesterday())?;
    let rows = load_rows(&state.paths.records).await;
    Ok(overnight_for(state, &rows.rows, anchor))
}

fn overnight_for(state: &AppState, rows: &[PresenceRow], anchor: NaiveDate) -> OvernightResponse {
    let records = records_from_rows(rows);
    let compliance = compute_compliance(&records);
    info!(
        rows = rows.len(),
        records = records.len(),
        days = compliance.len(),
        %anchor,
        "evaluated overnight presence"
    );
    build_overnight(&compliance, anchor, &state.subject_name)
}

async fn run_search(state: &AppState, query: &TraceQuery) -> TraceSearchResponse {
    let source = state.paths.scenarios.display().to_string();
    let dataset = load_dataset(&state.paths.scenarios).await;
    let outcome = search_traces(dataset.as_ref(), query);
    info!(status = outcome.status(), "trace search {} to {}", query.from_date, query.to_date);
    outcome.into_search_response(&source)
}

fn resolve_anchor(query: &AnchorQuery, default: NaiveDate) -> Result<NaiveDate, AppError> {
    let anchor = match query.anchor.as_deref().map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("anchor must be YYYY-MM-DD"))?,
    };
    if !anchor_in_range(anchor) {
        return Err(AppError::bad_request(format!("anchor {anchor} is out of range")));
    }
    Ok(anchor)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}
