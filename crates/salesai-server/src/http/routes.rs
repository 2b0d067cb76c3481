use super::{AppError, AppResult, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
    routing::{get, post},
    Router,
};
use salesai_core::{
    Briefing, DrillDownRequest, DrillDownResponse, GraphResponse, RetrieverStatus, Role,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/briefing/:account_id", post(generate_briefing))
        .route("/api/briefing/:account_id/drill-down", post(drill_down))
        .route("/api/graph/:account_id", get(account_graph))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    retriever: RetrieverStatus,
    model: String,
    uptime_seconds: u64,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        retriever: state.engine.retriever_status(),
        model: state.engine.model().to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Briefing query string. Any role string is accepted; when a key repeats,
/// the first value wins.
#[derive(Debug, PartialEq)]
struct BriefingQuery {
    role: String,
    query: String,
}

impl BriefingQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut role = None;
        let mut query = None;
        for (key, value) in pairs {
            match key.as_str() {
                "role" => {
                    role.get_or_insert(value);
                }
                "query" => {
                    query.get_or_insert(value);
                }
                _ => {}
            }
        }
        Self {
            role: role.unwrap_or_else(|| "ae".to_string()),
            query: query.unwrap_or_default(),
        }
    }
}

async fn generate_briefing(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<Briefing>> {
    let Query(pairs) = pairs.map_err(|r| AppError::new(r.status(), r))?;
    let params = BriefingQuery::from_pairs(pairs);
    let role = Role::parse(&params.role);
    info!(account_id = %account_id, role = %role, "Generating briefing");

    match state.engine.generate(&account_id, &role, &params.query).await {
        Ok(briefing) => {
            info!(
                account_id = %account_id,
                insights = briefing.insights.len(),
                "Briefing generated"
            );
            Ok(Json(briefing))
        }
        Err(e) => {
            error!(account_id = %account_id, "Error generating briefing: {}", e);
            Err(e.into())
        }
    }
}

async fn drill_down(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    payload: Result<Json<DrillDownRequest>, JsonRejection>,
) -> AppResult<Json<DrillDownResponse>> {
    let Json(request) = payload.map_err(|r| {
        error!(account_id = %account_id, "Rejected drill-down body: {}", r);
        AppError::new(r.status(), r)
    })?;
    let response = state
        .engine
        .drill_down(&account_id, &request)
        .await
        .inspect_err(|e| error!("Error in drill-down: {}", e))?;
    Ok(Json(response))
}

async fn account_graph(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> AppResult<Json<GraphResponse>> {
    let graph = state
        .engine
        .graph(&account_id)
        .await
        .inspect_err(|e| error!("Error fetching graph: {}", e))?;
    Ok(Json(graph))
}
