//! HTTP server for the qsplit oracle.
//!
//! Exposes refresh rounds, the latest value, the last status report, and
//! every outcome kind as JSON endpoints. Source rounds do blocking network
//! I/O, so every oracle call runs on tokio's blocking pool.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use qsplit_core::{Error, Oracle, SourceInfoSnapshot, StatusReport};

/// Shared server state.
struct AppState {
    oracle: Arc<Oracle>,
}

/// Error body: `{ "success": false, "error": "..." }`.
#[derive(Debug)]
enum ApiError {
    Oracle(Error),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Oracle(e) => status_for(e),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Oracle(e) => e.to_string(),
            Self::BadRequest(m) | Self::Internal(m) => m.clone(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Oracle(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{} -> {status}", self.message());
        }
        let body = ErrorBody {
            success: false,
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

/// HTTP status for a pipeline error.
fn status_for(e: &Error) -> StatusCode {
    match e {
        Error::InvalidHex { .. } | Error::InvalidRange { .. } | Error::InvalidOptionCount(_) => {
            StatusCode::BAD_REQUEST
        }
        Error::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
        Error::AllSourcesFailed(_) => StatusCode::BAD_GATEWAY,
        Error::NothingToCombine
        | Error::AlgorithmInvariant(_)
        | Error::UnknownHexagram(_)
        | Error::Nonce(_)
        | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Run `f` against the oracle on the blocking pool.
async fn with_oracle<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Oracle) -> qsplit_core::Result<T> + Send + 'static,
{
    let oracle = Arc::clone(&state.oracle);
    let out = tokio::task::spawn_blocking(move || f(&oracle))
        .await
        .map_err(|e| ApiError::Internal(format!("oracle task failed: {e}")))?;
    Ok(Json(out?))
}

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct QuestionParams {
    question: Option<String>,
}

#[derive(Deserialize)]
struct NumberParams {
    min: Option<String>,
    max: Option<String>,
}

#[derive(Serialize)]
struct RefreshResponse {
    success: bool,
    combined: String,
    status: StatusReport,
}

#[derive(Serialize)]
struct LatestResponse {
    success: bool,
    combined: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    initialized: bool,
    sources_succeeded: usize,
    sources_total: usize,
}

#[derive(Serialize)]
struct SourcesResponse {
    sources: Vec<SourceInfoSnapshot>,
    total: usize,
}

/// Treat blank query values as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Every `option=` value, in query order.
fn collect_options(pairs: &[(String, String)]) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == "option")
        .map(|(_, v)| v.clone())
        .collect()
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

fn parse_bound(raw: Option<String>, name: &str, default: i64) -> Result<i64, ApiError> {
    match non_empty(raw) {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("{name} must be an integer, got {v:?}"))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn handle_refresh(State(state): State<Arc<AppState>>) -> ApiResult<RefreshResponse> {
    with_oracle(&state, |oracle| {
        let round = oracle.refresh()?;
        Ok(RefreshResponse {
            success: true,
            combined: round.combined,
            status: round.report,
        })
    })
    .await
}

async fn handle_latest(State(state): State<Arc<AppState>>) -> ApiResult<LatestResponse> {
    with_oracle(&state, |oracle| {
        Ok(LatestResponse {
            success: true,
            combined: oracle.latest()?,
        })
    })
    .await
}

async fn handle_status(State(state): State<Arc<AppState>>) -> ApiResult<StatusReport> {
    with_oracle(&state, |oracle| oracle.status()?.ok_or(Error::NotInitialized)).await
}

async fn handle_health(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    with_oracle(&state, |oracle| {
        let initialized = match oracle.latest() {
            Ok(_) => true,
            Err(Error::NotInitialized) => false,
            Err(e) => return Err(e),
        };
        let report = oracle.status()?;
        let (succeeded, total) = report
            .map(|r| (r.succeeded(), r.total()))
            .unwrap_or((0, oracle.aggregator().source_count()));
        Ok(HealthResponse {
            status: if initialized && succeeded > 0 {
                "healthy"
            } else {
                "degraded"
            },
            initialized,
            sources_succeeded: succeeded,
            sources_total: total,
        })
    })
    .await
}

async fn handle_sources(State(state): State<Arc<AppState>>) -> Json<SourcesResponse> {
    let sources = state.oracle.sources();
    let total = sources.len();
    Json(SourcesResponse { sources, total })
}

async fn handle_choice(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<qsplit_core::Choice> {
    let options = collect_options(&pairs);
    let description = non_empty(first_value(&pairs, "description"));
    with_oracle(&state, move |oracle| oracle.choose(options, description)).await
}

async fn handle_8ball(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuestionParams>,
) -> ApiResult<qsplit_core::EightBall> {
    let question = non_empty(params.question);
    with_oracle(&state, move |oracle| oracle.magic_8_ball(question)).await
}

async fn handle_number(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NumberParams>,
) -> ApiResult<qsplit_core::Number> {
    let min = parse_bound(params.min, "min", 1)?;
    let max = parse_bound(params.max, "max", 100)?;
    with_oracle(&state, move |oracle| oracle.number(min, max)).await
}

async fn handle_coin(State(state): State<Arc<AppState>>) -> ApiResult<qsplit_core::CoinFlip> {
    with_oracle(&state, |oracle| oracle.coin_flip()).await
}

async fn handle_iching(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuestionParams>,
) -> ApiResult<qsplit_core::IChingReading> {
    let question = non_empty(params.question);
    with_oracle(&state, move |oracle| oracle.iching(question)).await
}

async fn handle_tarot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuestionParams>,
) -> ApiResult<qsplit_core::TarotReading> {
    let question = non_empty(params.question);
    with_oracle(&state, move |oracle| oracle.tarot(question)).await
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let names = state.oracle.aggregator().source_names();

    Json(serde_json::json!({
        "name": "qsplit server",
        "version": qsplit_core::VERSION,
        "sources": names,
        "endpoints": {
            "/": "This API index",
            "/health": "Health check",
            "/api/v1/sources": "Registered randomness sources",
            "/api/v1/refresh": "Run one source round (GET or POST)",
            "/api/v1/latest": "Latest combined value",
            "/api/v1/status": "Status report of the last round",
            "/api/v1/choice": {
                "params": {
                    "option": "Repeat 2-20 times",
                    "description": "Optional decision description",
                }
            },
            "/api/v1/8ball": { "params": { "question": "Optional question" } },
            "/api/v1/number": {
                "params": { "min": "Lower bound (default 1)", "max": "Upper bound (default 100)" }
            },
            "/api/v1/coin": "Coin flip",
            "/api/v1/iching": { "params": { "question": "Optional question" } },
            "/api/v1/tarot": { "params": { "question": "Optional question" } },
        },
        "examples": {
            "choice": "/api/v1/choice?option=tea&option=coffee&description=drink",
            "number": "/api/v1/number?min=1&max=6",
        }
    }))
}

/// Build the axum router.
fn build_router(oracle: Arc<Oracle>) -> Router {
    let state = Arc::new(AppState { oracle });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/v1/sources", get(handle_sources))
        .route("/api/v1/refresh", get(handle_refresh).post(handle_refresh))
        .route("/api/v1/latest", get(handle_latest))
        .route("/api/v1/status", get(handle_status))
        .route("/api/v1/choice", get(handle_choice))
        .route("/api/v1/8ball", get(handle_8ball))
        .route("/api/v1/number", get(handle_number))
        .route("/api/v1/coin", get(handle_coin))
        .route("/api/v1/iching", get(handle_iching))
        .route("/api/v1/tarot", get(handle_tarot))
        .with_state(state)
}

/// Interval for scheduled rounds. A round that overruns pushes the next
/// tick back instead of firing catch-up rounds.
fn refresh_ticker(every: Duration) -> tokio::time::Interval {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    ticker
}

/// Run a source round every `every`, forever. Rounds may overlap manual
/// refreshes; the store keeps whichever write lands last.
pub fn spawn_scheduled_refresh(oracle: Arc<Oracle>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = refresh_ticker(every);
        loop {
            ticker.tick().await;
            let oracle = Arc::clone(&oracle);
            match tokio::task::spawn_blocking(move || oracle.refresh()).await {
                Ok(Ok(round)) => log::info!(
                    "scheduled round {} stored ({}/{} sources)",
                    round.report.round_id,
                    round.report.succeeded(),
                    round.report.total()
                ),
                Ok(Err(e)) => log::warn!("scheduled round failed: {e}"),
                Err(e) => log::error!("scheduled round task failed: {e}"),
            }
        }
    })
}

/// Run the HTTP server until the listener fails.
pub async fn run_server(
    oracle: Oracle,
    host: &str,
    port: u16,
    refresh_every: Option<Duration>,
) -> std::io::Result<()> {
    let oracle = Arc::new(oracle);
    if let Some(every) = refresh_every {
        log::info!("scheduled refresh every {}s", every.as_secs());
        spawn_scheduled_refresh(Arc::clone(&oracle), every);
    }
    let app = build_router(oracle);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsplit_core::store::COMBINED_KEY;
    use qsplit_core::{Aggregator, MemoryStore, RandomStore};

    fn state_with(value: Option<&str>) -> Arc<AppState> {
        let store = Arc::new(MemoryStore::new());
        if let Some(v) = value {
            store.put(COMBINED_KEY, v).unwrap();
        }
        Arc::new(AppState {
            oracle: Arc::new(Oracle::new(Aggregator::new(), store)),
        })
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn error_status_mapping() {
        assert_eq!(
            status_for(&Error::InvalidRange { min: 5, max: 1 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&Error::InvalidOptionCount(1)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&Error::NotInitialized),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&Error::AllSourcesFailed("x".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&Error::UnknownHexagram(64)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn options_keep_query_order() {
        let p = pairs(&[
            ("option", "b"),
            ("description", "pick"),
            ("option", "a"),
        ]);
        assert_eq!(collect_options(&p), vec!["b", "a"]);
        assert_eq!(first_value(&p, "description").as_deref(), Some("pick"));
    }

    #[test]
    fn bounds_default_and_validate() {
        assert_eq!(parse_bound(None, "min", 1).unwrap(), 1);
        assert_eq!(parse_bound(Some(" ".into()), "max", 100).unwrap(), 100);
        assert_eq!(parse_bound(Some("-7".into()), "min", 1).unwrap(), -7);
        assert!(matches!(
            parse_bound(Some("ten".into()), "min", 1),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn uninitialized_store_is_503_with_json_body() {
        let resp = handle_coin(State(state_with(None))).await.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("refresh"));
    }

    #[tokio::test]
    async fn choice_with_one_option_is_400() {
        let resp = handle_choice(
            State(state_with(Some("abcd"))),
            Query(pairs(&[("option", "only")])),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn number_uses_defaults() {
        let resp = handle_number(
            State(state_with(Some("abcd"))),
            Query(NumberParams {
                min: None,
                max: None,
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["min"], 1);
        assert_eq!(json["max"], 100);
        let n = json["result"].as_i64().unwrap();
        assert!((1..=100).contains(&n));
    }

    #[tokio::test]
    async fn refresh_without_sources_is_502() {
        let resp = handle_refresh(State(state_with(None))).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn tarot_returns_five_cards() {
        let resp = handle_tarot(
            State(state_with(Some("00ff"))),
            Query(QuestionParams {
                question: Some("career".into()),
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["spread"].as_array().unwrap().len(), 5);
        assert_eq!(json["question"], "career");
        assert_eq!(json["spread"][0]["position"], "Past");
    }

    #[tokio::test]
    async fn tarot_entries_carry_meaning() {
        let resp = handle_tarot(
            State(state_with(Some("00ff"))),
            Query(QuestionParams { question: None }),
        )
        .await
        .into_response();
        let json = body_json(resp).await;
        for entry in json["spread"].as_array().unwrap() {
            let card = &entry["card"];
            let expected = if entry["orientation"] == "reversed" {
                &card["reversed"]
            } else {
                &card["upright"]
            };
            assert_eq!(&entry["meaning"], expected);
            assert!(entry.get("positionIndex").is_some());
        }
    }

    #[tokio::test]
    async fn overrunning_rounds_delay_the_next_tick() {
        let ticker = refresh_ticker(Duration::from_secs(600));
        assert_eq!(
            ticker.missed_tick_behavior(),
            tokio::time::MissedTickBehavior::Delay
        );
    }
}
