//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Local;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::display::Frame;
use crate::predict::Predictor;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/sign", get(sign_page))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/:stop_id", get(get_station))
        .route("/api/predictions", get(get_predictions))
        .route("/api/displays/:display_id/frame", get(display_frame))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Station picker page.
async fn index_page(State(state): State<AppState>) -> IndexTemplate {
    let dataset = state.dataset.read().await;
    let stations = dataset
        .stations_for_display()
        .into_iter()
        .map(StationView::from_station)
        .collect();
    IndexTemplate { stations }
}

/// All stations that can be picked (complex children excluded).
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let dataset = state.dataset.read().await;
    let stations = dataset
        .stations_for_display()
        .into_iter()
        .map(StationResult::from_station)
        .collect();
    Json(StationListResponse { stations })
}

/// Search stations by name or stop ID.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationListResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let dataset = state.dataset.read().await;
    let stations = dataset
        .search(&req.q, limit)
        .into_iter()
        .map(StationResult::from_station)
        .collect();
    Json(StationListResponse { stations })
}

/// Look up a single station.
async fn get_station(
    State(state): State<AppState>,
    UrlPath(stop_id): UrlPath<String>,
) -> Result<Json<StationResult>, AppError> {
    let dataset = state.dataset.read().await;
    let station = dataset.station(&stop_id).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown station: {stop_id}"),
    })?;
    Ok(Json(StationResult::from_station(station)))
}

/// Ranked predictions for a stop. Unknown stops give an empty list.
async fn get_predictions(
    State(state): State<AppState>,
    Query(req): Query<PredictionQuery>,
) -> Result<Json<PredictionsResponse>, AppError> {
    let direction = parse_direction(req.direction.as_deref())?;
    let now = Local::now().naive_local();

    let dataset = state.dataset.read().await;
    let predictor = Predictor::new(&*dataset, &state.engine);
    let predictions = predictor
        .predict(&req.stop, direction, &now)
        .iter()
        .map(PredictionResult::from_prediction)
        .collect();
    let station_name = dataset.station(&req.stop).map(|s| s.display_name.clone());

    Ok(Json(PredictionsResponse {
        stop_id: req.stop,
        station_name,
        predictions,
    }))
}

/// Advance one display and return what it should show.
async fn display_frame(
    State(state): State<AppState>,
    UrlPath(display_id): UrlPath<String>,
    Query(req): Query<PredictionQuery>,
) -> Result<Json<FrameResponse>, AppError> {
    let direction = parse_direction(req.direction.as_deref())?;
    let frame = next_frame(&state, &display_id, &req.stop, direction).await;
    Ok(Json(FrameResponse::from_frame(display_id, req.stop, &frame)))
}

/// HTML rendition of the sign. Reloads itself every `refresh_secs`.
///
/// A page opened without a display ID is redirected to one of its own, so
/// each browser tab rotates independently.
async fn sign_page(
    State(state): State<AppState>,
    Query(req): Query<SignQuery>,
) -> Result<Response, AppError> {
    let direction = parse_direction(req.direction.as_deref())?;
    let Some(display_id) = req.display.filter(|d| !d.is_empty()) else {
        let display_id = state.fresh_display_id();
        debug!(%display_id, stop = %req.stop, "assigned display");
        let href = sign_href(&req.stop, direction, Some(&display_id));
        return Ok(Redirect::to(&href).into_response());
    };

    let frame = next_frame(&state, &display_id, &req.stop, direction).await;

    let (station_name, direction_label) = {
        let dataset = state.dataset.read().await;
        match dataset.station(&req.stop) {
            Some(station) => (
                station.display_name.clone(),
                direction
                    .map(|d| station.direction_labels.for_direction(d).to_string())
                    .unwrap_or_else(|| "All trains".to_string()),
            ),
            None => (req.stop.clone(), "All trains".to_string()),
        }
    };

    let page = SignTemplate::from_frame(
        station_name,
        direction_label,
        display_id,
        state.refresh_secs,
        &frame,
    );
    Ok(page.into_response())
}

/// Run one refresh cycle for a display.
///
/// The display's lock is held from prediction through rotation so that two
/// refreshes of the same display never interleave.
async fn next_frame(
    state: &AppState,
    display_id: &str,
    stop_id: &str,
    direction: Option<u32>,
) -> Frame {
    let now = Local::now().naive_local();

    let handle = state.sessions.get_or_create(display_id).await;
    let mut session = handle.lock().await;

    let dataset = state.dataset.read().await;
    let predictor = Predictor::new(&*dataset, &state.engine);
    session.refresh(&predictor, stop_id, direction, &now)
}

/// Parse the optional direction query value.
///
/// Absent or empty means "both directions".
fn parse_direction(raw: Option<&str>) -> Result<Option<u32>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| AppError::BadRequest {
            message: format!("Invalid direction: {value}"),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetFiles, DatasetStore, SharedDataset};
    use crate::display::SignSessions;
    use crate::predict::EngineConfig;
    use axum::http::header;
    use std::time::Duration;

    const STATIONS: &[u8] = br#"[
        {"stop_id": "635", "name": "14 St - Union Sq",
         "direction_labels": {"north": "Uptown", "south": "Downtown"},
         "child_stop_ids": ["L03"]},
        {"stop_id": "L03", "name": "Union Sq (L)"},
        {"stop_id": "101", "name": "Van Cortlandt Park"}
    ]"#;

    fn state_with(departures: &[u8]) -> AppState {
        let store = DatasetStore::from_slices(STATIONS, departures).unwrap();
        let dataset = SharedDataset::from_store(
            store,
            DatasetFiles::new("stations.json", "departures.json"),
        );
        let sessions = SignSessions::new(8, Duration::from_secs(60));
        AppState::new(dataset, EngineConfig::default(), sessions)
    }

    fn state() -> AppState {
        state_with(b"{}")
    }

    /// A train every minute of every day.
    fn busy_state() -> AppState {
        let mut rows = Vec::new();
        for day in ["w", "s", "u"] {
            for minute in 0..1440 {
                rows.push(format!(r#"["6", "0", 0, {}, "{day}"]"#, minute * 60));
            }
        }
        let departures = format!(
            r#"{{"names": ["Pelham Bay Park"], "stops": {{"635": [{}]}}}}"#,
            rows.join(",")
        );
        state_with(departures.as_bytes())
    }

    fn query(stop: &str, direction: Option<&str>) -> PredictionQuery {
        PredictionQuery {
            stop: stop.to_string(),
            direction: direction.map(str::to_string),
        }
    }

    fn sign_query(display: Option<&str>) -> SignQuery {
        SignQuery {
            stop: "635".to_string(),
            direction: Some("1".to_string()),
            display: display.map(str::to_string),
        }
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(parse_direction(None).unwrap(), None);
        assert_eq!(parse_direction(Some("")).unwrap(), None);
        assert_eq!(parse_direction(Some("0")).unwrap(), Some(0));
        assert_eq!(parse_direction(Some(" 1 ")).unwrap(), Some(1));
        assert!(matches!(
            parse_direction(Some("north")),
            Err(AppError::BadRequest { .. })
        ));
        assert!(parse_direction(Some("-1")).is_err());
    }

    #[test]
    fn error_status_codes() {
        let resp = AppError::BadRequest {
            message: "bad".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::NotFound {
            message: "gone".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn station_listing_hides_children() {
        let Json(resp) = list_stations(State(state())).await;
        let ids: Vec<_> = resp.stations.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["635", "101"]);
    }

    #[tokio::test]
    async fn station_lookup() {
        let Json(station) = get_station(State(state()), UrlPath("L03".to_string()))
            .await
            .unwrap();
        assert_eq!(station.name, "Union Sq (L)");

        let missing = get_station(State(state()), UrlPath("999".to_string())).await;
        assert!(matches!(missing, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn search_caps_limit() {
        let req = StationSearchRequest {
            q: "union".to_string(),
            limit: Some(1000),
        };
        let Json(resp) = search_stations(State(state()), Query(req)).await;
        assert_eq!(resp.stations.len(), 1);
    }

    #[tokio::test]
    async fn unknown_stop_predicts_empty() {
        let Json(resp) = get_predictions(State(state()), Query(query("nope", None)))
            .await
            .unwrap();
        assert!(resp.predictions.is_empty());
        assert_eq!(resp.station_name, None);
    }

    #[tokio::test]
    async fn bad_direction_is_rejected() {
        let result = get_predictions(State(state()), Query(query("635", Some("up")))).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn empty_frame_has_message() {
        let Json(frame) = display_frame(
            State(state()),
            UrlPath("lobby".to_string()),
            Query(query("635", Some("0"))),
        )
        .await
        .unwrap();
        assert_eq!(frame.primary, None);
        assert_eq!(frame.message.as_deref(), Some(NO_TRAINS_MESSAGE));
    }

    #[tokio::test]
    async fn many_displays_are_all_served() {
        let state = busy_state();
        for i in 0..50 {
            let frame = next_frame(&state, &format!("display-{i}"), "635", None).await;
            assert_eq!(frame.secondary.map(|p| p.rank), Some(1));
        }
    }

    #[tokio::test]
    async fn displays_rotate_independently() {
        let state = busy_state();

        let rank = |frame: Frame| frame.secondary.map(|p| p.rank);
        let a1 = rank(next_frame(&state, "a", "635", None).await);
        let a2 = rank(next_frame(&state, "a", "635", None).await);
        let b1 = rank(next_frame(&state, "b", "635", None).await);

        assert_eq!(a1, Some(1));
        assert_eq!(a2, Some(2));
        assert_eq!(b1, Some(1));
    }

    #[tokio::test]
    async fn index_page_is_html() {
        let resp = index_page(State(state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn sign_page_renders() {
        let resp = sign_page(State(state()), Query(sign_query(Some("lobby"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn sign_page_without_display_gets_its_own() {
        let state = state();
        let first = sign_page(State(state.clone()), Query(sign_query(None)))
            .await
            .unwrap();
        let second = sign_page(State(state), Query(sign_query(Some(""))))
            .await
            .unwrap();

        assert_eq!(first.status(), StatusCode::SEE_OTHER);
        let first = first.headers()[header::LOCATION].to_str().unwrap().to_string();
        let second = second.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert!(first.starts_with("/sign?stop=635&direction=1&display="));
        assert_ne!(first, second);
    }
}
