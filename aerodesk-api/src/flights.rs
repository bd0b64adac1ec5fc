use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use aerodesk_catalog::FlightViewMapper;
use aerodesk_core::search::FlightSearchRequest;
use aerodesk_core::{AirlineClass, FareClassInfo, FlightDraft, FlightUpdate, FlightView};

use crate::{
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    middleware::AuthenticatedUser,
    state::AppState,
};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateFlightRequest {
    pub airline_id: i32,
    #[serde(flatten)]
    pub flight: FlightDraft,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFlightRequest {
    pub airline_id: i32,
    #[serde(flatten)]
    pub flight: FlightUpdate,
}

#[derive(Debug, Deserialize)]
pub struct SeatAdjustment {
    pub delta: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/flights", get(list_flights).post(create_flight))
        .route(
            "/api/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
        .route("/api/flights/{id}/book", get(get_flight))
        .route("/api/flights/{id}/seats", post(adjust_seats))
        .route("/api/fare-classes", get(list_fare_classes))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/flights
///
/// Without parameters every flight is listed cheapest first; any parameter
/// (even an empty one) switches to search, which has no ordering.
async fn list_flights(
    State(state): State<AppState>,
    AppQuery(req): AppQuery<FlightSearchRequest>,
) -> Result<Json<Vec<FlightView>>, AppError> {
    let flights = if req.is_unfiltered() {
        state.catalog.list_all_sorted_by_price().await?
    } else {
        state.search.search_request(req).await?
    };

    Ok(Json(FlightViewMapper::to_views(&flights)))
}

/// POST /api/flights
async fn create_flight(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(req): AppJson<CreateFlightRequest>,
) -> Result<(StatusCode, Json<FlightView>), AppError> {
    let airline = state.registry.get(req.airline_id).await?;
    let flight = state.catalog.create(req.flight, &airline).await?;
    Ok((StatusCode::CREATED, Json(FlightViewMapper::to_view(&flight))))
}

/// GET /api/flights/{id} and GET /api/flights/{id}/book
async fn get_flight(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<FlightView>, AppError> {
    let flight = state.catalog.get(id).await?;
    Ok(Json(FlightViewMapper::to_view(&flight)))
}

/// PUT /api/flights/{id}
async fn update_flight(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<UpdateFlightRequest>,
) -> Result<Json<FlightView>, AppError> {
    let existing = state.catalog.get(id).await?;
    let airline = state.registry.get(req.airline_id).await?;
    let flight = state.merger.apply(existing, &req.flight, airline).await?;
    Ok(Json(FlightViewMapper::to_view(&flight)))
}

/// DELETE /api/flights/{id}
async fn delete_flight(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/flights/{id}/seats
async fn adjust_seats(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<SeatAdjustment>,
) -> Result<Json<FlightView>, AppError> {
    let flight = state.catalog.adjust_seats(id, req.delta).await?;
    Ok(Json(FlightViewMapper::to_view(&flight)))
}

/// GET /api/fare-classes
async fn list_fare_classes() -> Json<&'static [FareClassInfo]> {
    Json(AirlineClass::table())
}
