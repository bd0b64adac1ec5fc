use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use aerodesk_catalog::FlightViewMapper;
use aerodesk_core::{Airline, FlightView, NewAirline};

use crate::{
    error::AppError,
    extract::{AppJson, AppPath},
    middleware::AuthenticatedUser,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct AirlineDetails {
    pub id: i32,
    pub name: String,
    pub flights: Vec<FlightView>,
}

#[derive(Debug, Serialize)]
pub struct AirlineDeleted {
    pub airline_id: i32,
    pub deleted_flights: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/airlines", get(list_airlines).post(create_airline))
        .route(
            "/api/airlines/{id}",
            get(get_airline).put(rename_airline).delete(delete_airline),
        )
}

async fn list_airlines(State(state): State<AppState>) -> Result<Json<Vec<Airline>>, AppError> {
    Ok(Json(state.registry.list_all().await?))
}

async fn create_airline(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(req): AppJson<NewAirline>,
) -> Result<(StatusCode, Json<Airline>), AppError> {
    let airline = state.registry.create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(airline)))
}

async fn get_airline(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<AirlineDetails>, AppError> {
    let airline = state.registry.get(id).await?;
    let flights = state.registry.flights_of(id).await?;

    Ok(Json(AirlineDetails {
        id: airline.id,
        name: airline.name,
        flights: FlightViewMapper::to_views(&flights),
    }))
}

async fn rename_airline(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<NewAirline>,
) -> Result<Json<Airline>, AppError> {
    Ok(Json(state.registry.rename(id, &req.name).await?))
}

async fn delete_airline(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i32>,
) -> Result<Json<AirlineDeleted>, AppError> {
    let deleted_flights = state.registry.delete(id).await?;
    Ok(Json(AirlineDeleted { airline_id: id, deleted_flights }))
}
