//! Coffee resource endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::debug;

use super::{negotiation::require_json_accept, REST_ROOT};
use crate::{
    error::ApiError,
    state::{AppState, Coffee, NewCoffee},
};

/// The `coffees` REST resource
pub struct CafeResource;

impl CafeResource {
    pub const PATH: &'static str = "/coffees";

    /// Route table for the resource, relative to [`REST_ROOT`]
    pub fn routes() -> Router<Arc<AppState>> {
        // DELETE answers 204 whatever the Accept header says
        let negotiate = middleware::from_fn(require_json_accept);
        Router::new()
            .route(
                Self::PATH,
                get(list_coffees).post(create_coffee).route_layer(negotiate.clone()),
            )
            .route(
                "/coffees/:id",
                get(get_coffee).route_layer(negotiate).delete(delete_coffee),
            )
    }

    /// Absolute location of a single coffee
    pub fn location(id: i64) -> String {
        format!("{}{}/{}", REST_ROOT, Self::PATH, id)
    }
}

/// Handle GET /coffees - List all coffees
pub async fn list_coffees(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Coffee>>, ApiError> {
    let coffees = state.list_coffees().await?;
    debug!("Listed {} coffees", coffees.len());
    Ok(Json(coffees))
}

/// Handle POST /coffees - Create a coffee with a server-assigned id
pub async fn create_coffee(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewCoffee>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_coffee) = payload?;
    let coffee = state.create_coffee(new_coffee).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, CafeResource::location(coffee.id))],
        Json(coffee),
    ))
}

/// Handle GET /coffees/:id - Fetch a single coffee
pub async fn get_coffee(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Coffee>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.get_coffee(id).await?))
}

/// Handle DELETE /coffees/:id - Delete a coffee if present
pub async fn delete_coffee(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.delete_coffee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
