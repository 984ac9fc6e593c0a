use std::collections::HashMap;

use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use sirene_domain::RawParams;
use sirene_service::{Error, FormattedResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/search", get(search))
		.route("/near_point", get(near_point))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<FormattedResponse>, ApiError> {
	let response = state.service.search(&RawParams::new(params)).await?;

	Ok(Json(response))
}

async fn near_point(
	State(state): State<AppState>,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<FormattedResponse>, ApiError> {
	let response = state.service.near_point(&RawParams::new(params)).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	erreur: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::Validation { message } => Self { status: StatusCode::BAD_REQUEST, message },
			Error::Execution { message } => {
				Self { status: StatusCode::SERVICE_UNAVAILABLE, message }
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { erreur: self.message })).into_response()
	}
}
