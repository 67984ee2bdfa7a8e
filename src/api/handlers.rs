//! HTTP request handlers for the wage engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tokio::task::JoinError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_batch, compute_severance, net_from_gross, project_to_retirement,
    search_gross_from_net,
};
use crate::error::EngineResult;

use super::request::{
    BatchRequest, GrossWageRequest, NetWageRequest, ProjectionRequest, SeveranceRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/wage/net", post(net_wage_handler))
        .route("/wage/gross", post(gross_wage_handler))
        .route("/severance", post(severance_handler))
        .route("/severance/projection", post(projection_handler))
        .route("/batch", post(batch_handler))
        .with_state(state)
}

/// Handler for POST /wage/net.
async fn net_wage_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetWageRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing net wage request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = state
        .parameters(request.effective_date)
        .and_then(|params| net_from_gross(request.gross_base_wage, params, &request.options()));

    if let Ok(wage) = &result {
        info!(
            correlation_id = %correlation_id,
            gross_base_wage = %wage.gross_base_wage,
            net_pay = %wage.net_pay,
            duration_us = start_time.elapsed().as_micros(),
            "Net wage calculated"
        );
    }
    respond(result, correlation_id)
}

/// Handler for POST /wage/gross.
async fn gross_wage_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrossWageRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross wage request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = match run_blocking(move || {
        state.parameters(request.effective_date).and_then(|params| {
            search_gross_from_net(
                request.target_net_pay,
                request.precision,
                params,
                &request.options(),
            )
        })
    })
    .await
    {
        Ok(result) => result,
        Err(response) => return response,
    };

    if let Ok(search) = &result {
        info!(
            correlation_id = %correlation_id,
            target_net_pay = %search.target_net_pay,
            gross_base_wage = %search.gross_base_wage,
            iterations = search.iterations,
            duration_us = start_time.elapsed().as_micros(),
            "Gross wage found"
        );
    }
    respond(result, correlation_id)
}

/// Handler for POST /severance.
async fn severance_handler(
    State(state): State<AppState>,
    payload: Result<Json<SeveranceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing severance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let result = state.parameters(request.effective_date).and_then(|params| {
        compute_severance(
            request.gross_base_wage,
            request.years_of_service,
            request.has_non_compete_clause,
            params,
        )
    });

    if let Ok(severance) = &result {
        info!(
            correlation_id = %correlation_id,
            eligible = severance.eligible,
            gross_severance = %severance.gross_severance,
            "Severance calculated"
        );
    }
    respond(result, correlation_id)
}

/// Handler for POST /severance/projection.
async fn projection_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing severance projection request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let result = state.parameters(request.effective_date).and_then(|params| {
        project_to_retirement(
            request.gross_base_wage,
            request.years_of_service,
            request.current_age,
            request.has_non_compete_clause,
            params,
        )
    });

    if let Ok(projection) = &result {
        info!(
            correlation_id = %correlation_id,
            applicable = projection.applicable,
            gross_delta = %projection.gross_delta,
            "Severance projected"
        );
    }
    respond(result, correlation_id)
}

/// Handler for POST /batch.
///
/// Per-record failures are reported inside the response body; only a bad
/// request body or an unknown effective date fails the whole request. The
/// batch runs on the blocking pool.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = match run_blocking(move || {
        state
            .parameters(request.effective_date)
            .map(|params| calculate_batch(&request.employees, params))
    })
    .await
    {
        Ok(result) => result,
        Err(response) => return response,
    };

    if let Ok(entries) = &result {
        info!(
            correlation_id = %correlation_id,
            records = entries.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Batch completed"
        );
    }
    respond(result, correlation_id)
}

/// Runs a CPU-bound calculation on the blocking thread pool.
///
/// A task that panics or is cancelled becomes a 500 response.
async fn run_blocking<T, F>(calculation: F) -> Result<T, Response>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(calculation).await.map_err(|err| {
        warn!(error = %err, "Calculation task failed");
        join_error_response(err)
    })
}

fn join_error_response(err: JoinError) -> Response {
    let api_error = ApiErrorResponse::internal(format!("Calculation task failed: {}", err));
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Turns a calculation result into a JSON response.
fn respond<T: Serialize>(result: EngineResult<T>, correlation_id: Uuid) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{GrossSearchResult, SeveranceResult, WageCalculationResult};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/cl").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: &str) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_net_wage_returns_200() {
        let response = post_json("/wage/net", r#"{"gross_base_wage": "2500000"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: WageCalculationResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.net_pay.round(), dec!(2177490));
        assert!(!result.audit_trace.steps.is_empty());
    }

    #[tokio::test]
    async fn test_gross_wage_returns_200() {
        let response = post_json("/wage/gross", r#"{"target_net_pay": "1000000"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let result: GrossSearchResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.precision, dec!(100));
        assert!((result.achieved.net_pay - dec!(1000000)).abs() <= dec!(100));
    }

    #[tokio::test]
    async fn test_severance_returns_200() {
        let response = post_json(
            "/severance",
            r#"{"gross_base_wage": "1000000", "years_of_service": "10"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let result: SeveranceResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(result.eligible);
        assert_eq!(result.gross_severance, dec!(10000000));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_json("/wage/net", "{invalid json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let response = post_json("/severance", r#"{"gross_base_wage": "1000000"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("years_of_service"));
    }

    #[tokio::test]
    async fn test_invalid_argument_returns_400() {
        let response = post_json(
            "/wage/gross",
            r#"{"target_net_pay": "1000000", "precision": "0"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_unknown_effective_date_returns_400() {
        let response = post_json(
            "/wage/net",
            r#"{"gross_base_wage": "1000000", "effective_date": "1990-01-01"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "PARAMETERS_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_oversized_target_returns_400() {
        let response = post_json(
            "/wage/gross",
            r#"{"target_net_pay": "30000000000000000000000000000"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_ARGUMENT");
        assert_eq!(error.details.as_deref(), Some("target_net_pay"));
    }

    #[tokio::test]
    async fn test_batch_runs_off_the_async_workers() {
        let employees: Vec<String> = (0..500)
            .map(|i| {
                format!(
                    r#"{{"employee_id": "{}", "gross_base_wage": "{}", "years_of_service": "8"}}"#,
                    i,
                    600_000 + i * 1_000
                )
            })
            .collect();
        let body = format!(r#"{{"employees": [{}]}}"#, employees.join(","));

        let response = post_json("/batch", &body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let entries: Vec<serde_json::Value> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(entries.len(), 500);
        assert_eq!(entries[499]["employee_id"], "499");
    }

    #[tokio::test]
    async fn test_failed_calculation_task_returns_500() {
        let result: Result<(), Response> = run_blocking(|| panic!("calculation panicked")).await;
        let response = result.unwrap_err();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INTERNAL_ERROR");
    }
}
