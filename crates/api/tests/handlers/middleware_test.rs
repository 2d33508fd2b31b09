use axum::{
    extract::FromRequestParts,
    http::{Request, StatusCode},
    response::IntoResponse,
};
use eyre::eyre;
use gridmeet_api::middleware::{
    actor::Actor,
    error_handling::{AppError, GENERIC_ERR_MESSAGE},
};
use gridmeet_core::errors::GridError;
use pretty_assertions::assert_eq;
use uuid::Uuid;

async fn body_message(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    value["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let response =
        AppError(GridError::NotFound("Event not found.".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_message(response).await, "Event not found.");
}

#[tokio::test]
async fn test_validation_maps_to_400() {
    let response = AppError(GridError::Validation(
        "Start date cannot be in the past.".to_string(),
    ))
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_message(response).await,
        "Start date cannot be in the past."
    );
}

#[tokio::test]
async fn test_name_taken_maps_to_400() {
    let response = AppError(GridError::NameTaken).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_message(response).await, "Name is taken.");
}

#[tokio::test]
async fn test_authentication_maps_to_401() {
    let response = AppError(GridError::Authentication(
        "Missing X-Actor-Id header".to_string(),
    ))
    .into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authorization_maps_to_403() {
    let response = AppError(GridError::Authorization(
        "User must be event creator.".to_string(),
    ))
    .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_database_error_hides_detail() {
    let response =
        AppError(GridError::Database(eyre!("connection reset by peer"))).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_message(response).await, GENERIC_ERR_MESSAGE);
}

#[tokio::test]
async fn test_grid_dimension_error_hides_detail() {
    let response = AppError(GridError::GridDimension(
        "Event timeslots are not evenly distributed across days.".to_string(),
    ))
    .into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_message(response).await, GENERIC_ERR_MESSAGE);
}

#[tokio::test]
async fn test_actor_extractor_reads_header() {
    let actor_id = Uuid::new_v4();
    let request = Request::builder()
        .header("x-actor-id", actor_id.to_string())
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    let actor = Actor::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(actor, Actor(actor_id));
}

#[tokio::test]
async fn test_actor_extractor_rejects_missing_header() {
    let request = Request::builder().body(()).unwrap();
    let (mut parts, _) = request.into_parts();

    let err = Actor::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(matches!(err.0, GridError::Authentication(_)));
}

#[tokio::test]
async fn test_actor_extractor_rejects_malformed_id() {
    let request = Request::builder()
        .header("x-actor-id", "not-a-uuid")
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    let err = Actor::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(matches!(err.0, GridError::Authentication(_)));
}
