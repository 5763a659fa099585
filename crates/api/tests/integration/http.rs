//! Requests through the full axum stack, including the bearer-token middleware.

use crate::common::*;
use api::app::build_router;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn router() -> (Router, api::AppState) {
    let state = lazy_state();
    let schema = test_schema(state.clone());
    (build_router(state.clone(), schema, &[]), state)
}

fn graphql_request(query: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn invalid_bearer_token_is_rejected_with_401() {
    let (app, _) = router();

    let response = app
        .oneshot(graphql_request(
            "query { getAllProducts { id } }",
            Some("not.a.jwt"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let (app, _) = router();

    let mut config = test_auth_config();
    config.jwt_secret = "some-other-secret".to_string();
    let foreign = api::auth::JwtService::new(&config)
        .create_token(Uuid::new_v4(), "seller@test.com".to_string())
        .unwrap();

    let response = app
        .oneshot(graphql_request(
            "query { getAuthenticatedUser { id } }",
            Some(&foreign),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_token_reaches_resolvers_as_anonymous() {
    let (app, _) = router();

    let response = app
        .oneshot(graphql_request("query { getAuthenticatedUser { id } }", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn valid_token_claims_reach_resolvers() {
    let (app, state) = router();

    let token = state
        .jwt_service()
        .create_token(Uuid::new_v4(), "seller@test.com".to_string())
        .unwrap();

    // Authenticated, so the request gets past the auth check and fails on the id instead
    let response = app
        .oneshot(graphql_request(
            r#"mutation { createOrder(input: { client: "bogus" }) { id } }"#,
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (app, _) = router();

    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
