use std::time::SystemTime;

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test;
use backend::{build_state, mint_access_token};
use backend_test_support::problem_details::assert_problem_details_from_service_response;

use crate::support::app_builder::{bearer, init_app, seed_account};

#[actix_web::test]
async fn missing_bearer_is_unauthorized() {
    let state = build_state().build().await.unwrap();
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(serde_json::json!({ "mode": "letter-guess" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
    )
    .await;
}

#[actix_web::test]
async fn malformed_authorization_headers_are_rejected() {
    let state = build_state().build().await.unwrap();
    let app = init_app(state).await;

    for header in ["Basic dXNlcjpwYXNz", "Bearer", "bearer abc"] {
        let req = test::TestRequest::get()
            .uri("/api/games/1")
            .insert_header((AUTHORIZATION, header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "UNAUTHORIZED_MISSING_BEARER",
            StatusCode::UNAUTHORIZED,
        )
        .await;
    }
}

#[actix_web::test]
async fn invalid_token_is_unauthorized() {
    let state = build_state().build().await.unwrap();
    let app = init_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/games/1")
        .insert_header((AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(problem.title, "Unauthorized Invalid Jwt");
}

#[actix_web::test]
async fn token_for_unknown_subject_is_forbidden() {
    let state = build_state().build().await.unwrap();
    let token = mint_access_token("nobody", SystemTime::now(), &state.security).unwrap();
    let app = init_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/games/1")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "FORBIDDEN_USER_NOT_FOUND",
        StatusCode::FORBIDDEN,
    )
    .await;
}

#[actix_web::test]
async fn trace_id_matches_request_id_header() {
    let state = build_state().build().await.unwrap();
    let ana = seed_account(&state, "Ana", false).await;
    let auth = bearer(&state, &ana);
    let app = init_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/games/77")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let problem = assert_problem_details_from_service_response(
        resp,
        "SESSION_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(problem.trace_id, request_id);
}
