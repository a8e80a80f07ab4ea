use actix_web::http::StatusCode;
use actix_web::test;
use backend::build_state;
use backend::state::app_state::AppState;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::common::json_body;
use crate::support::app_builder::{bearer, init_app, seed_account};
use crate::support::harness::game_config;

async fn state_with(words: &[&str]) -> AppState {
    build_state()
        .with_game_config(game_config(words))
        .build()
        .await
        .unwrap()
}

#[actix_web::test]
async fn letter_game_over_http() {
    let state = state_with(&["gato"]).await;
    let ana = seed_account(&state, "Ana", false).await;
    let auth = bearer(&state, &ana);
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth.clone())
        .set_json(json!({ "mode": "letter-guess", "name": "Morning" }))
        .to_request();
    let created = json_body(test::call_service(&app, req).await, 201).await;
    assert_eq!(created["status"], "playing");
    assert_eq!(created["mode"], "letter-guess");
    assert_eq!(created["name"], "Morning");
    assert_eq!(created["masked_word"], "____");
    assert_eq!(created["remaining_attempts"], 5);
    assert!(created.get("secret_word").is_none());
    let id = created["id"].as_i64().unwrap();

    let mut last = Value::Null;
    for letter in ["g", "a", "t", "o"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{id}/guess"))
            .insert_header(auth.clone())
            .set_json(json!({ "guess": letter }))
            .to_request();
        last = json_body(test::call_service(&app, req).await, 200).await;
    }
    assert_eq!(last["status"], "won");
    assert_eq!(last["secret_word"], "gato");
    assert_eq!(last["feedback"]["kind"], "letter");
    assert_eq!(last["feedback"]["masked_word"], "gato");

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .insert_header(auth)
        .to_request();
    let view = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(view["secret_word"], "gato");
    assert_eq!(view["guessed_letters"], json!(["g", "a", "t", "o"]));
}

#[actix_web::test]
async fn word_guess_returns_per_letter_feedback() {
    let state = state_with(&["perro"]).await;
    let ana = seed_account(&state, "Ana", false).await;
    let auth = bearer(&state, &ana);
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth.clone())
        .set_json(json!({ "mode": "word-guess" }))
        .to_request();
    let created = json_body(test::call_service(&app, req).await, 201).await;
    assert_eq!(created["word_length"], 5);
    assert!(created.get("masked_word").is_none());
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/guess"))
        .insert_header(auth)
        .set_json(json!({ "guess": "campo" }))
        .to_request();
    let outcome = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(outcome["feedback"]["kind"], "word");
    assert_eq!(
        outcome["feedback"]["feedback"],
        json!(["incorrect", "incorrect", "incorrect", "misplaced", "correct"])
    );
    assert_eq!(outcome["remaining_attempts"], 4);
}

#[actix_web::test]
async fn guess_errors_render_as_problem_details() {
    let state = state_with(&["gato"]).await;
    let ana = seed_account(&state, "Ana", false).await;
    let bob = seed_account(&state, "Bob", false).await;
    let ana_auth = bearer(&state, &ana);
    let bob_auth = bearer(&state, &bob);
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(ana_auth.clone())
        .set_json(json!({ "mode": "letter-guess" }))
        .to_request();
    let id = json_body(test::call_service(&app, req).await, 201).await["id"]
        .as_i64()
        .unwrap();

    let cases = [
        (ana_auth.clone(), format!("/api/games/{id}/guess"), json!({ "guess": "ab" }), "INVALID_GUESS", StatusCode::BAD_REQUEST),
        (ana_auth.clone(), format!("/api/games/{id}/guess"), json!({ "word": "a" }), "BAD_REQUEST", StatusCode::BAD_REQUEST),
        (ana_auth.clone(), "/api/games/abc/guess".to_string(), json!({ "guess": "a" }), "INVALID_SESSION_ID", StatusCode::BAD_REQUEST),
        (ana_auth.clone(), "/api/games/0/guess".to_string(), json!({ "guess": "a" }), "INVALID_SESSION_ID", StatusCode::BAD_REQUEST),
        (ana_auth.clone(), "/api/games/999/guess".to_string(), json!({ "guess": "a" }), "SESSION_NOT_FOUND", StatusCode::NOT_FOUND),
        (bob_auth, format!("/api/games/{id}/guess"), json!({ "guess": "a" }), "NOT_OWNER", StatusCode::FORBIDDEN),
    ];
    for (auth, uri, body, code, status) in cases {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(auth)
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(resp, code, status).await;
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/guess"))
        .insert_header(ana_auth.clone())
        .set_json(json!({ "guess": "g" }))
        .to_request();
    json_body(test::call_service(&app, req).await, 200).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/guess"))
        .insert_header(ana_auth)
        .set_json(json!({ "guess": "G" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "REPEATED_GUESS", StatusCode::BAD_REQUEST)
        .await;
}

#[actix_web::test]
async fn second_active_game_is_rejected() {
    let state = state_with(&["gato"]).await;
    let ana = seed_account(&state, "Ana", false).await;
    let auth = bearer(&state, &ana);
    let app = init_app(state).await;

    for expected in [201, 400] {
        let req = test::TestRequest::post()
            .uri("/api/games")
            .insert_header(auth.clone())
            .set_json(json!({ "mode": "letter-guess" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        if expected == 201 {
            assert_eq!(resp.status(), StatusCode::CREATED);
        } else {
            assert_problem_details_from_service_response(
                resp,
                "SESSION_ALREADY_ACTIVE",
                StatusCode::BAD_REQUEST,
            )
            .await;
        }
    }
}

#[actix_web::test]
async fn unknown_mode_is_a_bad_request() {
    let state = state_with(&["gato"]).await;
    let ana = seed_account(&state, "Ana", false).await;
    let auth = bearer(&state, &ana);
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth)
        .set_json(json!({ "mode": "hangman" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST)
        .await;
}

#[actix_web::test]
async fn leave_then_leave_again() {
    let state = state_with(&["gato"]).await;
    let ana = seed_account(&state, "Ana", false).await;
    let auth = bearer(&state, &ana);
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth.clone())
        .set_json(json!({ "mode": "letter-guess" }))
        .to_request();
    let id = json_body(test::call_service(&app, req).await, 201).await["id"]
        .as_i64()
        .unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/leave"))
        .insert_header(auth.clone())
        .to_request();
    let left = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(left["status"], "lost");
    assert_eq!(left["secret_word"], "gato");

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/leave"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_ALREADY_FINISHED",
        StatusCode::BAD_REQUEST,
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/guess"))
        .insert_header(auth)
        .set_json(json!({ "guess": "a" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_ALREADY_FINISHED",
        StatusCode::CONFLICT,
    )
    .await;
}

#[actix_web::test]
async fn history_endpoint() {
    let state = state_with(&["gato"]).await;
    let ana = seed_account(&state, "Ana", false).await;
    let bob = seed_account(&state, "Bob", false).await;
    let auth = bearer(&state, &ana);
    let bob_auth = bearer(&state, &bob);
    let app = init_app(state).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/history/{}", ana.id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem =
        assert_problem_details_from_service_response(resp, "HISTORY_EMPTY", StatusCode::NOT_FOUND)
            .await;
    assert_eq!(problem.detail, format!("No games found for user {}", ana.id));

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth.clone())
        .set_json(json!({ "mode": "letter-guess" }))
        .to_request();
    json_body(test::call_service(&app, req).await, 201).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/history/{}", ana.id))
        .insert_header(auth)
        .to_request();
    let history = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["owner_id"], ana.id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/history/{}", ana.id))
        .insert_header(bob_auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "ADMIN_REQUIRED", StatusCode::FORBIDDEN)
        .await;
}
