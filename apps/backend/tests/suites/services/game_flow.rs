use backend::domain::feedback::LetterFeedback::{Correct, Incorrect, Misplaced};
use backend::domain::session::{GameMode, GameStatus, GuessFeedback};
use backend::errors::ErrorCode;
use backend::repos::sessions::SessionRepo;
use backend::Principal;

use crate::support::harness::{game_config, Harness};

async fn letter_game(h: &Harness, owner: &Principal) -> i64 {
    h.service
        .create_session(owner, GameMode::LetterGuess, None)
        .await
        .expect("create letter game")
        .id
}

#[tokio::test]
async fn letter_game_is_won_when_every_letter_is_revealed() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let id = letter_game(&h, &ana).await;

    let hit = h.service.submit_guess(&ana, id, "A").await.unwrap();
    match &hit.feedback {
        GuessFeedback::Letter {
            letter,
            hit,
            positions,
            masked_word,
        } => {
            assert_eq!(*letter, 'a');
            assert!(*hit);
            assert_eq!(positions, &vec![1]);
            assert_eq!(masked_word, "_a__");
        }
        other => panic!("expected letter feedback, got {other:?}"),
    }
    assert_eq!(hit.remaining_attempts, 5);
    assert_eq!(hit.status, GameStatus::Playing);
    assert!(hit.secret_word.is_none());

    let miss = h.service.submit_guess(&ana, id, "z").await.unwrap();
    assert_eq!(miss.remaining_attempts, 4);

    h.service.submit_guess(&ana, id, "g").await.unwrap();
    h.service.submit_guess(&ana, id, "t").await.unwrap();
    let last = h.service.submit_guess(&ana, id, " o ").await.unwrap();
    assert_eq!(last.status, GameStatus::Won);
    assert_eq!(last.remaining_attempts, 4);
    assert_eq!(last.secret_word.as_deref(), Some("gato"));
}

#[tokio::test]
async fn word_game_is_lost_when_attempts_run_out() {
    let mut config = game_config(&["perro", "gato"]);
    config.max_attempts = 2;
    let h = Harness::new(config);
    let ana = h.player("Ana").await;
    let session = h
        .service
        .create_session(&ana, GameMode::WordGuess, Some("  Friday  ".into()))
        .await
        .unwrap();
    assert_eq!(session.secret_word, "perro");
    assert_eq!(session.name.as_deref(), Some("Friday"));

    let first = h.service.submit_guess(&ana, session.id, "campo").await.unwrap();
    match first.feedback {
        GuessFeedback::Word { guess, feedback } => {
            assert_eq!(guess, "campo");
            assert_eq!(
                feedback,
                vec![Incorrect, Incorrect, Incorrect, Misplaced, Correct]
            );
        }
        other => panic!("expected word feedback, got {other:?}"),
    }
    assert_eq!(first.remaining_attempts, 1);
    assert_eq!(first.status, GameStatus::Playing);

    let second = h.service.submit_guess(&ana, session.id, "zebra").await.unwrap();
    assert_eq!(second.status, GameStatus::Lost);
    assert_eq!(second.remaining_attempts, 0);
    assert_eq!(second.secret_word.as_deref(), Some("perro"));
}

#[tokio::test]
async fn rejected_guesses_do_not_consume_attempts() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let id = letter_game(&h, &ana).await;
    h.service.submit_guess(&ana, id, "x").await.unwrap();

    for (input, code) in [
        ("", ErrorCode::InvalidGuess),
        ("ab", ErrorCode::InvalidGuess),
        ("4", ErrorCode::InvalidGuess),
        ("X", ErrorCode::RepeatedGuess),
    ] {
        let err = h.service.submit_guess(&ana, id, input).await.unwrap_err();
        assert_eq!(err.code(), code, "input {input:?}");
        assert_eq!(err.status().as_u16(), 400);
    }

    let view = h.service.view_session(&ana, id).await.unwrap();
    assert_eq!(view.remaining_attempts, 4);
    assert_eq!(view.guessed_letters, vec!['x']);
}

#[tokio::test]
async fn word_guess_must_match_secret_length() {
    let h = Harness::new(game_config(&["perro"]));
    let ana = h.player("Ana").await;
    let id = h
        .service
        .create_session(&ana, GameMode::WordGuess, None)
        .await
        .unwrap()
        .id;

    let err = h.service.submit_guess(&ana, id, "gato").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidGuess);

    h.service.submit_guess(&ana, id, "campo").await.unwrap();
    let err = h.service.submit_guess(&ana, id, "CAMPO").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RepeatedGuess);
}

#[tokio::test]
async fn finished_game_rejects_guess_and_leave() {
    let h = Harness::new(game_config(&["perro"]));
    let ana = h.player("Ana").await;
    let id = h
        .service
        .create_session(&ana, GameMode::WordGuess, None)
        .await
        .unwrap()
        .id;
    h.service.submit_guess(&ana, id, "perro").await.unwrap();

    let err = h.service.submit_guess(&ana, id, "campo").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameAlreadyFinished);
    assert_eq!(err.status().as_u16(), 409);

    let err = h.service.leave_session(&ana, id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameAlreadyFinished);
    assert_eq!(err.status().as_u16(), 400);
}

#[tokio::test]
async fn leaving_marks_the_game_lost_and_frees_the_player() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let id = letter_game(&h, &ana).await;

    let err = h
        .service
        .create_session(&ana, GameMode::LetterGuess, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionAlreadyActive);

    let left = h.service.leave_session(&ana, id).await.unwrap();
    assert_eq!(left.status, GameStatus::Lost);
    assert_eq!(left.remaining_attempts, 5);

    letter_game(&h, &ana).await;
}

#[tokio::test]
async fn concurrent_sessions_when_allowed() {
    let mut config = game_config(&["gato"]);
    config.allow_concurrent_sessions = true;
    let h = Harness::new(config);
    let ana = h.player("Ana").await;

    let a = letter_game(&h, &ana).await;
    let b = letter_game(&h, &ana).await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn word_mode_without_matching_words_is_rejected() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let err = h
        .service
        .create_session(&ana, GameMode::WordGuess, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);
    assert_eq!(err.status().as_u16(), 500);
    assert!(h.sessions.find_by_owner(ana.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;

    for err in [
        h.service.submit_guess(&ana, 999, "a").await.unwrap_err(),
        h.service.leave_session(&ana, 999).await.map(|_| ()).unwrap_err(),
        h.service.view_session(&ana, 999).await.map(|_| ()).unwrap_err(),
    ] {
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
        assert_eq!(err.status().as_u16(), 404);
    }
}

#[tokio::test]
async fn unknown_account_cannot_create() {
    let h = Harness::new(game_config(&["gato"]));
    let ghost = Principal::player(4242);
    let err = h
        .service
        .create_session(&ghost, GameMode::LetterGuess, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
}
