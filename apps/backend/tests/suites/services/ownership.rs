use backend::domain::session::{GameMode, GameStatus};
use backend::errors::ErrorCode;

use crate::support::harness::{game_config, Harness};

#[tokio::test]
async fn only_the_owner_can_play_or_leave() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let bob = h.player("Bob").await;
    let id = h
        .service
        .create_session(&ana, GameMode::LetterGuess, None)
        .await
        .unwrap()
        .id;

    let err = h.service.submit_guess(&bob, id, "a").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotOwner);
    assert_eq!(err.status().as_u16(), 403);

    let err = h.service.leave_session(&bob, id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotOwner);

    let view = h.service.view_session(&ana, id).await.unwrap();
    assert_eq!(view.status, GameStatus::Playing);
    assert!(view.guessed_letters.is_empty());
}

#[tokio::test]
async fn admins_may_view_but_not_play_other_games() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let root = h.admin("Root").await;
    let id = h
        .service
        .create_session(&ana, GameMode::LetterGuess, None)
        .await
        .unwrap()
        .id;

    let view = h.service.view_session(&root, id).await.unwrap();
    assert_eq!(view.owner_id, ana.user_id);
    assert_eq!(view.masked_word.as_deref(), Some("____"));
    assert!(view.secret_word.is_none());

    let err = h.service.submit_guess(&root, id, "a").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotOwner);
}

#[tokio::test]
async fn other_players_cannot_view_a_game() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let bob = h.player("Bob").await;
    let id = h
        .service
        .create_session(&ana, GameMode::LetterGuess, None)
        .await
        .unwrap()
        .id;

    let err = h.service.view_session(&bob, id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotOwner);
}
