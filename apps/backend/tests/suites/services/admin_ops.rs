use backend::domain::session::{GameMode, GameStatus};
use backend::errors::ErrorCode;

use crate::support::harness::{game_config, Harness};

#[tokio::test]
async fn history_is_scoped_to_self_unless_admin() {
    let mut config = game_config(&["gato"]);
    config.allow_concurrent_sessions = true;
    let h = Harness::new(config);
    let ana = h.player("Ana").await;
    let bob = h.player("Bob").await;
    let root = h.admin("Root").await;

    let err = h.service.list_history(&ana, ana.user_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::HistoryEmpty);
    assert_eq!(err.status().as_u16(), 404);

    let first = h
        .service
        .create_session(&ana, GameMode::LetterGuess, Some("one".into()))
        .await
        .unwrap();
    h.service
        .create_session(&ana, GameMode::LetterGuess, Some("two".into()))
        .await
        .unwrap();
    h.service.leave_session(&ana, first.id).await.unwrap();

    let own = h.service.list_history(&ana, ana.user_id).await.unwrap();
    let names: Vec<_> = own.iter().map(|v| v.name.as_deref()).collect();
    assert_eq!(names, vec![Some("one"), Some("two")]);
    assert_eq!(own[0].status, GameStatus::Lost);
    assert_eq!(own[0].secret_word.as_deref(), Some("gato"));
    assert!(own[1].secret_word.is_none());

    let err = h.service.list_history(&bob, ana.user_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AdminRequired);
    assert_eq!(err.status().as_u16(), 403);

    let seen_by_admin = h.service.list_history(&root, ana.user_id).await.unwrap();
    assert_eq!(seen_by_admin, own);
}

#[tokio::test]
async fn listing_every_session_requires_admin() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let bob = h.player("Bob").await;
    let root = h.admin("Root").await;

    let err = h.service.list_all_sessions(&root).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::HistoryEmpty);

    h.service
        .create_session(&ana, GameMode::LetterGuess, None)
        .await
        .unwrap();
    h.service
        .create_session(&bob, GameMode::LetterGuess, None)
        .await
        .unwrap();

    let err = h.service.list_all_sessions(&ana).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AdminRequired);

    let all = h.service.list_all_sessions(&root).await.unwrap();
    let owners: Vec<i64> = all.iter().map(|v| v.owner_id).collect();
    assert_eq!(owners, vec![ana.user_id, bob.user_id]);
}

#[tokio::test]
async fn deactivated_accounts_cannot_start_games() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let root = h.admin("Root").await;

    let account = h.service.deactivate_account(&root, ana.user_id).await.unwrap();
    assert_eq!(account.id, ana.user_id);
    assert!(!account.is_active);

    let err = h
        .service
        .create_session(&ana, GameMode::LetterGuess, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AccountInactive);
    assert_eq!(err.status().as_u16(), 403);

    let err = h
        .service
        .deactivate_account(&root, ana.user_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInactive);
    assert_eq!(err.status().as_u16(), 409);
}

#[tokio::test]
async fn deactivation_guards() {
    let h = Harness::new(game_config(&["gato"]));
    let ana = h.player("Ana").await;
    let bob = h.player("Bob").await;
    let root = h.admin("Root").await;

    let err = h
        .service
        .deactivate_account(&ana, bob.user_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AdminRequired);

    let err = h.service.deactivate_account(&root, 9_999).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
    assert_eq!(err.status().as_u16(), 404);
}
