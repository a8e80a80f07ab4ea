use backend::adapters::{AccountDirectorySea, SessionRepoSea};
use backend::bootstrap_db;
use backend::config::db::DbConfig;
use backend::domain::session::{GameMode, GameStatus};
use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use backend::repos::accounts::{AccountDirectory, NewAccount};
use backend::repos::sessions::{NewSession, SessionRepo};
use backend_test_support::unique_helpers::unique_str;

struct Fixture {
    sessions: SessionRepoSea,
    owner_id: i64,
}

async fn fixture() -> Fixture {
    let conn = bootstrap_db(&DbConfig::in_memory()).await.unwrap();
    let accounts = AccountDirectorySea::new(conn.clone());
    let owner = accounts
        .create(NewAccount {
            sub: unique_str("sub"),
            name: "Ana".into(),
            phone: None,
            is_admin: false,
        })
        .await
        .unwrap();
    Fixture {
        sessions: SessionRepoSea::new(conn),
        owner_id: owner.id,
    }
}

fn new_session(owner_id: i64, secret: &str, mode: GameMode) -> NewSession {
    NewSession {
        owner_id,
        name: None,
        secret_word: secret.into(),
        mode,
        max_attempts: 5,
    }
}

#[tokio::test]
async fn insert_starts_playing_at_version_one() {
    let f = fixture().await;
    let s = f
        .sessions
        .insert(new_session(f.owner_id, "gato", GameMode::LetterGuess))
        .await
        .unwrap();
    assert_eq!(s.version, 1);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.remaining_attempts, 5);
    assert!(s.guessed_letters.is_empty());
    assert!(f.sessions.has_playing(f.owner_id).await.unwrap());

    let loaded = f.sessions.find_by_id(s.id).await.unwrap().unwrap();
    assert_eq!(loaded.secret_word, "gato");
    assert_eq!(loaded.mode, GameMode::LetterGuess);
}

#[tokio::test]
async fn guesses_round_trip_through_storage() {
    let f = fixture().await;
    let mut s = f
        .sessions
        .insert(new_session(f.owner_id, "perro", GameMode::WordGuess))
        .await
        .unwrap();

    s.apply_guess("campo").unwrap();
    let saved = f.sessions.update(&s).await.unwrap();
    assert_eq!(saved.version, 2);
    assert_eq!(saved.guessed_words, s.guessed_words);
    assert_eq!(saved.remaining_attempts, 4);

    let mut again = saved.clone();
    again.apply_guess("perro").unwrap();
    let done = f.sessions.update(&again).await.unwrap();
    assert_eq!(done.status, GameStatus::Won);
    assert_eq!(done.version, 3);
    assert!(!f.sessions.has_playing(f.owner_id).await.unwrap());
}

#[tokio::test]
async fn stale_version_is_rejected() {
    let f = fixture().await;
    let original = f
        .sessions
        .insert(new_session(f.owner_id, "gato", GameMode::LetterGuess))
        .await
        .unwrap();

    let mut first = original.clone();
    first.apply_guess("a").unwrap();
    f.sessions.update(&first).await.unwrap();

    let mut second = original.clone();
    second.apply_guess("z").unwrap();
    let err = f.sessions.update(&second).await.unwrap_err();
    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::OptimisticLock, _)),
        "got {err:?}"
    );

    let stored = f.sessions.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(stored.guessed_letters, vec!['a']);
    assert_eq!(stored.remaining_attempts, 5);
}

#[tokio::test]
async fn exclusive_insert_refuses_a_second_playing_session() {
    let f = fixture().await;
    let first = f
        .sessions
        .insert_exclusive(new_session(f.owner_id, "gato", GameMode::LetterGuess))
        .await
        .unwrap();

    let err = f
        .sessions
        .insert_exclusive(new_session(f.owner_id, "perro", GameMode::WordGuess))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::SessionAlreadyActive, _)),
        "got {err:?}"
    );
    assert_eq!(f.sessions.find_by_owner(f.owner_id).await.unwrap().len(), 1);

    let mut done = first.clone();
    done.forfeit().unwrap();
    f.sessions.update(&done).await.unwrap();

    let next = f
        .sessions
        .insert_exclusive(new_session(f.owner_id, "perro", GameMode::WordGuess))
        .await
        .unwrap();
    assert_eq!(next.status, GameStatus::Playing);
    assert_eq!(f.sessions.find_by_owner(f.owner_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_of_missing_session_is_not_found() {
    let f = fixture().await;
    let mut ghost = f
        .sessions
        .insert(new_session(f.owner_id, "gato", GameMode::LetterGuess))
        .await
        .unwrap();
    ghost.id += 1000;

    let err = f.sessions.update(&ghost).await.unwrap_err();
    assert!(
        matches!(err, DomainError::NotFound(NotFoundKind::Session, _)),
        "got {err:?}"
    );
    assert!(f.sessions.find_by_id(ghost.id).await.unwrap().is_none());
}

#[tokio::test]
async fn listings_are_ordered_by_id() {
    let f = fixture().await;
    let a = f
        .sessions
        .insert(new_session(f.owner_id, "gato", GameMode::LetterGuess))
        .await
        .unwrap();
    let b = f
        .sessions
        .insert(new_session(f.owner_id, "perro", GameMode::WordGuess))
        .await
        .unwrap();

    let owned: Vec<i64> = f
        .sessions
        .find_by_owner(f.owner_id)
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(owned, vec![a.id, b.id]);
    assert_eq!(f.sessions.find_all().await.unwrap().len(), 2);
    assert!(f.sessions.find_by_owner(f.owner_id + 1).await.unwrap().is_empty());
}
