//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr` internally and convert it here, so the
//! service layer only ever sees `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Prefix of the structured payload adapters emit on a stale version.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";
/// Prefix of the structured payload adapters emit for a vanished session row.
pub const SESSION_NOT_FOUND_PREFIX: &str = "SESSION_NOT_FOUND:";
/// Prefix of the structured payload adapters emit for a vanished user row.
pub const USER_NOT_FOUND_PREFIX: &str = "USER_NOT_FOUND:";

/// Build the `DbErr` an adapter returns when a compare-and-swap misses.
pub fn optimistic_lock_err(expected: i32, actual: i32) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!(
        "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{expected},\"actual\":{actual}}}"
    ))
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a unique violation to a domain conflict by constraint name.
///
/// SQLite reports `UNIQUE constraint failed: users.sub`, Postgres reports the
/// index name (`idx_users_sub_unique`).
fn unique_violation_kind(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("users.sub") || error_msg.contains("idx_users_sub_unique") {
        return Some((ConflictKind::UniqueSub, "Account already exists"));
    }
    None
}

fn parse_id(msg: &str, prefix: &str) -> Option<i64> {
    msg.strip_prefix(prefix)?.parse::<i64>().ok()
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(SESSION_NOT_FOUND_PREFIX) => {
            return match parse_id(msg, SESSION_NOT_FOUND_PREFIX) {
                Some(session_id) => {
                    warn!(trace_id = %trace_id, session_id, "Session not found");
                    DomainError::not_found(
                        NotFoundKind::Session,
                        format!("Game {session_id} not found"),
                    )
                }
                None => DomainError::not_found(NotFoundKind::Session, "Game not found"),
            };
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(USER_NOT_FOUND_PREFIX) => {
            return match parse_id(msg, USER_NOT_FOUND_PREFIX) {
                Some(user_id) => DomainError::not_found(
                    NotFoundKind::User,
                    format!("User {user_id} not found"),
                ),
                None => DomainError::not_found(NotFoundKind::User, "User not found"),
            };
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            #[derive(serde::Deserialize)]
            struct LockInfo {
                expected: i32,
                actual: i32,
            }

            let parsed = msg
                .strip_prefix(OPTIMISTIC_LOCK_PREFIX)
                .and_then(|json| serde_json::from_str::<LockInfo>(json).ok());

            return match parsed {
                Some(info) => {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Game was modified concurrently (expected version {}, actual version {}). Please retry.",
                            info.expected, info.actual
                        ),
                    )
                }
                None => {
                    warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        "Game was modified concurrently; please retry",
                    )
                }
            };
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        if let Some((kind, detail)) = unique_violation_kind(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::Other("ForeignKey".into()),
            "Referenced record does not exist",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
