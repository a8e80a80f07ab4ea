//! Error codes for the Guessword backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Guessword backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// User not found in database
    ForbiddenUserNotFound,
    /// Caller does not own the session
    NotOwner,
    /// Operation requires the admin capability
    AdminRequired,
    /// Account is deactivated
    AccountInactive,

    // Request Validation
    /// Invalid session ID provided
    InvalidSessionId,
    /// Guess failed validation
    InvalidGuess,
    /// Guess was already tried in this session
    RepeatedGuess,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game session not found
    SessionNotFound,
    /// User not found
    UserNotFound,
    /// User has no game history
    HistoryEmpty,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Session already won or lost
    GameAlreadyFinished,
    /// Owner already has a playing session
    SessionAlreadyActive,
    /// Account already deactivated
    AlreadyInactive,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Duplicate external subject
    UniqueSub,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Dependency call exceeded its deadline
    DbTimeout,
    /// Notification delivery failure
    NotificationFailed,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::NotOwner => "NOT_OWNER",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::AccountInactive => "ACCOUNT_INACTIVE",

            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidGuess => "INVALID_GUESS",
            Self::RepeatedGuess => "REPEATED_GUESS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::HistoryEmpty => "HISTORY_EMPTY",
            Self::NotFound => "NOT_FOUND",

            Self::GameAlreadyFinished => "GAME_ALREADY_FINISHED",
            Self::SessionAlreadyActive => "SESSION_ALREADY_ACTIVE",
            Self::AlreadyInactive => "ALREADY_INACTIVE",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::UniqueSub => "UNIQUE_SUB",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::NotificationFailed => "NOTIFICATION_FAILED",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
