use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A bearer token was missing, malformed, expired or forged.
pub fn token_rejected(code: &str) {
    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        trace_id = %trace_ctx::trace_id(),
        code,
        "Authentication failure"
    );
}

/// A valid token named a subject with no account behind it.
pub fn unknown_subject(sub: &str) {
    warn!(
        event = "SECURITY_UNKNOWN_SUBJECT",
        trace_id = %trace_ctx::trace_id(),
        sub = %Redacted(sub),
        "Token subject has no account"
    );
}
