//! ULID-based unique values so tests sharing a store never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// An E.164-style number with a random 9-digit tail.
pub fn unique_phone() -> String {
    let tail = (Ulid::new().random() % 1_000_000_000) as u64;
    format!("+1{tail:09}")
}
