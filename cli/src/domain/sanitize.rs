//! Redaction of token-like and credential-bearing text before persistence.
//!
//! Pure functions only. The caller decides whether redaction is enabled and
//! applies it to copies destined for disk; in-memory results stay raw.

use std::sync::LazyLock;

use regex::Regex;

/// Replacement written in place of redacted content.
pub const REDACTION_MARKER: &str = "<<REDACTED>>";

/// Runs of 20+ token characters (keys, hashes, bearer tokens).
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[A-Za-z0-9_\-]{20,}").expect("valid regex")
});

/// `Authorization:` header value up to end of line.
static AUTH_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)(Authorization:\s*)[^\r\n]+").expect("valid regex")
});

/// Apply both substitutions, token runs first.
#[must_use]
pub fn redact(text: &str) -> String {
    let masked = TOKEN_RE.replace_all(text, REDACTION_MARKER);
    AUTH_HEADER_RE
        .replace_all(&masked, format!("${{1}}{REDACTION_MARKER}").as_str())
        .into_owned()
}

/// Redact every string inside a JSON document, keys untouched.
///
/// Used for `report.json` so the persisted document stays well-formed.
pub fn redact_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::String(s) => *s = redact(s),
        serde_json::Value::Array(items) => items.iter_mut().for_each(redact_json),
        serde_json::Value::Object(map) => map.values_mut().for_each(redact_json),
        serde_json::Value::Null | serde_json::Value::Bool(_) | serde_json::Value::Number(_) => {}
    }
}

/// Redaction switch carried by the output writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sanitizer {
    enabled: bool,
}

impl Sanitizer {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Redacted copy when enabled, the text unchanged otherwise.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        if self.enabled {
            redact(text)
        } else {
            text.to_string()
        }
    }

    pub fn apply_json(self, value: &mut serde_json::Value) {
        if self.enabled {
            redact_json(value);
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
