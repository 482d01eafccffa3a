//! Core greeting record and query filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single greeting sent from one party to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    /// Assigned at creation and never changed afterwards.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Greeting {
    /// Build a greeting with a fresh id, stamped with the current time.
    pub fn new(from: impl Into<String>, to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Copy the mutable fields of `other` onto `self`. `id` and `timestamp`
    /// are left untouched.
    pub fn apply_update(&mut self, other: &Greeting) {
        self.to = other.to.clone();
        self.from = other.from.clone();
        self.message = other.message.clone();
    }
}

/// Optional sender/recipient filter. Blank values mean "match anything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GreetingFilter {
    from: Option<String>,
    to: Option<String>,
}

impl GreetingFilter {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: normalize(from),
            to: normalize(to),
        }
    }

    /// `true` when neither field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Case-insensitive comparison on every field that is set.
    pub fn matches(&self, greeting: &Greeting) -> bool {
        let from_ok = self
            .from
            .as_deref()
            .map_or(true, |f| eq_ignore_case(&greeting.from, f));
        let to_ok = self
            .to
            .as_deref()
            .map_or(true, |t| eq_ignore_case(&greeting.to, t));
        from_ok && to_ok
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
}

/// Ordinal, per-character case-insensitive equality. Characters are
/// compared one to one, so expansions like `ß` -> `SS` never match.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }

    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) => {
                if l != r && !l.to_uppercase().eq(r.to_uppercase()) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filter_values_are_dropped() {
        let filter = GreetingFilter::new(Some("   "), Some(""));
        assert!(filter.is_empty());
        assert_eq!(filter, GreetingFilter::default());
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let greeting = Greeting::new("Alice", "Bob", "Hi");
        assert!(GreetingFilter::new(Some("alice"), Some("BOB")).matches(&greeting));
        assert!(GreetingFilter::new(None, Some("bob")).matches(&greeting));
        assert!(!GreetingFilter::new(Some("carol"), None).matches(&greeting));
    }

    #[test]
    fn filter_matches_non_ascii_case_insensitively() {
        let greeting = Greeting::new("Åsa", "Örjan", "Hej");
        assert!(GreetingFilter::new(Some("åsa"), Some("ÖRJAN")).matches(&greeting));
    }

    #[test]
    fn case_folding_is_per_character() {
        assert!(eq_ignore_case("ÅSA", "åsa"));
        assert!(!eq_ignore_case("İstanbul", "istanbul"));
        assert!(!eq_ignore_case("straße", "STRASSE"));
        assert!(!eq_ignore_case("Alice", "Alic"));
    }

    #[test]
    fn filter_is_exact_not_substring() {
        let greeting = Greeting::new("Alice", "Bob", "Hi");
        assert!(!GreetingFilter::new(Some("ali"), None).matches(&greeting));
    }

    #[test]
    fn apply_update_keeps_id_and_timestamp() {
        let mut original = Greeting::new("Alice", "Bob", "Hi");
        let id = original.id;
        let timestamp = original.timestamp;
        let replacement = Greeting::new("Carol", "Dave", "Hello");

        original.apply_update(&replacement);

        assert_eq!(original.id, id);
        assert_eq!(original.timestamp, timestamp);
        assert_eq!(original.from, "Carol");
        assert_eq!(original.to, "Dave");
        assert_eq!(original.message, "Hello");
    }

    #[test]
    fn deserialize_fills_missing_id_and_timestamp() {
        let greeting: Greeting =
            serde_json::from_str(r#"{"from":"Alice","to":"Bob","message":"Hi"}"#).unwrap();
        assert_eq!(greeting.from, "Alice");
        assert!(!greeting.id.is_nil());
    }
}
